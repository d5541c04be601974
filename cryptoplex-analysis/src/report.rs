// Cryptoplex Analysis - Complexity versus market data
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Per-entity correlation records and their text table.

use crate::alignment::align;
use crate::correlation::{pearson, spearman};
use crate::error::{AnalysisError, Result};
use crate::mutual_info::binned_mutual_information;
use cryptoplex::TimeSeries;
use cryptoplex_complexity::ComplexitySeries;
use serde::{Deserialize, Serialize};

/// Column headers of the correlation table.
pub const TABLE_HEADERS: [&str; 6] = [
    "Blockchain",
    "Pearson Correlation",
    "Pearson p-value",
    "Spearman Correlation",
    "Spearman p-value",
    "Mutual Information",
];

/// Correlation of one entity's complexity with its market data.
///
/// Undefined statistics (constant input) are NaN and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub entity: String,
    pub pearson_r: f64,
    pub pearson_p: f64,
    pub spearman_r: f64,
    pub spearman_p: f64,
    /// Mutual information in nats.
    pub mutual_information: f64,
    /// Number of aligned observations.
    pub samples: usize,
}

impl CorrelationReport {
    /// Table cells in header order.
    pub fn cells(&self) -> [String; 6] {
        [
            self.entity.clone(),
            format_coefficient(self.pearson_r),
            format_p_value(self.pearson_p),
            format_coefficient(self.spearman_r),
            format_p_value(self.spearman_p),
            format_coefficient(self.mutual_information),
        ]
    }
}

/// Correlate a complexity series with an external series of the same entity.
pub fn correlate(
    entity: &str,
    complexity: &ComplexitySeries,
    external: &TimeSeries,
    bins: usize,
) -> Result<CorrelationReport> {
    if bins == 0 {
        return Err(AnalysisError::InvalidBins(bins));
    }
    let pairs = align(complexity, external);
    if pairs.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            entity: entity.to_string(),
            aligned: pairs.len(),
        });
    }

    let p = pearson(&pairs.x, &pairs.y);
    let s = spearman(&pairs.x, &pairs.y);
    let mutual_information = binned_mutual_information(&pairs.x, &pairs.y, bins)?;

    Ok(CorrelationReport {
        entity: entity.to_string(),
        pearson_r: p.coefficient,
        pearson_p: p.p_value,
        spearman_r: s.coefficient,
        spearman_p: s.p_value,
        mutual_information,
        samples: pairs.len(),
    })
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("nan")
    } else if value == f64::INFINITY {
        Some("inf")
    } else if value == f64::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}

/// Six-decimal fixed notation, `nan` when undefined.
pub fn format_coefficient(value: f64) -> String {
    match non_finite(value) {
        Some(s) => s.to_string(),
        None => format!("{value:.6}"),
    }
}

/// Scientific notation with two mantissa decimals and an exponent of at
/// least two signed digits, e.g. `1.23e-04`.
pub fn format_p_value(p: f64) -> String {
    if let Some(s) = non_finite(p) {
        return s.to_string();
    }
    let formatted = format!("{p:.2e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// Fixed-width text table, one row per report, cells centred.
pub fn render_table(reports: &[CorrelationReport]) -> String {
    let rows: Vec<[String; 6]> = reports.iter().map(CorrelationReport::cells).collect();

    let mut widths = TABLE_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!(" {cell:^w$} "))
            .collect::<Vec<_>>()
            .join("|")
    };

    let headers = TABLE_HEADERS.map(str::to_string);
    let rule = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");

    let mut out = String::new();
    out.push_str(line(&headers).trim_end());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    for row in &rows {
        out.push_str(line(row).trim_end());
        out.push('\n');
    }
    out
}
