// Cryptoplex Analysis - Complexity versus market data
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Pearson and Spearman correlation with two-sided p-values.
//!
//! Both p-values use the Student t approximation with `n - 2` degrees of
//! freedom, `t = r * sqrt((n - 2) / (1 - r^2))`. A constant input has no
//! defined correlation and yields NaN for both coefficient and p-value.

use nalgebra::DVector;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// A coefficient with its two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    pub coefficient: f64,
    pub p_value: f64,
}

impl Correlation {
    fn undefined() -> Self {
        Self {
            coefficient: f64::NAN,
            p_value: f64::NAN,
        }
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Pearson product-moment coefficient, NaN when either side is constant.
///
/// Inputs must have equal length; extra elements of the longer side are
/// ignored.
pub fn pearson_coefficient(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 || is_constant(&x[..n]) || is_constant(&y[..n]) {
        return f64::NAN;
    }
    let x = DVector::from_column_slice(&x[..n]);
    let y = DVector::from_column_slice(&y[..n]);

    let xc = x.add_scalar(-x.mean());
    let yc = y.add_scalar(-y.mean());
    let denom = xc.norm() * yc.norm();
    if denom == 0.0 || !denom.is_finite() {
        return f64::NAN;
    }
    (xc.dot(&yc) / denom).clamp(-1.0, 1.0)
}

/// Two-sided p-value for a correlation coefficient over `n` pairs.
pub fn correlation_p_value(r: f64, n: usize) -> f64 {
    if r.is_nan() || n < 2 {
        return f64::NAN;
    }
    if n == 2 {
        return 1.0;
    }
    let df = (n - 2) as f64;
    let one_minus_r2 = 1.0 - r * r;
    if one_minus_r2 <= 0.0 {
        return 0.0;
    }
    let t = r * (df / one_minus_r2).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.sf(t.abs())).clamp(0.0, 1.0),
        Err(_) => f64::NAN,
    }
}

/// Pearson coefficient and p-value.
pub fn pearson(x: &[f64], y: &[f64]) -> Correlation {
    let n = x.len().min(y.len());
    let coefficient = pearson_coefficient(x, y);
    if coefficient.is_nan() {
        return Correlation::undefined();
    }
    Correlation {
        coefficient,
        p_value: correlation_p_value(coefficient, n),
    }
}

/// 1-based ranks, ties sharing the average of their positions.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|a, b| values[*a].total_cmp(&values[*b]));

    let mut ranks = vec![0.0; values.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // positions i..=j hold equal values
        let rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = rank;
        }
        i = j + 1;
    }
    ranks
}

/// Spearman rank coefficient (Pearson over average ranks) and p-value.
pub fn spearman(x: &[f64], y: &[f64]) -> Correlation {
    let n = x.len().min(y.len());
    pearson(&average_ranks(&x[..n]), &average_ranks(&y[..n]))
}
