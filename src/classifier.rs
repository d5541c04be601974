// Cryptoplex - Cryptoeconomic complexity analysis
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Percentile state classification
//!
//! This module turns a continuous ratio series into an ordinal state series.
//! Breakpoints are percentiles of the entity's full history (computed once,
//! never per window); each value lands in the first bucket whose breakpoint
//! it is strictly below, or in the top bucket otherwise.

use crate::error::{CoreError, Result};
use crate::series::{StateSeries, TimeSeries};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default percentile cut points.
pub const DEFAULT_PERCENTILES: [f64; 4] = [10.0, 30.0, 70.0, 90.0];

/// Default state labels, lowest to highest.
pub const DEFAULT_LABELS: [&str; 5] = ["Very Low", "Low", "High", "Very High", "Extremely High"];

/// Ordinal state: index into the scheme's label set (0 = lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateLabel(pub usize);

impl StateLabel {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Percentile cut points in (0, 100), strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Percentiles(Vec<f64>);

impl Percentiles {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(CoreError::InvalidPercentiles(
                "at least one cut point is required".to_string(),
            ));
        }
        if let Some(bad) = values.iter().find(|p| !(**p > 0.0 && **p < 100.0)) {
            return Err(CoreError::InvalidPercentiles(format!(
                "{bad} is outside (0, 100)"
            )));
        }
        if values.windows(2).any(|w| w[0] >= w[1]) {
            return Err(CoreError::InvalidPercentiles(format!(
                "{values:?} is not strictly increasing"
            )));
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Percentiles {
    fn default() -> Self {
        Self(DEFAULT_PERCENTILES.to_vec())
    }
}

impl TryFrom<Vec<f64>> for Percentiles {
    type Error = CoreError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<Percentiles> for Vec<f64> {
    fn from(p: Percentiles) -> Self {
        p.0
    }
}

/// Breakpoint values computed from one entity's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateBreakpoints(Vec<f64>);

impl StateBreakpoints {
    /// Compute breakpoints from raw values, ignoring non-finite entries.
    ///
    /// Uses linear interpolation between order statistics. Returns `None`
    /// when no finite value remains.
    pub fn compute<I>(values: I, percentiles: &Percentiles) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let cuts = percentiles
            .as_slice()
            .iter()
            .map(|p| percentile_linear(&sorted, *p))
            .collect();
        Some(Self(cuts))
    }

    /// Wrap precomputed breakpoints. They must be non-decreasing.
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if values.iter().any(|v| v.is_nan()) || values.windows(2).any(|w| w[0] > w[1]) {
            return Err(CoreError::InvalidParameter {
                name: "breakpoints",
                reason: format!("{values:?} is not non-decreasing"),
            });
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Classify a finite value. Equal-to-breakpoint goes to the higher state.
    pub fn classify(&self, value: f64) -> StateLabel {
        let idx = self
            .0
            .iter()
            .position(|b| value < *b)
            .unwrap_or(self.0.len());
        StateLabel(idx)
    }
}

/// Linear-interpolation percentile over sorted, non-empty data.
fn percentile_linear(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Percentile cut points paired with their label set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScheme")]
pub struct StateScheme {
    percentiles: Percentiles,
    labels: Vec<String>,
}

#[derive(Deserialize)]
struct RawScheme {
    percentiles: Percentiles,
    labels: Vec<String>,
}

impl TryFrom<RawScheme> for StateScheme {
    type Error = CoreError;

    fn try_from(raw: RawScheme) -> Result<Self> {
        Self::new(raw.percentiles, raw.labels)
    }
}

impl Default for StateScheme {
    fn default() -> Self {
        Self {
            percentiles: Percentiles::default(),
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Result of classifying one entity's series.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    /// `None` when the series had no valid observation.
    pub breakpoints: Option<StateBreakpoints>,
    pub states: StateSeries,
}

impl StateScheme {
    /// Build a scheme. Requires exactly `percentiles.len() + 1` labels.
    pub fn new(percentiles: Percentiles, labels: Vec<String>) -> Result<Self> {
        let expected = percentiles.len() + 1;
        if labels.len() != expected {
            return Err(CoreError::LabelCountMismatch {
                expected,
                actual: labels.len(),
            });
        }
        Ok(Self {
            percentiles,
            labels,
        })
    }

    pub fn percentiles(&self) -> &Percentiles {
        &self.percentiles
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn label_name(&self, label: StateLabel) -> Option<&str> {
        self.labels.get(label.index()).map(String::as_str)
    }

    /// Look up a label by name.
    pub fn label(&self, name: &str) -> Option<StateLabel> {
        self.labels.iter().position(|l| l == name).map(StateLabel)
    }

    pub fn breakpoints(&self, series: &TimeSeries) -> Option<StateBreakpoints> {
        StateBreakpoints::compute(series.valid_values(), &self.percentiles)
    }

    /// Classify every point of `series` in one pass.
    ///
    /// Missing values, and every value when no breakpoints exist, become
    /// missing states.
    pub fn classify_series(&self, series: &TimeSeries) -> Classified {
        let breakpoints = self.breakpoints(series);
        let states = match &breakpoints {
            Some(bp) => {
                debug!(breakpoints = ?bp.as_slice(), points = series.len(), "classifying series");
                series.map(|v| v.is_finite().then(|| bp.classify(*v)))
            }
            None => {
                warn!(
                    points = series.len(),
                    "series has no valid observations; all states missing"
                );
                series.map(|_| None)
            }
        };
        Classified {
            breakpoints,
            states,
        }
    }
}
