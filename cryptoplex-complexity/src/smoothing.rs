// Cryptoplex Complexity - Emergence and self-organization scoring
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Exponential moving average for presenting complexity series.

use crate::aggregation::ComplexitySeries;
use chrono::NaiveDate;
use cryptoplex::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Smoothed complexity at one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothedPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// EMA of a complexity series. Display only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmoothedSeries {
    pub span: usize,
    pub points: Vec<SmoothedPoint>,
}

impl SmoothedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// `alpha = 2 / (span + 1)`.
pub fn ema_alpha(span: usize) -> Result<f64> {
    if span == 0 {
        return Err(CoreError::InvalidParameter {
            name: "span",
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(2.0 / (span as f64 + 1.0))
}

/// Recursive EMA without bias adjustment.
///
/// The first valid value seeds the average. Missing inputs stay missing and
/// leave the running average untouched.
pub fn ema<I>(values: I, alpha: f64) -> Vec<Option<f64>>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut state: Option<f64> = None;
    values
        .into_iter()
        .map(|x| {
            let x = x.filter(|v| v.is_finite())?;
            let y = match state {
                Some(prev) => alpha * x + (1.0 - alpha) * prev,
                None => x,
            };
            state = Some(y);
            Some(y)
        })
        .collect()
}

/// Smooth the complexity component of a series.
pub fn smooth(series: &ComplexitySeries, span: usize) -> Result<SmoothedSeries> {
    let alpha = ema_alpha(span)?;
    let smoothed = ema(series.iter().map(|p| p.complexity()), alpha);
    let points = series
        .iter()
        .zip(smoothed)
        .map(|(p, value)| SmoothedPoint {
            date: p.date,
            value,
        })
        .collect();
    Ok(SmoothedSeries { span, points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::ComplexityPoint;
    use crate::scorer::ComplexityScore;
    use approx::assert_relative_eq;

    #[test]
    fn test_alpha_from_span() {
        assert_relative_eq!(ema_alpha(12).unwrap(), 2.0 / 13.0);
        assert_eq!(ema_alpha(1).unwrap(), 1.0);
        assert!(ema_alpha(0).is_err());
    }

    #[test]
    fn test_ema_recursion() {
        let out = ema(vec![Some(1.0), Some(0.0), Some(0.0)], 0.5);
        assert_eq!(out, vec![Some(1.0), Some(0.5), Some(0.25)]);
    }

    #[test]
    fn test_ema_skips_missing() {
        let out = ema(vec![None, Some(2.0), None, Some(4.0)], 0.5);
        assert_eq!(out, vec![None, Some(2.0), None, Some(3.0)]);
    }

    #[test]
    fn test_span_one_is_identity() {
        let values = vec![Some(0.3), Some(0.9), Some(0.1)];
        assert_eq!(ema(values.clone(), 1.0), values);
    }

    #[test]
    fn test_smooth_series() {
        let d = |n| NaiveDate::from_ymd_opt(2024, 1, n).unwrap();
        let series = ComplexitySeries {
            points: [0.5, 0.0, 0.5]
                .iter()
                .enumerate()
                .map(|(i, e)| ComplexityPoint {
                    date: d(i as u32 + 1),
                    start: None,
                    score: Some(ComplexityScore::from_emergence(*e)),
                    companion: None,
                })
                .collect(),
        };
        let smoothed = smooth(&series, 3).unwrap();
        // complexities 1, 0, 1 with alpha 0.5
        let values: Vec<_> = smoothed.points.iter().map(|p| p.value.unwrap()).collect();
        assert_eq!(values, vec![1.0, 0.5, 0.75]);
        assert_eq!(smoothed.span, 3);
        assert!(smooth(&series, 0).is_err());
    }
}
