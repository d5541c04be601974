// Cryptoplex Analysis - Complexity versus market data
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Date alignment of a complexity series with an external series.

use chrono::NaiveDate;
use cryptoplex::TimeSeries;
use cryptoplex_complexity::ComplexitySeries;

/// Paired observations present and valid in both series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedPairs {
    pub dates: Vec<NaiveDate>,
    /// Complexity values.
    pub x: Vec<f64>,
    /// External values.
    pub y: Vec<f64>,
}

impl AlignedPairs {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Inner join by date, dropping dates where either side is missing.
pub fn align(complexity: &ComplexitySeries, external: &TimeSeries) -> AlignedPairs {
    let mut pairs = AlignedPairs::default();
    for (date, value) in complexity.complexity_values() {
        let Some(x) = value.filter(|v| v.is_finite()) else {
            continue;
        };
        if let Some(y) = external.value_at(date) {
            pairs.dates.push(date);
            pairs.x.push(x);
            pairs.y.push(y);
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptoplex_complexity::{ComplexityPoint, ComplexityScore};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn point(d: u32, emergence: Option<f64>) -> ComplexityPoint {
        ComplexityPoint {
            date: day(d),
            start: None,
            score: emergence.map(ComplexityScore::from_emergence),
            companion: None,
        }
    }

    #[test]
    fn test_inner_join_drops_missing() {
        let complexity = ComplexitySeries {
            points: vec![
                point(1, Some(0.5)),
                point(2, None),
                point(3, Some(0.0)),
                point(4, Some(0.5)),
                point(5, Some(0.5)),
            ],
        };
        let caps = TimeSeries::from_pairs(vec![
            (day(1), 10.0),
            (day(2), 20.0),
            (day(3), f64::NAN),
            (day(5), 50.0),
            (day(6), 60.0),
        ])
        .unwrap();

        let pairs = align(&complexity, &caps);
        assert_eq!(pairs.dates, vec![day(1), day(5)]);
        assert_eq!(pairs.x, vec![1.0, 1.0]);
        assert_eq!(pairs.y, vec![10.0, 50.0]);
    }

    #[test]
    fn test_empty_inputs() {
        let pairs = align(&ComplexitySeries::default(), &TimeSeries::new());
        assert!(pairs.is_empty());
    }
}
