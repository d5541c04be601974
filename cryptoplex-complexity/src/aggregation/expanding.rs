// Cryptoplex Complexity - Windowed aggregation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Expanding (cumulative-to-date) windows.

use super::{Companion, ComplexityPoint, ComplexitySeries};
use crate::scorer::{score, StateCounts};
use cryptoplex::StateSeries;

/// Score every prefix `0..=i` of the series.
///
/// Counts are updated incrementally; since the distribution is always
/// rebuilt from integer counts in label order, each point is bit-identical
/// to [`expanding_naive`].
pub fn expanding(states: &StateSeries) -> ComplexitySeries {
    expanding_with_companion(states, None)
}

/// [`expanding`] with a companion statistic over each prefix.
pub fn expanding_with_companion(
    states: &StateSeries,
    companion: Option<&Companion<'_>>,
) -> ComplexitySeries {
    let Some(first) = states.first_date() else {
        return ComplexitySeries::default();
    };

    let mut counts = StateCounts::new();
    let points = states
        .iter()
        .map(|point| {
            if let Some(label) = point.value {
                counts.add(label);
            }
            ComplexityPoint {
                date: point.date,
                start: None,
                score: score(&counts.distribution()),
                companion: companion.and_then(|c| c.over(first, point.date)),
            }
        })
        .collect();

    ComplexitySeries { points }
}

/// Reference implementation: recount every prefix from scratch.
pub fn expanding_naive(states: &StateSeries) -> ComplexitySeries {
    let all = states.points();
    let points = all
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let counts = StateCounts::from_states(all[..=i].iter().map(|p| &p.value));
            ComplexityPoint {
                date: point.date,
                start: None,
                score: score(&counts.distribution()),
                companion: None,
            }
        })
        .collect();
    ComplexitySeries { points }
}
