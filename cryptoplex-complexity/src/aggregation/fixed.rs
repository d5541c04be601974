// Cryptoplex Complexity - Windowed aggregation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Fixed calendar buckets: per-scale summaries and per-bucket series.

use super::{ComplexityPoint, ComplexitySeries};
use crate::scorer::{score_states, ComplexityScore, StateCounts};
use chrono::NaiveDate;
use cryptoplex::{Granularity, Point, StateLabel, StateSeries};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One-number-per-scale summary of a whole history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleSummary {
    pub scale: Granularity,
    /// Calendar buckets spanned by the series.
    pub buckets: usize,
    /// Buckets with a representative (non-missing) state.
    pub represented: usize,
    /// `None` when no bucket had a representative.
    pub score: Option<ComplexityScore>,
}

/// Most frequent state of a window.
///
/// Ties go to the state that occurs first inside the window. `None` when the
/// window holds only missing states.
fn mode(points: &[Point<Option<StateLabel>>]) -> Option<StateLabel> {
    let mut counts = StateCounts::new();
    let mut first_seen: Vec<StateLabel> = Vec::new();
    for label in points.iter().filter_map(|p| p.value) {
        if counts.get(label) == 0 {
            first_seen.push(label);
        }
        counts.add(label);
    }

    let mut best: Option<(StateLabel, u64)> = None;
    for label in first_seen {
        let count = counts.get(label);
        match best {
            Some((_, top)) if count <= top => {}
            _ => best = Some((label, count)),
        }
    }
    best.map(|(label, _)| label)
}

/// Representative state of every calendar bucket, labelled by bucket end.
pub fn bucket_modes(
    states: &StateSeries,
    scale: Granularity,
) -> Vec<(NaiveDate, Option<StateLabel>)> {
    let (Some(first), Some(last)) = (states.first_date(), states.last_date()) else {
        return Vec::new();
    };
    scale
        .buckets(first, last)
        .into_iter()
        .map(|(start, end)| (end, mode(states.range(start, end))))
        .collect()
}

/// Reduce a whole history at one resolution to a single score.
///
/// The distribution is taken over bucket representatives, so the result
/// does not depend on how many buckets the range spans.
pub fn summarize_scale(states: &StateSeries, scale: Granularity) -> ScaleSummary {
    let modes = bucket_modes(states, scale);
    let representatives: Vec<Option<StateLabel>> = modes.iter().map(|(_, m)| *m).collect();
    let counts = StateCounts::from_states(&representatives);
    let score = crate::scorer::score(&counts.distribution());

    debug!(
        scale = %scale,
        buckets = modes.len(),
        represented = counts.total(),
        "fixed resample summary"
    );

    ScaleSummary {
        scale,
        buckets: modes.len(),
        represented: counts.total() as usize,
        score,
    }
}

/// One summary per requested scale, in request order.
pub fn summarize_scales(states: &StateSeries, scales: &[Granularity]) -> Vec<ScaleSummary> {
    scales
        .iter()
        .map(|scale| summarize_scale(states, *scale))
        .collect()
}

/// Score every calendar bucket over all of its valid states.
///
/// Buckets without valid states stay in the output with a missing score.
pub fn bucketed(states: &StateSeries, scale: Granularity) -> ComplexitySeries {
    let (Some(first), Some(last)) = (states.first_date(), states.last_date()) else {
        return ComplexitySeries::default();
    };
    let points = scale
        .buckets(first, last)
        .into_iter()
        .map(|(start, end)| {
            let window = states.range(start, end);
            ComplexityPoint {
                date: end,
                start: Some(start),
                score: score_states(window.iter().map(|p| &p.value)),
                companion: None,
            }
        })
        .collect();
    ComplexitySeries { points }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn states(pairs: Vec<(NaiveDate, Option<usize>)>) -> StateSeries {
        StateSeries::from_pairs(pairs.into_iter().map(|(d, s)| (d, s.map(StateLabel)))).unwrap()
    }

    #[test]
    fn test_mode_tie_goes_to_first_occurrence() {
        let series = states(vec![
            (ymd(2024, 1, 1), Some(3)),
            (ymd(2024, 1, 2), Some(1)),
            (ymd(2024, 1, 3), Some(1)),
            (ymd(2024, 1, 4), Some(3)),
            (ymd(2024, 1, 5), None),
        ]);
        assert_eq!(mode(series.points()), Some(StateLabel(3)));
    }

    #[test]
    fn test_mode_prefers_higher_count() {
        let series = states(vec![
            (ymd(2024, 1, 1), Some(0)),
            (ymd(2024, 1, 2), Some(2)),
            (ymd(2024, 1, 3), Some(2)),
        ]);
        assert_eq!(mode(series.points()), Some(StateLabel(2)));
    }

    #[test]
    fn test_mode_of_missing_window() {
        let series = states(vec![(ymd(2024, 1, 1), None)]);
        assert_eq!(mode(series.points()), None);
        assert_eq!(mode(&[]), None);
    }

    #[test]
    fn test_summary_over_month_modes() {
        // Jan mode = 0, Feb mode = 1, Mar only missing, Apr mode = 0.
        let series = states(vec![
            (ymd(2024, 1, 3), Some(0)),
            (ymd(2024, 1, 9), Some(0)),
            (ymd(2024, 1, 20), Some(4)),
            (ymd(2024, 2, 2), Some(1)),
            (ymd(2024, 3, 2), None),
            (ymd(2024, 4, 2), Some(0)),
        ]);
        let summary = summarize_scale(&series, Granularity::Month);
        assert_eq!(summary.buckets, 4);
        assert_eq!(summary.represented, 3);
        // Modes [0, 1, 0]: p = (2/3, 1/3), n = 2.
        let e = summary.score.unwrap().emergence;
        let expected = -(2.0 / 3.0 * (2.0f64 / 3.0).log2() + 1.0 / 3.0 * (1.0f64 / 3.0).log2());
        assert!((e - expected).abs() < 1e-12);
    }

    #[test]
    fn test_one_summary_per_scale() {
        let series = states(
            (1..=31)
                .map(|d| (ymd(2024, 1, d), Some((d % 5) as usize)))
                .collect(),
        );
        let scales = [
            Granularity::Day,
            Granularity::Week,
            Granularity::Month,
            Granularity::Year,
        ];
        let summaries = summarize_scales(&series, &scales);
        assert_eq!(summaries.len(), 4);
        assert_eq!(summaries[0].buckets, 31);
        assert_eq!(summaries[2].buckets, 1);
        // A single bucket has a single representative.
        assert_eq!(summaries[2].score.unwrap().emergence, 0.0);
    }

    #[test]
    fn test_empty_series_summary() {
        let summary = summarize_scale(&StateSeries::new(), Granularity::Week);
        assert_eq!(summary.buckets, 0);
        assert!(summary.score.is_none());
        assert!(bucketed(&StateSeries::new(), Granularity::Week).is_empty());
    }

    #[test]
    fn test_bucketed_keeps_empty_buckets_as_missing() {
        let series = states(vec![
            (ymd(2024, 1, 1), Some(0)),
            (ymd(2024, 1, 2), Some(1)),
            (ymd(2024, 2, 5), None),
            (ymd(2024, 3, 1), Some(2)),
        ]);
        let out = bucketed(&series, Granularity::Month);
        assert_eq!(out.len(), 3);
        assert_eq!(out.points[0].date, ymd(2024, 1, 31));
        assert_eq!(out.points[0].start, Some(ymd(2024, 1, 1)));
        assert!((out.points[0].score.unwrap().emergence - 1.0).abs() < 1e-12);
        assert!(out.points[1].score.is_none());
        assert_eq!(out.points[2].score.unwrap().emergence, 0.0);
    }
}
