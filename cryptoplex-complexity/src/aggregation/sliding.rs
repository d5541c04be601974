// Cryptoplex Complexity - Windowed aggregation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Sliding calendar windows.

use super::{Companion, ComplexityPoint, ComplexitySeries};
use crate::scorer::score_states;
use cryptoplex::{Granularity, StateSeries};
use tracing::debug;

/// Score consecutive calendar windows of `scale`.
///
/// A window is kept only when both boundary dates are in the index and it
/// holds at least one valid state. Both boundaries are inclusive. Each point
/// is labelled by the window end and, when a companion is given, carries its
/// statistic over the same window.
pub fn sliding(
    states: &StateSeries,
    scale: Granularity,
    companion: Option<&Companion<'_>>,
) -> ComplexitySeries {
    let (Some(first), Some(last)) = (states.first_date(), states.last_date()) else {
        return ComplexitySeries::default();
    };

    let windows = scale.windows(first, last);
    let total = windows.len();
    let points: Vec<ComplexityPoint> = windows
        .into_iter()
        .filter(|(start, end)| states.contains_date(*start) && states.contains_date(*end))
        .filter_map(|(start, end)| {
            let slice = states.range(start, end);
            let score = score_states(slice.iter().map(|p| &p.value))?;
            Some(ComplexityPoint {
                date: end,
                start: Some(start),
                score: Some(score),
                companion: companion.and_then(|c| c.over(start, end)),
            })
        })
        .collect();

    debug!(
        scale = %scale,
        windows = total,
        retained = points.len(),
        "sliding windows scored"
    );

    ComplexitySeries { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use cryptoplex::{StateLabel, TimeSeries};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily(start: NaiveDate, labels: &[Option<usize>]) -> StateSeries {
        StateSeries::from_pairs(
            labels
                .iter()
                .enumerate()
                .map(|(i, s)| (start + Days::new(i as u64), s.map(StateLabel))),
        )
        .unwrap()
    }

    #[test]
    fn test_weekly_windows_inclusive_of_both_sundays() {
        // 2024-01-07 and 2024-01-14 are Sundays.
        let mut labels = vec![Some(0); 15];
        labels[6] = Some(1); // Jan 7
        labels[13] = Some(2); // Jan 14
        let states = daily(ymd(2024, 1, 1), &labels);
        let out = sliding(&states, Granularity::Week, None);
        assert_eq!(out.len(), 1);
        let point = out.points[0];
        assert_eq!(point.start, Some(ymd(2024, 1, 7)));
        assert_eq!(point.date, ymd(2024, 1, 14));
        // 8 states: one 1, one 2, six 0.
        let p = [6.0 / 8.0, 1.0 / 8.0, 1.0 / 8.0];
        let h: f64 = -p.iter().map(|x: &f64| x * x.log2()).sum::<f64>();
        let expected = h / 3f64.log2();
        assert!((point.score.unwrap().emergence - expected).abs() < 1e-12);
    }

    #[test]
    fn test_skips_window_with_absent_boundary() {
        let start = ymd(2024, 1, 1);
        let pairs: Vec<_> = (0..31u64)
            .filter(|i| *i != 13) // drop Jan 14 (a Sunday)
            .map(|i| (start + Days::new(i), Some(StateLabel((i % 3) as usize))))
            .collect();
        let states = StateSeries::from_pairs(pairs).unwrap();
        let out = sliding(&states, Granularity::Week, None);
        // Sundays: 7, 14, 21, 28 -> windows (7,14) and (14,21) lose a boundary.
        assert_eq!(out.len(), 1);
        assert_eq!(out.points[0].start, Some(ymd(2024, 1, 21)));
    }

    #[test]
    fn test_skips_window_without_valid_states() {
        let labels: Vec<Option<usize>> = (0..62)
            .map(|i| if i < 31 { None } else { Some(i % 2) })
            .collect();
        let states = daily(ymd(2024, 1, 1), &labels);
        let out = sliding(&states, Granularity::Month, None);
        // January is all missing; February ends on the 29th, March on the 31st.
        assert!(out.iter().all(|p| p.score.is_some()));
        assert_eq!(out.len(), 1);
        assert_eq!(out.points[0].date, ymd(2024, 2, 29));
    }

    #[test]
    fn test_monthly_requires_month_end_in_index() {
        let states = daily(ymd(2024, 3, 1), &vec![Some(1); 30]);
        // March 31 is absent, so the only window is dropped.
        assert!(sliding(&states, Granularity::Month, None).is_empty());
    }

    #[test]
    fn test_companion_mean_per_window() {
        let start = ymd(2024, 2, 1);
        let states = daily(start, &vec![Some(0); 29]);
        let caps = TimeSeries::from_pairs((0..29u64).map(|i| (start + Days::new(i), i as f64)))
            .unwrap();
        let companion = Companion::mean(&caps);
        let out = sliding(&states, Granularity::Month, Some(&companion));
        assert_eq!(out.len(), 1);
        assert_eq!(out.points[0].companion, Some(14.0));
    }
}
