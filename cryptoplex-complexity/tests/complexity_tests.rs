// Cryptoplex Complexity - Integration Tests
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Integration tests for Cryptoplex Complexity.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use cryptoplex::{EntityData, Granularity, Panel, StateLabel, StateScheme, StateSeries, TimeSeries};
use cryptoplex_complexity::aggregation::*;
use cryptoplex_complexity::config::*;
use cryptoplex_complexity::*;
use cryptoplex_testdata::{generate_panel, SyntheticConfig};

// ============================================================================
// Helper Functions
// ============================================================================

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn daily_states(start: NaiveDate, labels: &[Option<usize>]) -> StateSeries {
    StateSeries::from_pairs(
        labels
            .iter()
            .enumerate()
            .map(|(i, s)| (start + Days::new(i as u64), s.map(StateLabel))),
    )
    .unwrap()
}

fn synthetic_panel(days: usize, seed: u64) -> Panel {
    generate_panel(&SyntheticConfig {
        days,
        seed,
        ..SyntheticConfig::default()
    })
    .unwrap()
}

fn synthetic_states(days: usize) -> StateSeries {
    let panel = synthetic_panel(days, 42);
    let (_, data) = panel.iter().next().unwrap();
    StateScheme::default().classify_series(&data.ratio).states
}

// ============================================================================
// Section 1: Scorer Properties
// ============================================================================

#[test]
fn test_01_single_state_window() {
    let labels = vec![Some(2usize); 4];
    let states = daily_states(ymd(2024, 1, 1), &labels);
    let s = score_states(states.iter().map(|p| &p.value)).unwrap();
    assert_eq!(s.emergence, 0.0);
    assert_eq!(s.complexity, 0.0);
}

#[test]
fn test_02_uniform_over_five_states() {
    let labels: Vec<Option<usize>> = (0..5).map(Some).collect();
    let states = daily_states(ymd(2024, 1, 1), &labels);
    let s = score_states(states.iter().map(|p| &p.value)).unwrap();
    assert!((s.emergence - 1.0).abs() < 1e-12);
    assert!(s.self_organization.abs() < 1e-12);
    assert!(s.complexity.abs() < 1e-12);
}

#[test]
fn test_03_complexity_bounds_over_real_windows() {
    let states = synthetic_states(730);
    for scale in Granularity::ALL {
        for point in bucketed(&states, scale).iter() {
            if let Some(score) = point.score {
                assert!((0.0..=1.0).contains(&score.emergence));
                assert!((0.0..=1.0).contains(&score.complexity));
                let expected = 4.0 * score.emergence * (1.0 - score.emergence);
                assert!((score.complexity - expected).abs() < 1e-12);
            }
        }
    }
}

// ============================================================================
// Section 2: Fixed Resample
// ============================================================================

#[test]
fn test_04_one_summary_per_requested_scale() {
    let states = synthetic_states(400);
    let scales = [Granularity::Month, Granularity::Day, Granularity::Week];
    let summaries = summarize_scales(&states, &scales);
    assert_eq!(summaries.len(), 3);
    for (summary, scale) in summaries.iter().zip(scales) {
        assert_eq!(summary.scale, scale);
        assert!(summary.represented <= summary.buckets);
    }
}

#[test]
fn test_05_bucket_modes_labelled_by_bucket_end() {
    let states = synthetic_states(60);
    let modes = bucket_modes(&states, Granularity::Week);
    assert!(modes.iter().all(|(d, _)| d.weekday() == Weekday::Sun));
}

// ============================================================================
// Section 3: Expanding Windows
// ============================================================================

#[test]
fn test_06_expanding_length_matches_input() {
    let states = synthetic_states(500);
    assert_eq!(expanding(&states).len(), states.len());
}

#[test]
fn test_07_expanding_final_equals_whole_series() {
    let states = synthetic_states(500);
    let out = expanding(&states);
    let direct = score_states(states.iter().map(|p| &p.value));
    assert_eq!(out.last().unwrap().score, direct);
}

#[test]
fn test_08_incremental_equals_naive_on_synthetic_data() {
    let states = synthetic_states(365);
    let fast = expanding(&states);
    let slow = expanding_naive(&states);
    for (a, b) in fast.iter().zip(slow.iter()) {
        assert_eq!(a.date, b.date);
        assert_eq!(
            a.score.map(|s| s.complexity.to_bits()),
            b.score.map(|s| s.complexity.to_bits())
        );
    }
}

// ============================================================================
// Section 4: Sliding Windows
// ============================================================================

#[test]
fn test_09_sliding_never_emits_empty_windows() {
    let states = synthetic_states(900);
    for scale in [Granularity::Week, Granularity::Month] {
        let out = sliding(&states, scale, None);
        assert!(!out.is_empty());
        assert_eq!(out.scored_count(), out.len());
        for p in out.iter() {
            let start = p.start.unwrap();
            assert!(states.contains_date(start));
            assert!(states.contains_date(p.date));
        }
    }
}

#[test]
fn test_10_weekly_windows_run_sunday_to_sunday() {
    let labels = vec![Some(1usize); 28];
    let states = daily_states(ymd(2024, 1, 1), &labels);
    let out = sliding(&states, Granularity::Week, None);
    assert_eq!(out.len(), 3);
    for p in out.iter() {
        assert_eq!(p.start.unwrap().weekday(), Weekday::Sun);
        assert_eq!(p.date.weekday(), Weekday::Sun);
        assert_eq!((p.date - p.start.unwrap()).num_days(), 7);
    }
}

#[test]
fn test_11_monthly_windows_need_both_month_boundaries() {
    // Starts mid-January so only February and March are complete.
    let labels = vec![Some(0usize); 80];
    let states = daily_states(ymd(2024, 1, 15), &labels);
    let out = sliding(&states, Granularity::Month, None);
    let ends: Vec<_> = out.iter().map(|p| p.date).collect();
    assert_eq!(ends, vec![ymd(2024, 2, 29), ymd(2024, 3, 31)]);
}

// ============================================================================
// Section 5: Engine
// ============================================================================

#[test]
fn test_12_engine_covers_every_entity() {
    let panel = synthetic_panel(365, 7);
    let engine = ComplexityEngine::new(ComplexityConfig::default()).unwrap();
    let report = engine.analyze_panel(&panel).unwrap();
    assert_eq!(report.len(), panel.len());
    for entity in &report.entities {
        assert!(entity.series(ComplexityKind::Weekly).is_some());
        assert!(entity.series(ComplexityKind::Monthly).is_some());
        assert!(entity.series(ComplexityKind::Cumulative).is_some());
    }
}

#[test]
fn test_13_engine_carries_companion_when_present() {
    let panel = synthetic_panel(200, 3);
    let engine = ComplexityEngine::new(ComplexityConfig::default()).unwrap();
    let report = engine.analyze_panel(&panel).unwrap();
    let entity = &report.entities[0];
    let expanding = entity.series(ComplexityKind::Cumulative).unwrap();
    assert!(expanding.companion_values().count() > 0);
}

#[test]
fn test_14_engine_from_json_config() {
    let config = ComplexityConfig::from_json(
        r#"{
            "modes": ["sliding"],
            "window_scales": ["M"],
            "smoothing": { "enabled": true, "span": 3 }
        }"#,
    )
    .unwrap();
    let engine = ComplexityEngine::new(config).unwrap();
    let panel = synthetic_panel(120, 11);
    let report = engine.analyze_panel(&panel).unwrap();
    let entity = &report.entities[0];
    assert!(entity.expanding.is_none());
    assert_eq!(entity.sliding.len(), 1);
    let smoothed = entity
        .smoothed(WindowMode::Sliding, Granularity::Month)
        .unwrap();
    assert_eq!(smoothed.span, 3);
    assert_eq!(smoothed.len(), entity.sliding[&Granularity::Month].len());
}

#[test]
fn test_15_invalid_selector_names_allowed_values() {
    let err = "rolling".parse::<WindowMode>().unwrap_err().to_string();
    assert!(err.contains("rolling"));
    assert!(err.contains("sliding"));
    assert!("Q".parse::<Granularity>().is_err());
}

// ============================================================================
// Section 6: Smoothing and Reports
// ============================================================================

#[test]
fn test_16_smoothing_preserves_missing_points() {
    let series = ComplexitySeries {
        points: vec![
            ComplexityPoint {
                date: ymd(2024, 1, 31),
                start: None,
                score: Some(ComplexityScore::from_emergence(0.5)),
                companion: None,
            },
            ComplexityPoint {
                date: ymd(2024, 2, 29),
                start: None,
                score: None,
                companion: None,
            },
        ],
    };
    let smoothed = smooth(&series, 12).unwrap();
    assert_eq!(smoothed.points[0].value, Some(1.0));
    assert_eq!(smoothed.points[1].value, None);
}

#[test]
fn test_17_panel_report_json() {
    let mut panel = Panel::new();
    let start = ymd(2024, 1, 1);
    let ratio =
        TimeSeries::from_pairs((0..40u64).map(|i| (start + Days::new(i), (i % 9) as f64)))
            .unwrap();
    panel.insert("Bitcoin", EntityData::new(ratio)).unwrap();

    let engine = ComplexityEngine::new(ComplexityConfig::default()).unwrap();
    let report = engine.analyze_panel(&panel).unwrap();
    let json = report.to_json_pretty().unwrap();
    assert!(json.contains(REPORT_VERSION));

    let restored = PanelReport::from_json(&json).unwrap();
    assert_eq!(restored.len(), 1);
    assert_eq!(restored.entities[0].points, 40);
}
