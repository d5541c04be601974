// Cryptoplex Complexity - Emergence and self-organization scoring
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Cryptoplex Complexity
//!
//! Emergence, self-organization and complexity over discretized state series.
//!
//! - **Scorer**: normalized Shannon entropy of a state distribution and the
//!   derived `S = 1 - E`, `C = 4 E S`
//! - **Aggregation**: fixed resample summaries, per-bucket series, expanding
//!   and sliding calendar windows, all through one scoring path
//! - **Smoothing**: EMA views of windowed series for presentation
//! - **Engine**: classification plus every configured mode for each entity
//!   of a panel
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{Days, NaiveDate};
//! use cryptoplex::{EntityData, Granularity, Panel, TimeSeries};
//! use cryptoplex_complexity::{ComplexityConfig, ComplexityEngine, ComplexityKind};
//!
//! let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
//! let ratio = TimeSeries::from_pairs(
//!     (0..90u64).map(|i| (start + Days::new(i), (i % 17) as f64)),
//! )
//! .unwrap();
//!
//! let mut panel = Panel::new();
//! panel.insert("Bitcoin", EntityData::new(ratio)).unwrap();
//!
//! let engine = ComplexityEngine::new(ComplexityConfig::default()).unwrap();
//! let report = engine.analyze_panel(&panel).unwrap();
//!
//! let bitcoin = report.get("Bitcoin").unwrap();
//! assert_eq!(bitcoin.expanding.as_ref().unwrap().len(), 90);
//! assert!(bitcoin.series(ComplexityKind::Monthly).is_some());
//! assert!(bitcoin.summary(Granularity::Year).is_some());
//! ```
//!
//! ## Key Concepts
//!
//! ### Emergence
//!
//! Entropy of the state distribution divided by `log2 n`, where `n` is the
//! number of occupied states. A window with one occupied state has emergence
//! 0; a window with no valid observation has no score at all.
//!
//! ### Windowing
//!
//! | Mode | Output |
//! |------|--------|
//! | fixed | one score per scale, over each bucket's most frequent state |
//! | bucketed | one score per calendar bucket |
//! | expanding | one score per date, over all states up to it |
//! | sliding | one score per calendar window whose boundaries are in the index |

pub mod aggregation;
pub mod config;
pub mod engine;
pub mod report;
pub mod scorer;
pub mod smoothing;

pub use aggregation::{
    Companion, CompanionStat, ComplexityPoint, ComplexitySeries, ScaleSummary,
};
pub use config::{
    parse_modes, CompanionConfig, ComplexityConfig, ComplexityKind, SmoothingConfig, WindowMode,
};
pub use engine::ComplexityEngine;
pub use report::{EntityReport, PanelReport, SmoothedView, StateCount, REPORT_VERSION};
pub use scorer::{emergence, score, score_states, ComplexityScore, StateCounts, StateDistribution};
pub use smoothing::{ema, ema_alpha, smooth, SmoothedPoint, SmoothedSeries};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_report_roundtrip_through_engine() {
        use chrono::{Days, NaiveDate};
        use cryptoplex::{EntityData, TimeSeries};

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let ratio =
            TimeSeries::from_pairs((0..45u64).map(|i| (start + Days::new(i), (i % 7) as f64)))
                .unwrap();
        let engine = ComplexityEngine::new(ComplexityConfig::default()).unwrap();
        let report = engine
            .analyze_entity("Bitcoin", &EntityData::new(ratio))
            .unwrap();

        let json = report.to_json().unwrap();
        assert!(json.contains("\"version\""));
        let restored = EntityReport::from_json(&json).unwrap();
        assert_eq!(restored.entity, report.entity);
        assert_eq!(restored.summaries.len(), report.summaries.len());
        assert_eq!(
            restored.expanding.map(|s| s.len()),
            report.expanding.map(|s| s.len())
        );
    }
}
