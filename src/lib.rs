//! # Cryptoplex
//!
//! Primitives for measuring the complexity of cryptocurrency transaction
//! efficiency (transactions per unit of energy).
//!
//! ## Key Features
//!
//! - **Date-indexed series**: strictly ordered, gaps as absent dates
//! - **Percentile states**: breakpoints computed once per entity history
//! - **Calendar granularities**: day, week (ending Sunday), month, year
//! - **Panels**: entity name -> input series, no ambient state
//!
//! ## Quick Start
//!
//! ```rust
//! use cryptoplex::{StateScheme, TimeSeries};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
//! let series = TimeSeries::from_pairs(
//!     (0..10).map(|i| (start + chrono::Days::new(i), i as f64)),
//! )
//! .unwrap();
//!
//! let scheme = StateScheme::default();
//! let classified = scheme.classify_series(&series);
//! assert_eq!(classified.states.len(), 10);
//!
//! let last = classified.states.points()[9].value.unwrap();
//! assert_eq!(scheme.label_name(last), Some("Extremely High"));
//! ```
//!
//! The scoring and windowing engine lives in `cryptoplex-complexity`;
//! correlation against external series in `cryptoplex-analysis`.

pub mod calendar;
pub mod classifier;
pub mod error;
pub mod panel;
pub mod series;

// Re-exports for convenient access
pub use calendar::{parse_granularities, Granularity};
pub use classifier::{
    Classified, Percentiles, StateBreakpoints, StateLabel, StateScheme, DEFAULT_LABELS,
    DEFAULT_PERCENTILES,
};
pub use error::{CoreError, Result};
pub use panel::{EntityData, Panel};
pub use series::{Point, Series, StateSeries, TimeSeries};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
