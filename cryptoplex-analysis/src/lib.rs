// Cryptoplex Analysis - Complexity versus market data
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Cryptoplex Analysis
//!
//! Statistical dependence between an entity's complexity series and its
//! market data.
//!
//! ## Features
//!
//! - **Alignment**: inner join of a complexity series with an external daily
//!   series on exact dates, dropping missing values
//! - **Correlation**: Pearson and Spearman coefficients with two-sided
//!   Student t p-values
//! - **Mutual information**: natural-log mutual information between
//!   equal-width binned copies of both series
//! - **Batch**: one [`CorrelationReport`] per entity of a panel, rendered as
//!   a text table
//!
//! ## Quick Start
//!
//! ```rust
//! use cryptoplex_analysis::{analyze_panel, CorrelationConfig};
//! use cryptoplex_complexity::{ComplexityConfig, ComplexityEngine};
//! use cryptoplex_testdata::{generate_panel, SyntheticConfig};
//!
//! let panel = generate_panel(&SyntheticConfig::new().with_days(730)).unwrap();
//! let complexity = ComplexityEngine::new(ComplexityConfig::default())
//!     .unwrap()
//!     .analyze_panel(&panel)
//!     .unwrap();
//!
//! let result = analyze_panel(&complexity, &panel, &CorrelationConfig::default()).unwrap();
//! println!("{}", result.render_table());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! PanelReport ──┐
//!               ├─► align ─► pearson / spearman ─► CorrelationReport ─► table
//! Panel (caps) ─┘        └─► bin ─► mutual information ┘
//! ```

pub mod alignment;
pub mod batch;
pub mod config;
pub mod correlation;
pub mod error;
pub mod mutual_info;
pub mod report;

pub use alignment::{align, AlignedPairs};
pub use batch::{analyze_panel, PanelCorrelation, SkippedEntity};
pub use config::{CorrelationConfig, DEFAULT_BINS};
pub use correlation::{
    average_ranks, correlation_p_value, pearson, pearson_coefficient, spearman, Correlation,
};
pub use error::{AnalysisError, Result};
pub use mutual_info::{bin_edges, binned_mutual_information, equal_width_bins, mutual_information};
pub use report::{
    correlate, format_coefficient, format_p_value, render_table, CorrelationReport, TABLE_HEADERS,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
