// Cryptoplex Analysis - Complexity versus market data
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Error types for Cryptoplex Analysis

use cryptoplex::CoreError;
use thiserror::Error;

/// Main error type for analysis operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Too few aligned points to correlate
    #[error("Insufficient data for {entity}: {aligned} aligned points (need at least 2)")]
    InsufficientData { entity: String, aligned: usize },

    /// Bin count of zero
    #[error("Invalid bin count: {0} (must be at least 1)")]
    InvalidBins(usize),

    /// Requested complexity series was not computed
    #[error("No {kind} complexity series for {entity}; enable the matching window mode")]
    SeriesUnavailable { entity: String, kind: String },

    /// Entity has no companion series to correlate against
    #[error("No market data for {0}")]
    MissingCompanion(String),

    /// Configuration or data error from the core crate
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AnalysisError {
    /// Whether a batch run should skip the entity rather than abort.
    pub fn is_per_entity(&self) -> bool {
        matches!(
            self,
            AnalysisError::InsufficientData { .. } | AnalysisError::MissingCompanion(_)
        )
    }
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
