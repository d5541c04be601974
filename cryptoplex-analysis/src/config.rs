// Cryptoplex Analysis - Complexity versus market data
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Correlation analysis configuration.

use crate::error::{AnalysisError, Result};
use cryptoplex_complexity::ComplexityKind;
use serde::{Deserialize, Serialize};

/// Default number of equal-width bins per series for mutual information.
pub const DEFAULT_BINS: usize = 10;

/// Which complexity series to correlate and how to bin it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Complexity series standing for each entity.
    pub kind: ComplexityKind,
    /// Bins per series for mutual information.
    pub bins: usize,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            kind: ComplexityKind::Monthly,
            bins: DEFAULT_BINS,
        }
    }
}

impl CorrelationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bins == 0 {
            return Err(AnalysisError::InvalidBins(self.bins));
        }
        Ok(())
    }
}
