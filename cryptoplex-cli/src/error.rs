// Cryptoplex CLI - Complexity analysis runner
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! CLI error type.

use cryptoplex::CoreError;
use cryptoplex_analysis::AnalysisError;
use cryptoplex_testdata::DatasetError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
