// Cryptoplex CLI - Complexity analysis runner
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Configuration loading, data loading and the analysis pipeline.

use crate::error::CliError;
use cryptoplex::{parse_granularities, Panel};
use cryptoplex_analysis::{analyze_panel, CorrelationConfig, PanelCorrelation};
use cryptoplex_complexity::{parse_modes, ComplexityConfig, ComplexityEngine, PanelReport};
use cryptoplex_testdata::{generate_panel, Dataset, SyntheticConfig};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Version of the JSON output document.
pub const OUTPUT_VERSION: &str = "0.3.0";

/// Configuration file: both sections optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub complexity: ComplexityConfig,
    pub correlation: CorrelationConfig,
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Apply command-line values on top of the file values.
    pub fn apply(&mut self, overrides: &Overrides) -> Result<(), CliError> {
        if let Some(scales) = &overrides.scales {
            self.complexity.window_scales = parse_granularities(scales)?;
        }
        if let Some(modes) = &overrides.modes {
            self.complexity.modes = parse_modes(modes)?;
        }
        if let Some(kind) = &overrides.kind {
            self.correlation.kind = kind.parse()?;
        }
        if let Some(span) = overrides.span {
            self.complexity.smoothing.span = span;
        }
        if let Some(bins) = overrides.bins {
            self.correlation.bins = bins;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CliError> {
        self.complexity.validate()?;
        self.correlation.validate()?;
        Ok(())
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub scales: Option<String>,
    pub modes: Option<String>,
    pub kind: Option<String>,
    pub span: Option<usize>,
    pub bins: Option<usize>,
}

/// Where the panel comes from.
#[derive(Debug, Clone)]
pub enum Source {
    Csv(PathBuf),
    Synthetic { days: usize, seed: u64 },
}

/// Load the panel, optionally restricted to `entities`.
pub fn load_panel(source: &Source, entities: Option<&[String]>) -> Result<Panel, CliError> {
    let panel = match source {
        Source::Csv(path) => {
            let dataset = Dataset::from_csv(path)?;
            info!(path = %path.display(), rows = dataset.len(), "dataset loaded");
            dataset.to_panel(entities)?
        }
        Source::Synthetic { days, seed } => {
            let config = SyntheticConfig::new().with_days(*days).with_seed(*seed);
            let mut panel = generate_panel(&config)?;
            if let Some(names) = entities {
                panel.retain_names(names);
            }
            info!(days, seed, entities = panel.len(), "synthetic panel generated");
            panel
        }
    };
    Ok(panel)
}

/// Everything one run produces.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    pub version: &'static str,
    pub complexity: PanelReport,
    pub correlation: PanelCorrelation,
}

impl RunOutput {
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), CliError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Complexity for every entity, then correlation against market data.
pub fn run(config: &AppConfig, panel: &Panel) -> Result<RunOutput, CliError> {
    config.validate()?;
    let engine = ComplexityEngine::new(config.complexity.clone())?;
    let complexity = engine.analyze_panel(panel)?;
    let correlation = analyze_panel(&complexity, panel, &config.correlation)?;
    Ok(RunOutput {
        version: OUTPUT_VERSION,
        complexity,
        correlation,
    })
}

/// Per-entity scale summaries, one line per scale.
pub fn summary_lines(report: &PanelReport) -> String {
    let mut out = String::new();
    for entity in &report.entities {
        out.push_str(&format!("{} ({} observations)\n", entity.entity, entity.observations));
        for summary in &entity.summaries {
            match summary.score {
                Some(score) => out.push_str(&format!(
                    "  {} scale: emergence {:.6}  self-organization {:.6}  complexity {:.6}\n",
                    summary.scale, score.emergence, score.self_organization, score.complexity
                )),
                None => out.push_str(&format!("  {} scale: no data\n", summary.scale)),
            }
        }
    }
    out
}
