// Cryptoplex Analysis - Complexity versus market data
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Correlation of every entity in a panel.

use crate::config::CorrelationConfig;
use crate::error::{AnalysisError, Result};
use crate::report::{correlate, render_table, CorrelationReport};
use cryptoplex::Panel;
use cryptoplex_complexity::{ComplexityKind, PanelReport};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Entity left out of a batch and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedEntity {
    pub entity: String,
    pub reason: String,
}

/// Correlation results across a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelCorrelation {
    /// Complexity series the reports were computed from.
    pub kind: ComplexityKind,
    pub reports: Vec<CorrelationReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedEntity>,
}

impl PanelCorrelation {
    pub fn get(&self, entity: &str) -> Option<&CorrelationReport> {
        self.reports.iter().find(|r| r.entity == entity)
    }

    pub fn skipped_names(&self) -> impl Iterator<Item = &str> {
        self.skipped.iter().map(|s| s.entity.as_str())
    }

    pub fn render_table(&self) -> String {
        render_table(&self.reports)
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Correlate the configured complexity series of each entity with its
/// market data.
///
/// Entities without market data or with fewer than two aligned points are
/// skipped with a warning. A complexity series the engine did not compute
/// aborts the batch.
pub fn analyze_panel(
    complexity: &PanelReport,
    panel: &Panel,
    config: &CorrelationConfig,
) -> Result<PanelCorrelation> {
    config.validate()?;

    let mut result = PanelCorrelation {
        kind: config.kind,
        reports: Vec::with_capacity(complexity.len()),
        skipped: Vec::new(),
    };

    for entity in &complexity.entities {
        let name = entity.entity.as_str();
        let series = entity
            .series(config.kind)
            .ok_or_else(|| AnalysisError::SeriesUnavailable {
                entity: name.to_string(),
                kind: config.kind.to_string(),
            })?;

        let outcome = panel
            .get(name)
            .and_then(|data| data.companion.as_ref())
            .ok_or_else(|| AnalysisError::MissingCompanion(name.to_string()))
            .and_then(|external| correlate(name, series, external, config.bins));

        match outcome {
            Ok(report) => {
                debug!(entity = name, samples = report.samples, "correlated");
                result.reports.push(report);
            }
            Err(e) if e.is_per_entity() => {
                warn!(entity = name, error = %e, "skipping entity");
                result.skipped.push(SkippedEntity {
                    entity: name.to_string(),
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        kind = %config.kind,
        correlated = result.reports.len(),
        skipped = result.skipped.len(),
        "correlation batch complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use cryptoplex::{EntityData, TimeSeries};
    use cryptoplex_complexity::{ComplexityConfig, ComplexityEngine, WindowMode};

    fn daily(days: u64, f: impl Fn(u64) -> f64) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        TimeSeries::from_pairs((0..days).map(|i| (start + Days::new(i), f(i)))).unwrap()
    }

    fn panel() -> Panel {
        let mut panel = Panel::new();
        let ratio = daily(400, |i| ((i * 37) % 101) as f64);
        panel
            .insert(
                "Bitcoin",
                EntityData::new(ratio.clone()).with_companion(daily(400, |i| 1e9 + i as f64)),
            )
            .unwrap();
        panel.insert("Cardano", EntityData::new(ratio)).unwrap();
        panel
    }

    fn complexity(panel: &Panel, config: ComplexityConfig) -> PanelReport {
        ComplexityEngine::new(config).unwrap().analyze_panel(panel).unwrap()
    }

    #[test]
    fn test_entities_without_market_data_skipped() {
        let panel = panel();
        let report = complexity(&panel, ComplexityConfig::default());
        let result = analyze_panel(&report, &panel, &CorrelationConfig::default()).unwrap();

        assert_eq!(result.reports.len(), 1);
        assert!(result.get("Bitcoin").is_some());
        assert_eq!(result.skipped_names().collect::<Vec<_>>(), vec!["Cardano"]);
        // monthly buckets over 400 days
        assert_eq!(result.reports[0].samples, 13);
    }

    #[test]
    fn test_missing_series_kind_aborts() {
        let panel = panel();
        let config = ComplexityConfig {
            modes: vec![WindowMode::Fixed],
            ..Default::default()
        };
        let report = complexity(&panel, config);
        let err = analyze_panel(&report, &panel, &CorrelationConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::SeriesUnavailable { .. }));
    }

    #[test]
    fn test_invalid_bins_rejected_first() {
        let panel = panel();
        let report = complexity(&panel, ComplexityConfig::default());
        let config = CorrelationConfig {
            bins: 0,
            ..Default::default()
        };
        assert_eq!(
            analyze_panel(&report, &panel, &config),
            Err(AnalysisError::InvalidBins(0))
        );
    }

    #[test]
    fn test_cumulative_uses_every_day() {
        let panel = panel();
        let report = complexity(&panel, ComplexityConfig::default());
        let config = CorrelationConfig {
            kind: ComplexityKind::Cumulative,
            ..Default::default()
        };
        let result = analyze_panel(&report, &panel, &config).unwrap();
        assert_eq!(result.kind, ComplexityKind::Cumulative);
        assert_eq!(result.reports[0].samples, 400);
        assert!(result.render_table().contains("Bitcoin"));
    }
}
