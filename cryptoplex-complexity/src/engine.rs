// Cryptoplex Complexity - Emergence and self-organization scoring
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! ComplexityEngine - runs classification and every configured windowing
//! mode over the entities of a panel.

use crate::aggregation::{
    bucketed, expanding_with_companion, sliding, summarize_scales, Companion, ComplexitySeries,
};
use crate::config::{ComplexityConfig, WindowMode};
use crate::report::{EntityReport, PanelReport, SmoothedView, StateCount};
use crate::scorer::StateCounts;
use crate::smoothing::smooth;
use cryptoplex::{EntityData, Granularity, Panel, Result, StateLabel};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Main complexity engine.
#[derive(Debug, Clone)]
pub struct ComplexityEngine {
    config: ComplexityConfig,
}

impl ComplexityEngine {
    /// Create an engine. The configuration is validated up front.
    pub fn new(config: ComplexityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ComplexityConfig {
        &self.config
    }

    /// Classify one entity and run every configured mode over it.
    pub fn analyze_entity(&self, name: &str, data: &EntityData) -> Result<EntityReport> {
        let scheme = &self.config.states;
        let classified = scheme.classify_series(&data.ratio);
        let states = &classified.states;

        let mut report = EntityReport::new(name);
        report.points = data.ratio.len();
        report.observations = data.ratio.valid_count();
        report.breakpoints = classified.breakpoints.map(|bp| bp.as_slice().to_vec());

        let counts = StateCounts::from_states(states.iter().map(|p| &p.value));
        report.state_counts = scheme
            .labels()
            .iter()
            .enumerate()
            .map(|(i, label)| StateCount {
                label: label.clone(),
                count: counts.get(StateLabel(i)),
            })
            .collect();

        let companion_series = data.companion.as_ref();

        if self.config.runs(WindowMode::Fixed) {
            report.summaries = summarize_scales(states, &self.config.summary_scales);
        }

        if self.config.runs(WindowMode::Expanding) {
            let companion = companion_series.map(|series| Companion {
                series,
                stat: self.config.companion.expanding,
            });
            report.expanding = Some(expanding_with_companion(states, companion.as_ref()));
        }

        if self.config.runs(WindowMode::Bucketed) {
            report.bucketed = self.per_scale(|scale| bucketed(states, scale));
        }

        if self.config.runs(WindowMode::Sliding) {
            let companion = companion_series.map(|series| Companion {
                series,
                stat: self.config.companion.sliding,
            });
            report.sliding = self.per_scale(|scale| sliding(states, scale, companion.as_ref()));
        }

        if self.config.smoothing.enabled {
            report.smoothed = self.smoothed_views(&report)?;
        }

        debug!(
            entity = name,
            points = report.points,
            observations = report.observations,
            "entity analyzed"
        );

        Ok(report)
    }

    /// Analyze every entity of the panel, in name order.
    pub fn analyze_panel(&self, panel: &Panel) -> Result<PanelReport> {
        let entities = panel
            .iter()
            .map(|(name, data)| self.analyze_entity(name, data))
            .collect::<Result<Vec<_>>>()?;
        info!(entities = entities.len(), "panel analyzed");
        Ok(PanelReport { entities })
    }

    fn per_scale<F>(&self, mut run: F) -> BTreeMap<Granularity, ComplexitySeries>
    where
        F: FnMut(Granularity) -> ComplexitySeries,
    {
        self.config
            .window_scales
            .iter()
            .map(|scale| (*scale, run(*scale)))
            .collect()
    }

    fn smoothed_views(&self, report: &EntityReport) -> Result<Vec<SmoothedView>> {
        let span = self.config.smoothing.span;
        let windowed = [
            (WindowMode::Bucketed, &report.bucketed),
            (WindowMode::Sliding, &report.sliding),
        ];
        let mut views = Vec::new();
        for (mode, by_scale) in windowed {
            for (scale, series) in by_scale {
                views.push(SmoothedView {
                    mode,
                    scale: *scale,
                    series: smooth(series, span)?,
                });
            }
        }
        Ok(views)
    }
}
