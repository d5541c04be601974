// Cryptoplex Complexity - Emergence and self-organization scoring
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! EntityReport - per-entity output with every computed series.

use crate::aggregation::{ComplexitySeries, ScaleSummary};
use crate::config::{ComplexityKind, WindowMode};
use crate::smoothing::SmoothedSeries;
use cryptoplex::Granularity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version of the report format.
pub const REPORT_VERSION: &str = "0.3.0";

/// Occurrences of one state over the whole history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCount {
    pub label: String,
    pub count: u64,
}

/// A smoothed copy of one windowed series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothedView {
    pub mode: WindowMode,
    pub scale: Granularity,
    pub series: SmoothedSeries,
}

/// Complete complexity analysis of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityReport {
    /// Format version.
    pub version: String,
    /// Entity name.
    pub entity: String,
    /// Dates in the input index.
    pub points: usize,
    /// Non-missing observations.
    pub observations: usize,
    /// Percentile breakpoints, absent when the series had no observations.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub breakpoints: Option<Vec<f64>>,
    /// State occupancy over the whole history, in label order.
    pub state_counts: Vec<StateCount>,
    /// Fixed resample summaries, one per scale.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub summaries: Vec<ScaleSummary>,
    /// Expanding series.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expanding: Option<ComplexitySeries>,
    /// Per-bucket series by scale.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub bucketed: BTreeMap<Granularity, ComplexitySeries>,
    /// Sliding window series by scale.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub sliding: BTreeMap<Granularity, ComplexitySeries>,
    /// Smoothed views of the windowed series.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub smoothed: Vec<SmoothedView>,
}

impl EntityReport {
    /// Empty report shell for an entity.
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            version: REPORT_VERSION.to_string(),
            entity: entity.into(),
            points: 0,
            observations: 0,
            breakpoints: None,
            state_counts: Vec::new(),
            summaries: Vec::new(),
            expanding: None,
            bucketed: BTreeMap::new(),
            sliding: BTreeMap::new(),
            smoothed: Vec::new(),
        }
    }

    /// The series that stands for this entity under `kind`.
    pub fn series(&self, kind: ComplexityKind) -> Option<&ComplexitySeries> {
        match kind.scale() {
            Some(scale) => self.bucketed.get(&scale),
            None => self.expanding.as_ref(),
        }
    }

    pub fn summary(&self, scale: Granularity) -> Option<&ScaleSummary> {
        self.summaries.iter().find(|s| s.scale == scale)
    }

    pub fn smoothed(&self, mode: WindowMode, scale: Granularity) -> Option<&SmoothedSeries> {
        self.smoothed
            .iter()
            .find(|v| v.mode == mode && v.scale == scale)
            .map(|v| &v.series)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Reports for every entity of a panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelReport {
    pub entities: Vec<EntityReport>,
}

impl PanelReport {
    pub fn get(&self, entity: &str) -> Option<&EntityReport> {
        self.entities.iter().find(|r| r.entity == entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
