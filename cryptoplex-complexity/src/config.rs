// Cryptoplex Complexity - Emergence and self-organization scoring
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Complexity engine configuration.

use crate::aggregation::CompanionStat;
use cryptoplex::{CoreError, Granularity, Result, StateScheme};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Master configuration for the complexity engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityConfig {
    /// Percentile cut points and state labels.
    pub states: StateScheme,

    /// Scales reduced to a single summary score (fixed resample).
    pub summary_scales: Vec<Granularity>,

    /// Scales for per-window series (bucketed and sliding).
    pub window_scales: Vec<Granularity>,

    /// Windowing modes to run.
    pub modes: Vec<WindowMode>,

    /// Companion capture settings.
    pub companion: CompanionConfig,

    /// Presentation smoothing.
    pub smoothing: SmoothingConfig,
}

impl Default for ComplexityConfig {
    fn default() -> Self {
        Self {
            states: StateScheme::default(),
            summary_scales: Granularity::ALL.to_vec(),
            window_scales: vec![Granularity::Week, Granularity::Month],
            modes: WindowMode::ALL.to_vec(),
            companion: CompanionConfig::default(),
            smoothing: SmoothingConfig::default(),
        }
    }
}

impl ComplexityConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check everything that could make a run fail before it starts.
    pub fn validate(&self) -> Result<()> {
        if self.modes.is_empty() {
            return Err(CoreError::InvalidParameter {
                name: "modes",
                reason: "at least one windowing mode is required".to_string(),
            });
        }
        if self.runs(WindowMode::Fixed) && self.summary_scales.is_empty() {
            return Err(CoreError::InvalidParameter {
                name: "summary_scales",
                reason: "fixed resample needs at least one scale".to_string(),
            });
        }
        let windowed = self.runs(WindowMode::Bucketed) || self.runs(WindowMode::Sliding);
        if windowed && self.window_scales.is_empty() {
            return Err(CoreError::InvalidParameter {
                name: "window_scales",
                reason: "bucketed and sliding modes need at least one scale".to_string(),
            });
        }
        if self.smoothing.enabled && self.smoothing.span == 0 {
            return Err(CoreError::InvalidParameter {
                name: "smoothing.span",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn runs(&self, mode: WindowMode) -> bool {
        self.modes.contains(&mode)
    }
}

/// Windowing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WindowMode {
    /// One summary per scale over bucket representatives.
    Fixed,
    /// One score per calendar bucket.
    Bucketed,
    /// Cumulative to date, one score per observation.
    Expanding,
    /// Consecutive calendar windows.
    Sliding,
}

const WINDOW_MODE_NAMES: [&str; 6] = [
    "fixed",
    "resample",
    "bucketed",
    "expanding",
    "cumulative",
    "sliding",
];

impl WindowMode {
    pub const ALL: [WindowMode; 4] = [
        WindowMode::Fixed,
        WindowMode::Bucketed,
        WindowMode::Expanding,
        WindowMode::Sliding,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WindowMode::Fixed => "fixed",
            WindowMode::Bucketed => "bucketed",
            WindowMode::Expanding => "expanding",
            WindowMode::Sliding => "sliding",
        }
    }
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindowMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" | "resample" => Ok(WindowMode::Fixed),
            "bucketed" => Ok(WindowMode::Bucketed),
            "expanding" | "cumulative" => Ok(WindowMode::Expanding),
            "sliding" => Ok(WindowMode::Sliding),
            _ => Err(CoreError::invalid_selector(s.trim(), &WINDOW_MODE_NAMES)),
        }
    }
}

impl TryFrom<String> for WindowMode {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<WindowMode> for String {
    fn from(m: WindowMode) -> Self {
        m.name().to_string()
    }
}

/// Parse a comma-separated mode list such as `"fixed,sliding"`.
pub fn parse_modes(list: &str) -> Result<Vec<WindowMode>> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Which complexity series represents an entity in correlation analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ComplexityKind {
    /// Per-week bucket scores.
    Weekly,
    /// Per-month bucket scores.
    Monthly,
    /// Expanding (cumulative) scores.
    Cumulative,
}

const COMPLEXITY_KIND_NAMES: [&str; 3] = ["weekly", "monthly", "cumulative"];

impl ComplexityKind {
    pub fn name(self) -> &'static str {
        match self {
            ComplexityKind::Weekly => "weekly",
            ComplexityKind::Monthly => "monthly",
            ComplexityKind::Cumulative => "cumulative",
        }
    }

    /// Bucket scale behind the kind, `None` for cumulative.
    pub fn scale(self) -> Option<Granularity> {
        match self {
            ComplexityKind::Weekly => Some(Granularity::Week),
            ComplexityKind::Monthly => Some(Granularity::Month),
            ComplexityKind::Cumulative => None,
        }
    }
}

impl fmt::Display for ComplexityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComplexityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(ComplexityKind::Weekly),
            "monthly" => Ok(ComplexityKind::Monthly),
            "cumulative" => Ok(ComplexityKind::Cumulative),
            _ => Err(CoreError::invalid_selector(s.trim(), &COMPLEXITY_KIND_NAMES)),
        }
    }
}

impl TryFrom<String> for ComplexityKind {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ComplexityKind> for String {
    fn from(k: ComplexityKind) -> Self {
        k.name().to_string()
    }
}

/// Companion statistic per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    /// Statistic for sliding windows.
    pub sliding: CompanionStat,
    /// Statistic for expanding windows.
    pub expanding: CompanionStat,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            sliding: CompanionStat::Mean,
            expanding: CompanionStat::Last,
        }
    }
}

/// EMA smoothing for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub enabled: bool,
    /// EMA span; alpha = 2 / (span + 1).
    pub span: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            span: 12,
        }
    }
}
