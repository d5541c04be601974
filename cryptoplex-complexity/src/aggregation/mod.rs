// Cryptoplex Complexity - Windowed aggregation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Aggregation engine: applies the scorer over windows of a state series.
//!
//! Four windowing strategies share the same counting and scoring path:
//!
//! | Mode | Output |
//! |------|--------|
//! | Fixed resample ([`summarize_scale`]) | one summary per scale, over bucket modes |
//! | Bucketed ([`bucketed`]) | one point per calendar bucket |
//! | Expanding ([`expanding`]) | one point per input date, cumulative to date |
//! | Sliding ([`sliding`]) | one point per retained calendar window |
//!
//! Missing states never enter a count.

mod expanding;
mod fixed;
mod sliding;

pub use expanding::{expanding, expanding_naive, expanding_with_companion};
pub use fixed::{bucket_modes, bucketed, summarize_scale, summarize_scales, ScaleSummary};
pub use sliding::sliding;

use crate::scorer::ComplexityScore;
use chrono::NaiveDate;
use cryptoplex::TimeSeries;
use serde::{Deserialize, Serialize};

/// One window of a complexity series, labelled by its end date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityPoint {
    pub date: NaiveDate,
    /// First date of the window, for calendar windows.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub start: Option<NaiveDate>,
    /// `None` when the window holds no valid observation.
    pub score: Option<ComplexityScore>,
    /// Companion statistic over the same window.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub companion: Option<f64>,
}

impl ComplexityPoint {
    pub fn complexity(&self) -> Option<f64> {
        self.score.map(|s| s.complexity)
    }
}

/// Ordered complexity points for one (entity, scale, mode).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexitySeries {
    pub points: Vec<ComplexityPoint>,
}

impl ComplexitySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComplexityPoint> {
        self.points.iter()
    }

    pub fn last(&self) -> Option<&ComplexityPoint> {
        self.points.last()
    }

    /// `(date, complexity)` pairs, missing scores as `None`.
    pub fn complexity_values(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.points.iter().map(|p| (p.date, p.complexity()))
    }

    /// `(date, companion)` pairs for points that captured one.
    pub fn companion_values(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|p| p.companion.map(|v| (p.date, v)))
    }

    /// Number of points carrying a score.
    pub fn scored_count(&self) -> usize {
        self.points.iter().filter(|p| p.score.is_some()).count()
    }
}

/// Statistic taken from a companion series over a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanionStat {
    /// Mean of the valid values inside the window.
    Mean,
    /// Valid value at the window end date.
    Last,
}

/// A secondary series sampled alongside each complexity window.
#[derive(Debug, Clone, Copy)]
pub struct Companion<'a> {
    pub series: &'a TimeSeries,
    pub stat: CompanionStat,
}

impl<'a> Companion<'a> {
    pub fn mean(series: &'a TimeSeries) -> Self {
        Self {
            series,
            stat: CompanionStat::Mean,
        }
    }

    pub fn last(series: &'a TimeSeries) -> Self {
        Self {
            series,
            stat: CompanionStat::Last,
        }
    }

    /// Statistic over `start..=end`, `None` without valid values.
    pub fn over(&self, start: NaiveDate, end: NaiveDate) -> Option<f64> {
        match self.stat {
            CompanionStat::Mean => {
                let (sum, n) = self
                    .series
                    .range(start, end)
                    .iter()
                    .map(|p| p.value)
                    .filter(|v| v.is_finite())
                    .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
                (n > 0).then(|| sum / n as f64)
            }
            CompanionStat::Last => self.series.value_at(end),
        }
    }
}
