// Cryptoplex Complexity - Emergence and self-organization scoring
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! State distributions and the emergence / self-organization / complexity
//! triple.
//!
//! Emergence is Shannon entropy normalized by its maximum for the number of
//! occupied states, `E = -(1 / log2 n) * sum(p_i log2 p_i)`. Self-organization
//! is `S = 1 - E`, and complexity `C = 4 E S` peaks at `E = 0.5`.

use cryptoplex::StateLabel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Occurrence counts per state, indexed by label ordinal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateCounts {
    counts: Vec<u64>,
    total: u64,
}

impl StateCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the non-missing states of a window.
    pub fn from_states<'a, I>(states: I) -> Self
    where
        I: IntoIterator<Item = &'a Option<StateLabel>>,
    {
        let mut counts = Self::new();
        for state in states.into_iter().flatten() {
            counts.add(*state);
        }
        counts
    }

    pub fn add(&mut self, label: StateLabel) {
        let idx = label.index();
        if idx >= self.counts.len() {
            self.counts.resize(idx + 1, 0);
        }
        self.counts[idx] += 1;
        self.total += 1;
    }

    pub fn get(&self, label: StateLabel) -> u64 {
        self.counts.get(label.index()).copied().unwrap_or(0)
    }

    /// Number of counted (non-missing) observations.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Relative frequencies, iterating labels in ordinal order.
    pub fn distribution(&self) -> StateDistribution {
        if self.total == 0 {
            return StateDistribution::default();
        }
        let n = self.total as f64;
        let probabilities = self
            .counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(i, c)| (StateLabel(i), *c as f64 / n))
            .collect();
        StateDistribution { probabilities }
    }
}

/// Relative frequency per occupied state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDistribution {
    probabilities: BTreeMap<StateLabel, f64>,
}

impl StateDistribution {
    /// Distribution of the non-missing states of a window.
    pub fn from_states<'a, I>(states: I) -> Self
    where
        I: IntoIterator<Item = &'a Option<StateLabel>>,
    {
        StateCounts::from_states(states).distribution()
    }

    /// Wrap probabilities built elsewhere. Entries are kept as given; the
    /// scorer ignores zero and non-finite ones.
    pub fn from_probabilities<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (StateLabel, f64)>,
    {
        Self {
            probabilities: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, label: StateLabel) -> Option<f64> {
        self.probabilities.get(&label).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateLabel, f64)> + '_ {
        self.probabilities.iter().map(|(k, v)| (*k, *v))
    }

    /// Number of entries (occupied states when built from counts).
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }
}

/// Emergence, self-organization and complexity of one distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityScore {
    pub emergence: f64,
    pub self_organization: f64,
    pub complexity: f64,
}

impl ComplexityScore {
    /// Compose the triple from an emergence value in [0, 1].
    pub fn from_emergence(emergence: f64) -> Self {
        let self_organization = 1.0 - emergence;
        Self {
            emergence,
            self_organization,
            complexity: 4.0 * emergence * self_organization,
        }
    }
}

/// Normalized Shannon entropy of the occupied states.
///
/// Returns `None` for an empty distribution and `0.0` when a single state
/// is occupied.
pub fn emergence(distribution: &StateDistribution) -> Option<f64> {
    let occupied: Vec<f64> = distribution
        .iter()
        .map(|(_, p)| p)
        .filter(|p| p.is_finite() && *p > 0.0)
        .collect();

    match occupied.len() {
        0 => None,
        1 => Some(0.0),
        n => {
            let k = 1.0 / (n as f64).log2();
            let h: f64 = occupied.iter().map(|p| p * p.log2()).sum();
            Some((-k * h).clamp(0.0, 1.0))
        }
    }
}

/// Score a distribution. `None` marks a window without valid observations.
pub fn score(distribution: &StateDistribution) -> Option<ComplexityScore> {
    emergence(distribution).map(ComplexityScore::from_emergence)
}

/// Score the non-missing states of a window.
pub fn score_states<'a, I>(states: I) -> Option<ComplexityScore>
where
    I: IntoIterator<Item = &'a Option<StateLabel>>,
{
    score(&StateDistribution::from_states(states))
}
