// Cryptoplex - Cryptoeconomic complexity analysis
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Per-entity input data keyed by entity name.

use crate::error::{CoreError, Result};
use crate::series::TimeSeries;
use std::collections::BTreeMap;

/// Input series for one tracked entity (e.g. one blockchain).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityData {
    /// Efficiency ratio, e.g. transactions per kW.
    pub ratio: TimeSeries,
    /// Optional paired magnitude series, e.g. market capitalisation.
    pub companion: Option<TimeSeries>,
}

impl EntityData {
    pub fn new(ratio: TimeSeries) -> Self {
        Self {
            ratio,
            companion: None,
        }
    }

    pub fn with_companion(mut self, companion: TimeSeries) -> Self {
        self.companion = Some(companion);
        self
    }
}

/// Entity name -> input series. Iterates in name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    entities: BTreeMap<String, EntityData>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity. Names must be unique.
    pub fn insert(&mut self, name: impl Into<String>, data: EntityData) -> Result<()> {
        let name = name.into();
        if self.entities.contains_key(&name) {
            return Err(CoreError::DuplicateEntity(name));
        }
        self.entities.insert(name, data);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&EntityData> {
        self.entities.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntityData)> {
        self.entities.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Keep only the named entities (unknown names are ignored).
    pub fn retain_names(&mut self, names: &[String]) {
        self.entities.retain(|k, _| names.iter().any(|n| n == k));
    }
}
