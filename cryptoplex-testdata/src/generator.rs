// Cryptoplex Testdata - Synthetic panel generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Seeded generation of daily transactions-per-kW series.
//!
//! Each entity follows a slow exponential drift modulated by a periodic
//! regime cycle, with multiplicative log-normal noise. A market-cap companion
//! tracks the same level with its own coupling exponent. Random cells are
//! left missing and random dates are dropped from the index entirely.

use chrono::{Days, NaiveDate};
use cryptoplex::{CoreError, EntityData, Panel, Result, TimeSeries};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::LogNormal;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Shape of one synthetic entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityProfile {
    /// Entity name, e.g. "Bitcoin".
    pub name: String,
    /// Ratio level on the first day.
    pub base_ratio: f64,
    /// Log growth of the level per year.
    pub drift_per_year: f64,
    /// Relative amplitude of the regime cycle.
    pub regime_amplitude: f64,
    /// Regime cycle length in days.
    pub regime_period_days: f64,
    /// Sigma of the log-normal noise.
    pub volatility: f64,
    /// Market cap on the first day. `None` disables the companion.
    pub base_market_cap: Option<f64>,
    /// Exponent linking market cap to the ratio level.
    pub cap_coupling: f64,
}

impl EntityProfile {
    pub fn new(name: &str, base_ratio: f64) -> Self {
        Self {
            name: name.to_string(),
            base_ratio,
            drift_per_year: 0.3,
            regime_amplitude: 0.4,
            regime_period_days: 365.0,
            volatility: 0.25,
            base_market_cap: None,
            cap_coupling: 1.0,
        }
    }

    pub fn with_drift(mut self, drift_per_year: f64) -> Self {
        self.drift_per_year = drift_per_year;
        self
    }

    pub fn with_regime(mut self, amplitude: f64, period_days: f64) -> Self {
        self.regime_amplitude = amplitude;
        self.regime_period_days = period_days;
        self
    }

    pub fn with_volatility(mut self, sigma: f64) -> Self {
        self.volatility = sigma;
        self
    }

    pub fn with_market_cap(mut self, base: f64, coupling: f64) -> Self {
        self.base_market_cap = Some(base);
        self.cap_coupling = coupling;
        self
    }

    /// Noise-free ratio level `day` days after the start.
    pub fn level(&self, day: usize) -> f64 {
        let t = day as f64;
        let trend = (self.drift_per_year * t / 365.25).exp();
        let cycle = 1.0 + self.regime_amplitude * (TAU * t / self.regime_period_days).sin();
        self.base_ratio * trend * cycle
    }
}

/// Bitcoin-like profile: low ratio, strong cap coupling.
pub fn bitcoin_profile() -> EntityProfile {
    EntityProfile::new("Bitcoin", 4.0)
        .with_drift(0.25)
        .with_regime(0.5, 1461.0)
        .with_market_cap(1.5e11, 1.2)
}

/// Ethereum-like profile: higher ratio, faster regimes.
pub fn ethereum_profile() -> EntityProfile {
    EntityProfile::new("Ethereum", 40.0)
        .with_drift(0.6)
        .with_regime(0.35, 540.0)
        .with_volatility(0.3)
        .with_market_cap(4.0e10, 0.9)
}

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticConfig {
    /// First calendar date.
    pub start: NaiveDate,
    /// Number of calendar days covered.
    pub days: usize,
    /// Random seed for reproducibility.
    pub seed: u64,
    /// Probability that a present cell holds a missing value.
    pub missing_rate: f64,
    /// Probability that a date is absent from an entity's index.
    pub absent_rate: f64,
    pub entities: Vec<EntityProfile>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or(NaiveDate::MIN),
            days: 1461,
            seed: 42,
            missing_rate: 0.02,
            absent_rate: 0.005,
            entities: vec![bitcoin_profile(), ethereum_profile()],
        }
    }
}

impl SyntheticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_days(mut self, days: usize) -> Self {
        self.days = days;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    pub fn with_entities(mut self, entities: Vec<EntityProfile>) -> Self {
        self.entities = entities;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [
            ("missing_rate", self.missing_rate),
            ("absent_rate", self.absent_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(CoreError::InvalidParameter {
                    name,
                    reason: format!("{} is not a probability", rate),
                });
            }
        }
        for profile in &self.entities {
            if !(profile.volatility.is_finite() && profile.volatility >= 0.0) {
                return Err(CoreError::InvalidParameter {
                    name: "volatility",
                    reason: format!("{} has volatility {}", profile.name, profile.volatility),
                });
            }
            if profile.regime_period_days <= 0.0 {
                return Err(CoreError::InvalidParameter {
                    name: "regime_period_days",
                    reason: format!("{} needs a positive regime period", profile.name),
                });
            }
        }
        Ok(())
    }
}

fn noise(sigma: f64) -> Result<LogNormal<f64>> {
    LogNormal::new(0.0, sigma).map_err(|e| CoreError::InvalidParameter {
        name: "volatility",
        reason: e.to_string(),
    })
}

/// Generate one entity from a shared random stream.
pub fn generate_entity<R: Rng + ?Sized>(
    profile: &EntityProfile,
    config: &SyntheticConfig,
    rng: &mut R,
) -> Result<EntityData> {
    let ratio_noise = noise(profile.volatility)?;
    let cap_noise = noise(profile.volatility / 2.0)?;

    let mut ratio = TimeSeries::new();
    let mut caps = TimeSeries::new();

    for day in 0..config.days {
        let Some(date) = config.start.checked_add_days(Days::new(day as u64)) else {
            break;
        };
        if rng.gen_bool(config.absent_rate) {
            continue;
        }

        let level = profile.level(day).max(f64::MIN_POSITIVE);
        let value = if rng.gen_bool(config.missing_rate) {
            f64::NAN
        } else {
            level * ratio_noise.sample(rng)
        };
        ratio.push(date, value)?;

        if let Some(base_cap) = profile.base_market_cap {
            let relative = level / profile.base_ratio;
            let cap = if rng.gen_bool(config.missing_rate) {
                f64::NAN
            } else {
                base_cap * relative.powf(profile.cap_coupling) * cap_noise.sample(rng)
            };
            caps.push(date, cap)?;
        }
    }

    let data = EntityData::new(ratio);
    Ok(match profile.base_market_cap {
        Some(_) => data.with_companion(caps),
        None => data,
    })
}

/// Generate a panel with every configured entity.
///
/// The same configuration always yields the same panel.
pub fn generate_panel(config: &SyntheticConfig) -> Result<Panel> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut panel = Panel::new();
    for profile in &config.entities {
        let data = generate_entity(profile, config, &mut rng)?;
        panel.insert(profile.name.clone(), data)?;
    }
    Ok(panel)
}
