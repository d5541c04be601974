// Cryptoplex Testdata - Synthetic datasets
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Cryptoplex Testdata
//!
//! Reproducible synthetic blockchain efficiency data and master-table CSV
//! I/O for the Cryptoplex ecosystem.
//!
//! - **Generator**: seeded daily transactions-per-kW series with regime
//!   drift, log-normal noise, missing cells and absent dates, plus a
//!   correlated market-cap companion
//! - **Dataset**: the `Date` / `<Entity> Transactions per kW` /
//!   `<entity>_market_cap` CSV layout and its conversion to a panel
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cryptoplex_testdata::{generate_panel, Dataset, SyntheticConfig};
//!
//! let config = SyntheticConfig::new().with_days(730).with_seed(42);
//! let panel = generate_panel(&config).unwrap();
//!
//! Dataset::from_panel(&panel).to_csv("master.csv").unwrap();
//! ```

pub mod dataset;
pub mod generator;

pub use dataset::{market_cap_column, ratio_column, Dataset, DatasetError, DatasetRow};
pub use generator::{
    bitcoin_profile, ethereum_profile, generate_entity, generate_panel, EntityProfile,
    SyntheticConfig,
};
