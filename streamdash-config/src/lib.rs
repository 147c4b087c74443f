//! Configuration for the streamdash dashboard.
//!
//! [`ConfigLoader`] resolves a [`DashboardConfig`] from, in order: an
//! explicit path, `$STREAMDASH_CONFIG_PATH`, inline `$STREAMDASH_CONFIG_JSON`,
//! the first default file found, or built-in defaults. Individual
//! `STREAMDASH_*` variables are layered on top and the result is checked
//! against the guard rails in [`validation`].

#![allow(missing_docs)]

pub mod duration;
pub mod error;
pub mod loader;
pub mod models;
pub mod validation;

pub use error::ConfigLoadError;
pub use loader::{ConfigLoad, ConfigLoader};
pub use models::{
    ConfigOverrides, ConfigSource, DashboardConfig, PollerSettings,
    ServerSettings,
};
pub use validation::ConfigGuardRailError;
