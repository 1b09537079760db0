//! Core library for the `jma` CLI.
//!
//! This crate defines:
//! - The area table (forecast centers and their offices) with its disk cache
//! - The forecast client and the decoded per-day model
//! - Static weather-code tables (emoji icons, Japanese labels)
//! - Preference handling (default office)
//!
//! It is used by `jma-cli`, but can also be reused by other binaries or services.

pub mod area;
pub mod codes;
pub mod config;
pub mod forecast;

pub use area::{AreaTable, Center, Office};
pub use config::Config;
pub use forecast::{DailyForecast, Forecast, ForecastClient};
