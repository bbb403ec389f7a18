//! Startup configuration from environment variables.

use std::env;
use std::time::Duration;

use anyhow::Context;

use crate::constants::{
    DEFAULT_REGION, DEFAULT_TIMEOUT_SECS, OPEN_METEO_API_BASE, OPEN_METEO_ARCHIVE_URL,
};
use crate::region::RegionSelector;

pub const REGION_VAR: &str = "WEATHER_MCP_REGION";
pub const API_BASE_VAR: &str = "WEATHER_MCP_API_BASE";
pub const ARCHIVE_URL_VAR: &str = "WEATHER_MCP_ARCHIVE_URL";
pub const TIMEOUT_VAR: &str = "WEATHER_MCP_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub region: RegionSelector,
    pub api_base: String,
    pub archive_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let region = lookup(REGION_VAR)
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
            .parse::<RegionSelector>()
            .with_context(|| format!("invalid {REGION_VAR}"))?;

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{TIMEOUT_VAR} must be a whole number of seconds"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            region,
            api_base: lookup(API_BASE_VAR).unwrap_or_else(|| OPEN_METEO_API_BASE.to_string()),
            archive_url: lookup(ARCHIVE_URL_VAR)
                .unwrap_or_else(|| OPEN_METEO_ARCHIVE_URL.to_string()),
            timeout: Duration::from_secs(timeout),
        })
    }
}
