//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::error::{CacheError, Result};

/// How reads treat entries whose TTL has elapsed but which the sweeper has
/// not removed yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    /// Expired entries read as absent, even before they are swept.
    #[default]
    Strict,
    /// Presence in the table is enough; expired values are returned until
    /// the next sweep removes them.
    Lazy,
}

impl FromStr for Freshness {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Freshness::Strict),
            "lazy" => Ok(Freshness::Lazy),
            _ => Err(CacheError::InvalidConfig {
                var: "CACHE_FRESHNESS",
                value: s.to_string(),
            }),
        }
    }
}

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Time between two background sweeps
    pub sweep_interval: Duration,
    /// TTL applied by `Cache::load_default`
    pub default_ttl: Duration,
    /// Read policy for expired-but-unswept entries
    pub freshness: Freshness,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SWEEP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 1000)
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 10000)
    /// - `CACHE_FRESHNESS` - `strict` or `lazy` (default: strict)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    ///
    /// Missing variables fall back to defaults; present but malformed ones
    /// are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let sweep_interval = match lookup("SWEEP_INTERVAL_MS") {
            Some(raw) => Duration::from_millis(parse_millis("SWEEP_INTERVAL_MS", &raw)?),
            None => defaults.sweep_interval,
        };
        if sweep_interval.is_zero() {
            return Err(CacheError::ZeroSweepInterval);
        }

        let default_ttl = match lookup("DEFAULT_TTL_MS") {
            Some(raw) => Duration::from_millis(parse_millis("DEFAULT_TTL_MS", &raw)?),
            None => defaults.default_ttl,
        };

        let freshness = match lookup("CACHE_FRESHNESS") {
            Some(raw) => raw.parse()?,
            None => defaults.freshness,
        };

        Ok(Self {
            sweep_interval,
            default_ttl,
            freshness,
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_secs(1),
            default_ttl: Duration::from_secs(10),
            freshness: Freshness::Strict,
        }
    }
}

fn parse_millis(var: &'static str, raw: &str) -> Result<u64> {
    raw.trim().parse().map_err(|_| CacheError::InvalidConfig {
        var,
        value: raw.to_string(),
    })
}
