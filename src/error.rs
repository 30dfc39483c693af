//! Error types for the cache
//!
//! Cache operations themselves never fail; only configuration loading does.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache crate.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CacheError {
    /// A configuration variable could not be parsed
    #[error("Invalid value for {var}: {value:?}")]
    InvalidConfig { var: &'static str, value: String },

    /// The sweep interval was configured as zero
    #[error("Sweep interval must be greater than zero")]
    ZeroSweepInterval,
}

// == Result Type Alias ==
/// Convenience Result type for the cache crate.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = CacheError::InvalidConfig {
            var: "SWEEP_INTERVAL_MS",
            value: "soon".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for SWEEP_INTERVAL_MS: \"soon\"");
    }

    #[test]
    fn test_zero_interval_message() {
        assert!(CacheError::ZeroSweepInterval.to_string().contains("greater than zero"));
    }
}
