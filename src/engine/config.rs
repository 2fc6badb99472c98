//! Solver configuration.
//!
//! Defaults suit groups of a few dozen people. Lower `max_attempts` or set a
//! `step_limit` to trade thoroughness for latency: a single attempt without a
//! step limit is a full depth-first search and can take exponential time on
//! adversarial restriction graphs.
//!
//! ## Environment
//!
//! [`SolverConfig::from_env`] overlays these variables on the defaults:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `GIFT_EXCHANGE_MAX_ATTEMPTS` | `max_attempts` |
//! | `GIFT_EXCHANGE_SEED` | `seed` |
//! | `GIFT_EXCHANGE_STEP_LIMIT` | `step_limit` |
//! | `GIFT_EXCHANGE_FALLBACK` | `exhaustive_fallback` |

use std::str::FromStr;

use thiserror::Error;

/// Default restart bound
pub const DEFAULT_MAX_ATTEMPTS: u32 = 500;

/// Overrides `max_attempts`
pub const ENV_MAX_ATTEMPTS: &str = "GIFT_EXCHANGE_MAX_ATTEMPTS";
/// Overrides `seed`
pub const ENV_SEED: &str = "GIFT_EXCHANGE_SEED";
/// Overrides `step_limit`
pub const ENV_STEP_LIMIT: &str = "GIFT_EXCHANGE_STEP_LIMIT";
/// Overrides `exhaustive_fallback` (1/0, true/false, yes/no, on/off)
pub const ENV_FALLBACK: &str = "GIFT_EXCHANGE_FALLBACK";

/// Invalid solver configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("step_limit must be at least 1 when set")]
    ZeroStepLimit,

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Tuning knobs for [`MatchingEngine`](crate::engine::MatchingEngine).
///
/// ## Example
///
/// ```
/// use gift_exchange::engine::SolverConfig;
///
/// let config = SolverConfig {
///     max_attempts: 50,
///     seed: Some(7),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Randomized attempts before reporting exhaustion (at least 1)
    pub max_attempts: u32,

    /// Seed for [`MatchingEngine::draw`](crate::engine::MatchingEngine::draw);
    /// None draws from OS entropy
    pub seed: Option<u64>,

    /// Tentative commits allowed per attempt; None means unbounded
    pub step_limit: Option<u64>,

    /// Run a deterministic perfect-matching search after exhaustion
    pub exhaustive_fallback: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
            step_limit: None,
            exhaustive_fallback: false,
        }
    }
}

impl SolverConfig {
    /// Check field ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        if self.step_limit == Some(0) {
            return Err(ConfigError::ZeroStepLimit);
        }
        Ok(())
    }

    /// Defaults overlaid with `GIFT_EXCHANGE_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overlaid with values from `lookup`
    ///
    /// Unset variables keep their default; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(max_attempts) = parse_var(&lookup, ENV_MAX_ATTEMPTS)? {
            config.max_attempts = max_attempts;
        }
        if let Some(seed) = parse_var(&lookup, ENV_SEED)? {
            config.seed = Some(seed);
        }
        if let Some(step_limit) = parse_var(&lookup, ENV_STEP_LIMIT)? {
            config.step_limit = Some(step_limit);
        }
        if let Some(raw) = read_var(&lookup, ENV_FALLBACK) {
            config.exhaustive_fallback = parse_flag(&raw).ok_or(ConfigError::InvalidEnv {
                var: ENV_FALLBACK,
                value: raw,
            })?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn read_var<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match read_var(lookup, var) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value: raw }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(config.seed.is_none());
        assert!(config.step_limit.is_none());
        assert!(!config.exhaustive_fallback);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let config = SolverConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroAttempts));
    }

    #[test]
    fn test_validate_rejects_zero_step_limit() {
        let config = SolverConfig {
            step_limit: Some(0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroStepLimit));
    }

    #[test]
    fn test_from_lookup_empty_is_default() {
        let config = SolverConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, SolverConfig::default());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = SolverConfig::from_lookup(lookup_from(&[
            (ENV_MAX_ATTEMPTS, "25"),
            (ENV_SEED, " 42 "),
            (ENV_STEP_LIMIT, "1000"),
            (ENV_FALLBACK, "Yes"),
        ]))
        .unwrap();

        assert_eq!(config.max_attempts, 25);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.step_limit, Some(1000));
        assert!(config.exhaustive_fallback);
    }

    #[test]
    fn test_from_lookup_blank_values_ignored() {
        let config = SolverConfig::from_lookup(lookup_from(&[(ENV_SEED, "  ")])).unwrap();
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_from_lookup_invalid_values() {
        let err = SolverConfig::from_lookup(lookup_from(&[(ENV_MAX_ATTEMPTS, "lots")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnv {
                var: ENV_MAX_ATTEMPTS,
                value: "lots".to_string()
            }
        );

        let err = SolverConfig::from_lookup(lookup_from(&[(ENV_FALLBACK, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: ENV_FALLBACK, .. }));

        let err = SolverConfig::from_lookup(lookup_from(&[(ENV_MAX_ATTEMPTS, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroAttempts);
    }
}
