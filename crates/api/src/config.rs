//! Process configuration, read from the environment.

use std::net::SocketAddr;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use pricegate_products::ApprovalPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Start with the demo catalog instead of an empty store.
    pub seed_demo_catalog: bool,
    pub policy: ApprovalPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            seed_demo_catalog: false,
            policy: ApprovalPolicy::default(),
        }
    }
}

impl ApiConfig {
    /// Read configuration from `PRICEGATE_*` variables.
    ///
    /// Unset variables fall back to defaults; the binary seeds the demo
    /// catalog unless `PRICEGATE_SEED_DEMO=false`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();
        let base = defaults.policy;

        let bind_addr = parse_or(&lookup, "PRICEGATE_BIND_ADDR", defaults.bind_addr)?;
        let seed_demo_catalog = parse_or(&lookup, "PRICEGATE_SEED_DEMO", true)?;

        let pending = parse_or(&lookup, "PRICEGATE_PENDING_THRESHOLD", base.pending_threshold())?;
        let cap = parse_or(&lookup, "PRICEGATE_HARD_CAP", base.hard_cap())?;
        let factor: Decimal =
            parse_or(&lookup, "PRICEGATE_ESCALATION_FACTOR", base.escalation_factor())?;
        let policy = ApprovalPolicy::new(pending, cap, factor).map_err(|e| ConfigError::Invalid {
            var: "approval policy",
            reason: e.message(),
        })?;

        Ok(Self {
            bind_addr,
            seed_demo_catalog,
            policy,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}
