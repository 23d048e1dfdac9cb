//! Runtime configuration read from the environment.

use std::net::SocketAddr;

use anyhow::Context;
use chrono::NaiveDate;

use crate::app::Clock;

pub const BIND_ADDR_ENV: &str = "LABSTOCK_BIND_ADDR";
pub const TODAY_ENV: &str = "LABSTOCK_TODAY";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub clock: Clock,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (used by `from_env` and tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("{BIND_ADDR_ENV} is not a socket address: {bind_addr}"))?;

        // Pinning "today" is meant for demos against fixed data sets.
        let clock = match lookup(TODAY_ENV) {
            Some(raw) if !raw.trim().is_empty() => {
                let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .with_context(|| format!("{TODAY_ENV} must be YYYY-MM-DD, got {raw}"))?;
                Clock::Fixed(date)
            }
            _ => Clock::System,
        };

        Ok(Self { bind_addr, clock })
    }
}
