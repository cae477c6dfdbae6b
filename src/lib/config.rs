use std::{
    path::Path,
    time::Duration,
};

use alloy::primitives::{
    Address,
    B256,
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    flow::FlowConfig,
    tracker::TrackerConfig,
};

/// Chain id of the Arc testnet.
pub const ARC_CHAIN_ID: u64 = 5042002;

/// Default block explorer for transaction links.
pub const ARC_EXPLORER_URL: &str = "https://testnet.arcscan.app";

fn default_proof_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(2)
}

fn default_confirmation_timeout() -> Duration {
    Duration::from_secs(120)
}

fn default_confirmation_depth() -> u64 {
    1
}

/// Client configuration loaded from TOML.
#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    /// HTTP RPC endpoint.
    pub rpc_url: String,
    /// Deployed ConfidentialTransferHelper address.
    pub helper_address: Address,
    /// Block explorer base URL. Falls back to [`ARC_EXPLORER_URL`].
    pub explorer_url: Option<String>,
    /// Bounded wait for proof generation (e.g. "30s"). Parsed via humantime.
    #[serde(with = "humantime_serde", default = "default_proof_timeout")]
    pub proof_timeout: Duration,
    /// Interval between receipt queries.
    #[serde(with = "humantime_serde", default = "default_poll_interval")]
    pub poll_interval: Duration,
    /// Bounded polling horizon for confirmation.
    #[serde(with = "humantime_serde", default = "default_confirmation_timeout")]
    pub confirmation_timeout: Duration,
    /// Blocks on top of inclusion before a transaction counts as final.
    #[serde(default = "default_confirmation_depth")]
    pub confirmation_depth: u64,
}

/// Errors from config loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

impl ClientConfig {
    /// Load and validate a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc_url.trim().is_empty() {
            return Err(ConfigError::Validation("rpc_url must not be empty".into()));
        }
        if self.helper_address == Address::ZERO {
            return Err(ConfigError::Validation(
                "helper_address must not be the zero address".into(),
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::Validation(
                "poll_interval must be positive".into(),
            ));
        }
        if self.confirmation_timeout < self.poll_interval {
            return Err(ConfigError::Validation(
                "confirmation_timeout must be at least poll_interval".into(),
            ));
        }
        if self.confirmation_depth == 0 {
            return Err(ConfigError::Validation(
                "confirmation_depth must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Explorer link for a transaction hash.
    pub fn tx_url(&self, tx_hash: B256) -> String {
        let base = self.explorer_url.as_deref().unwrap_or(ARC_EXPLORER_URL);
        format!("{base}/tx/{tx_hash}")
    }

    /// Flow knobs derived from this config.
    pub fn flow_config(&self) -> FlowConfig {
        FlowConfig {
            helper_address: self.helper_address,
            proof_timeout: self.proof_timeout,
            tracker: TrackerConfig {
                poll_interval: self.poll_interval,
                confirmation_timeout: self.confirmation_timeout,
            },
        }
    }
}
