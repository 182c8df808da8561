use order_connector_core::{parse_chain_id, validate_address};
use thiserror::Error;

pub const ENV_PROFILE: &str = "ORDER_CONNECTOR_PROFILE";
pub const ENV_PROXY_URL: &str = "ORDER_CONNECTOR_EIP1193_PROXY_URL";
pub const ENV_TIMEOUT_MS: &str = "ORDER_CONNECTOR_TIMEOUT_MS";
pub const ENV_DEV_ACCOUNTS: &str = "ORDER_CONNECTOR_DEV_ACCOUNTS";
pub const ENV_DEV_CHAIN_ID: &str = "ORDER_CONNECTOR_DEV_CHAIN_ID";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeProfile {
    #[default]
    Development,
    Production,
}

impl RuntimeProfile {
    /// Production never falls back to the deterministic signer.
    pub fn strict_runtime_required(self) -> bool {
        matches!(self, RuntimeProfile::Production)
    }
}

#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    pub runtime_profile: RuntimeProfile,
    pub eip1193_proxy_url: Option<String>,
    pub request_timeout_ms: u64,
    pub dev_accounts: Vec<String>,
    pub dev_chain_id: String,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            runtime_profile: RuntimeProfile::Development,
            eip1193_proxy_url: None,
            request_timeout_ms: 15_000,
            dev_accounts: vec!["0x1000000000000000000000000000000000000001".to_owned()],
            dev_chain_id: "0x1".to_owned(),
        }
    }
}

impl ConnectorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(raw) = lookup(ENV_PROFILE) {
            cfg.runtime_profile = match raw.trim().to_ascii_lowercase().as_str() {
                "development" | "dev" => RuntimeProfile::Development,
                "production" | "prod" => RuntimeProfile::Production,
                other => {
                    return Err(ConfigError::Invalid {
                        key: ENV_PROFILE,
                        reason: format!("unknown profile {other}"),
                    })
                }
            };
        }

        cfg.eip1193_proxy_url = lookup(ENV_PROXY_URL)
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            cfg.request_timeout_ms = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                key: ENV_TIMEOUT_MS,
                reason: format!("{e}"),
            })?;
        }

        if let Some(raw) = lookup(ENV_DEV_ACCOUNTS) {
            let accounts: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect();
            for account in &accounts {
                validate_address(account).map_err(|e| ConfigError::Invalid {
                    key: ENV_DEV_ACCOUNTS,
                    reason: e.to_string(),
                })?;
            }
            cfg.dev_accounts = accounts;
        }

        if let Some(raw) = lookup(ENV_DEV_CHAIN_ID) {
            let raw = raw.trim().to_owned();
            parse_chain_id(&raw).map_err(|e| ConfigError::Invalid {
                key: ENV_DEV_CHAIN_ID,
                reason: e.to_string(),
            })?;
            cfg.dev_chain_id = raw;
        }

        Ok(cfg)
    }

    pub fn strict_runtime_required(&self) -> bool {
        self.runtime_profile.strict_runtime_required()
    }
}
