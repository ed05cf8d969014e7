//! Starknet backend configuration.

use std::env;
use std::time::Duration;

use client_blockchain_core::LedgerConfig;
use strum::{Display, EnumString};

/// Starknet network the backend executes calls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StarknetNetwork {
    Mainnet,
    Sepolia,
}

impl StarknetNetwork {
    pub fn as_str(&self) -> &'static str {
        match self {
            StarknetNetwork::Mainnet => "mainnet",
            StarknetNetwork::Sepolia => "sepolia",
        }
    }
}

/// Backend-specific configuration.
#[derive(Debug, Clone)]
pub struct StarknetConfig {
    /// Base URL of the game backend (no trailing slash)
    pub backend_url: String,

    /// Network passed through to `/api/external`
    pub network: StarknetNetwork,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl StarknetConfig {
    pub const DEFAULT_BACKEND_URL: &'static str = "http://localhost:3000";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
            network: StarknetNetwork::Sepolia,
            request_timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `VIVI_BACKEND_URL` - Backend base URL (default: http://localhost:3000)
    /// - `VIVI_NETWORK` - Network name (mainnet, sepolia) (default: sepolia)
    /// - `VIVI_REQUEST_TIMEOUT_MS` - Per-request timeout (default: 30000)
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an explicit variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let backend_url =
            lookup("VIVI_BACKEND_URL").unwrap_or_else(|| Self::DEFAULT_BACKEND_URL.to_string());

        let network = match lookup("VIVI_NETWORK") {
            Some(raw) => raw.parse::<StarknetNetwork>().map_err(|_| {
                format!(
                    "Invalid VIVI_NETWORK: {}. Must be mainnet or sepolia",
                    raw
                )
            })?,
            None => StarknetNetwork::Sepolia,
        };

        let request_timeout = lookup("VIVI_REQUEST_TIMEOUT_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Self::DEFAULT_TIMEOUT);

        Ok(Self::new(backend_url)
            .with_network(network)
            .with_request_timeout(request_timeout))
    }

    pub fn with_network(mut self, network: StarknetNetwork) -> Self {
        self.network = network;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.backend_url, path)
    }
}

impl LedgerConfig for StarknetConfig {
    fn network_name(&self) -> &str {
        self.network.as_str()
    }

    fn endpoint(&self) -> &str {
        &self.backend_url
    }

    fn validate(&self) -> Result<(), String> {
        let url = &self.backend_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!("Invalid backend URL format: {}", url));
        }

        if self.request_timeout.is_zero() {
            return Err("Request timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Default for StarknetConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BACKEND_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = StarknetConfig::new("https://vivi.example/");
        assert_eq!(config.url("/api/vivi"), "https://vivi.example/api/vivi");
    }

    #[test]
    fn validate_rejects_bad_urls_and_zero_timeouts() {
        assert!(StarknetConfig::default().validate().is_ok());
        assert!(StarknetConfig::new("vivi.example").validate().is_err());
        assert!(
            StarknetConfig::default()
                .with_request_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn network_parses_case_insensitively() {
        assert_eq!("SEPOLIA".parse::<StarknetNetwork>(), Ok(StarknetNetwork::Sepolia));
        assert!("goerli".parse::<StarknetNetwork>().is_err());
        assert_eq!(StarknetNetwork::Mainnet.to_string(), "mainnet");
    }

    #[test]
    fn vars_fill_in_defaults() {
        let config = StarknetConfig::from_vars(|key| match key {
            "VIVI_NETWORK" => Some("mainnet".into()),
            "VIVI_REQUEST_TIMEOUT_MS" => Some("1500".into()),
            _ => None,
        })
        .expect("valid vars");

        assert_eq!(config.backend_url, StarknetConfig::DEFAULT_BACKEND_URL);
        assert_eq!(config.network, StarknetNetwork::Mainnet);
        assert_eq!(config.request_timeout, Duration::from_millis(1500));

        assert!(StarknetConfig::from_vars(|key| (key == "VIVI_NETWORK").then(|| "goerli".into())).is_err());
    }
}
