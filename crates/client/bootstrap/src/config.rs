//! Client configuration structures and loaders.
use std::env;
use std::str::FromStr;

use client_blockchain_core::AuthMode;
use client_blockchain_starknet::StarknetConfig;
use game_core::{GameConfig, PlayArea};
use runtime::RuntimeConfig;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid {key}={value}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("VIVI_EMAIL is set but VIVI_PASSWORD is missing")]
    MissingPassword,

    #[error("backend configuration: {0}")]
    Backend(String),
}

/// Where room advances are recorded.
#[derive(Clone, Debug)]
pub enum BackendKind {
    /// Local in-memory ledger; progress lives as long as the process.
    Offline,
    /// Game backend fronting the Starknet contracts.
    Starknet(StarknetConfig),
}

impl BackendKind {
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Offline => "offline",
            BackendKind::Starknet(_) => "starknet",
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub mode: AuthMode,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("mode", &self.mode)
            .finish()
    }
}

/// Configuration required to bootstrap a client runtime and UI.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub backend: BackendKind,
    pub credentials: Option<Credentials>,
    pub seed: Option<u64>,
    pub play_area: PlayArea,
    pub session_id: Option<String>,
    pub event_buffer_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            backend: BackendKind::Offline,
            credentials: None,
            seed: None,
            play_area: PlayArea::default(),
            session_id: None,
            event_buffer_size: runtime.event_buffer_size,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `VIVI_OFFLINE` - Play against the in-memory ledger (default: false)
    /// - `VIVI_BACKEND_URL`, `VIVI_NETWORK`, `VIVI_REQUEST_TIMEOUT_MS` - Backend settings
    /// - `VIVI_EMAIL` / `VIVI_PASSWORD` - Credentials (optional; guest play without them)
    /// - `VIVI_AUTH_MODE` - `login` or `signup` (default: login)
    /// - `VIVI_SEED` - Spawn RNG seed (default: random)
    /// - `VIVI_PLAY_WIDTH` / `VIVI_PLAY_HEIGHT` - Play area in pixels (default: 1280x720)
    /// - `VIVI_SESSION_ID` - Session identifier for logs (default: auto-generated)
    /// - `VIVI_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an explicit variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let offline = parse::<bool>(&lookup, "VIVI_OFFLINE")?.unwrap_or(false);
        if !offline {
            let starknet = StarknetConfig::from_vars(&lookup).map_err(ConfigError::Backend)?;
            config.backend = BackendKind::Starknet(starknet);
        }

        if let Some(email) = lookup("VIVI_EMAIL").filter(|email| !email.trim().is_empty()) {
            let password = lookup("VIVI_PASSWORD").ok_or(ConfigError::MissingPassword)?;
            let mode = parse::<AuthMode>(&lookup, "VIVI_AUTH_MODE")?.unwrap_or(AuthMode::Login);
            config.credentials = Some(Credentials {
                email: email.trim().to_string(),
                password,
                mode,
            });
        }

        config.seed = parse(&lookup, "VIVI_SEED")?;

        let width = parse::<f32>(&lookup, "VIVI_PLAY_WIDTH")?;
        let height = parse::<f32>(&lookup, "VIVI_PLAY_HEIGHT")?;
        let area = PlayArea::new(
            width.unwrap_or(config.play_area.width),
            height.unwrap_or(config.play_area.height),
        );
        for (key, value) in [("VIVI_PLAY_WIDTH", area.width), ("VIVI_PLAY_HEIGHT", area.height)] {
            if value.is_nan() || value < GameConfig::SPAWN_MARGIN {
                return Err(ConfigError::Invalid {
                    key,
                    value: value.to_string(),
                    reason: format!("must be at least {}", GameConfig::SPAWN_MARGIN),
                });
            }
        }
        config.play_area = area;

        config.session_id = lookup("VIVI_SESSION_ID");

        if let Some(capacity) = parse::<usize>(&lookup, "VIVI_EVENT_BUFFER")? {
            config.event_buffer_size = capacity.max(1);
        }

        Ok(config)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::default().with_play_area(self.play_area)
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            game_config: self.game_config(),
            event_buffer_size: self.event_buffer_size,
            ..RuntimeConfig::default()
        }
    }
}

fn parse<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|err: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_targets_default_backend_as_guest() {
        let config = ClientConfig::from_vars(vars(&[])).expect("defaults");

        assert!(matches!(config.backend, BackendKind::Starknet(_)));
        assert!(config.credentials.is_none());
        assert_eq!(config.seed, None);
        assert_eq!(config.play_area, PlayArea::default());
    }

    #[test]
    fn credentials_and_tunables_are_read() {
        let config = ClientConfig::from_vars(vars(&[
            ("VIVI_OFFLINE", "true"),
            ("VIVI_EMAIL", " player@example.com "),
            ("VIVI_PASSWORD", "hunter2"),
            ("VIVI_AUTH_MODE", "signup"),
            ("VIVI_SEED", "42"),
            ("VIVI_PLAY_WIDTH", "800"),
            ("VIVI_SESSION_ID", "s-1"),
        ]))
        .expect("valid vars");

        assert!(matches!(config.backend, BackendKind::Offline));
        let credentials = config.credentials.as_ref().expect("credentials");
        assert_eq!(credentials.email, "player@example.com");
        assert_eq!(credentials.mode, AuthMode::Signup);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.play_area, PlayArea::new(800.0, 720.0));
        assert_eq!(config.session_id.as_deref(), Some("s-1"));
        assert_eq!(config.game_config().play_area.width, 800.0);
        assert!(!format!("{credentials:?}").contains("hunter2"));
    }

    #[test]
    fn invalid_values_are_reported_with_their_key() {
        let err = ClientConfig::from_vars(vars(&[("VIVI_OFFLINE", "1"), ("VIVI_SEED", "x")]))
            .expect_err("bool parse fails first");
        assert!(matches!(err, ConfigError::Invalid { key: "VIVI_OFFLINE", .. }));

        let err = ClientConfig::from_vars(vars(&[
            ("VIVI_OFFLINE", "true"),
            ("VIVI_PLAY_HEIGHT", "64"),
        ]))
        .expect_err("too small");
        assert!(matches!(err, ConfigError::Invalid { key: "VIVI_PLAY_HEIGHT", .. }));

        let err = ClientConfig::from_vars(vars(&[
            ("VIVI_OFFLINE", "true"),
            ("VIVI_EMAIL", "player@example.com"),
        ]))
        .expect_err("password missing");
        assert_eq!(err, ConfigError::MissingPassword);
    }
}
