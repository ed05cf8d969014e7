//! Frontend configuration structures and loaders.
//!
//! UI-specific settings shared across frontend implementations.

use std::env;
use std::time::Duration;

/// Frontend-specific configuration.
#[derive(Clone, Debug)]
pub struct FrontendConfig {
    pub messages: MessageConfig,
    /// Input polling and redraw period.
    pub frame_interval: Duration,
    /// Show the controls help panel until the player first moves.
    pub show_controls_help: bool,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            messages: MessageConfig::default(),
            frame_interval: Duration::from_millis(16),
            show_controls_help: true,
        }
    }
}

impl FrontendConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `VIVI_MESSAGE_CAPACITY` - Message log capacity (default: 64)
    /// - `VIVI_MESSAGE_LIMIT` - Messages shown at once (default: 6)
    /// - `VIVI_FRAME_MS` - Frame interval in milliseconds (default: 16)
    /// - `VIVI_SHOW_HELP` - Show the controls help panel (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("VIVI_MESSAGE_CAPACITY") {
            config.messages.capacity = capacity.max(1);
        }
        if let Some(limit) = read_env::<usize>("VIVI_MESSAGE_LIMIT") {
            config.messages.visible = limit;
        }
        if let Some(frame_ms) = read_env::<u64>("VIVI_FRAME_MS") {
            config.frame_interval = Duration::from_millis(frame_ms.max(1));
        }
        if let Some(show) = read_env_bool("VIVI_SHOW_HELP") {
            config.show_controls_help = show;
        }

        config
    }
}

#[derive(Clone, Debug)]
pub struct MessageConfig {
    pub capacity: usize,
    pub visible: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            capacity: 64,
            visible: 6,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    parse_bool(&env::var(key).ok()?)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
