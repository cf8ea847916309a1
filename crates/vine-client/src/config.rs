//! Client configuration loaded from environment variables.
//!
//! All settings have defaults so the client starts with zero configuration
//! against the demo working set.

use std::path::PathBuf;

use vine_shared::constants::DEFAULT_VIEWPORT_HEIGHT;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Height of one feed item in the host's viewport, in pixels.
    /// Env: `VINE_VIEWPORT_HEIGHT`
    /// Default: `800`
    pub viewport_height: f64,

    /// Whether to start from the demo users and videos.
    /// Env: `VINE_SEED_DEMO_DATA` (true/false)
    /// Default: `true`
    pub seed_demo_data: bool,

    /// Where the current-session file lives.
    /// Env: `VINE_SESSION_PATH`
    /// Default: unset, meaning the platform data directory.
    pub session_path: Option<PathBuf>,

    /// Password accepted by the mock sign-in for every account.
    /// Env: `VINE_DEMO_PASSWORD`
    /// Default: `password123`
    pub demo_password: String,

    /// Capacity of the UI event queue between the stdin reader and the
    /// event loop.
    /// Env: `VINE_EVENT_BUFFER`
    /// Default: `64`
    pub event_buffer: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            seed_demo_data: true,
            session_path: None,
            demo_password: "password123".to_string(),
            event_buffer: 64,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = get("VINE_VIEWPORT_HEIGHT") {
            match val.trim().parse::<f64>() {
                Ok(h) if h.is_finite() && h > 0.0 => config.viewport_height = h,
                _ => tracing::warn!(value = %val, "Invalid VINE_VIEWPORT_HEIGHT, using default"),
            }
        }

        if let Some(val) = get("VINE_SEED_DEMO_DATA") {
            config.seed_demo_data = val != "false" && val != "0";
        }

        if let Some(path) = get("VINE_SESSION_PATH") {
            if !path.is_empty() {
                config.session_path = Some(PathBuf::from(path));
            }
        }

        if let Some(pw) = get("VINE_DEMO_PASSWORD") {
            if !pw.is_empty() {
                config.demo_password = pw;
            }
        }

        if let Some(val) = get("VINE_EVENT_BUFFER") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => config.event_buffer = n,
                _ => tracing::warn!(value = %val, "Invalid VINE_EVENT_BUFFER, using default"),
            }
        }

        // RUST_LOG is read by tracing-subscriber's EnvFilter directly.

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> ClientConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = from_pairs(&[]);
        assert_eq!(config.viewport_height, 800.0);
        assert!(config.seed_demo_data);
        assert!(config.session_path.is_none());
        assert_eq!(config.event_buffer, 64);
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("VINE_VIEWPORT_HEIGHT", "640"),
            ("VINE_SEED_DEMO_DATA", "0"),
            ("VINE_SESSION_PATH", "/tmp/vine/session.json"),
            ("VINE_DEMO_PASSWORD", "letmein"),
        ]);
        assert_eq!(config.viewport_height, 640.0);
        assert!(!config.seed_demo_data);
        assert_eq!(
            config.session_path,
            Some(PathBuf::from("/tmp/vine/session.json"))
        );
        assert_eq!(config.demo_password, "letmein");
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = from_pairs(&[
            ("VINE_VIEWPORT_HEIGHT", "-5"),
            ("VINE_EVENT_BUFFER", "lots"),
        ]);
        assert_eq!(config.viewport_height, 800.0);
        assert_eq!(config.event_buffer, 64);
    }
}
