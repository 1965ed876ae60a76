//! Server configuration from environment variables.
//!
//! HOST, PORT, SESSION_TIMEOUT_HOURS, COMPARE_LLM_HOST, COMPARE_LLM_MODEL and
//! COMPARE_TIMEOUT_SECS. Missing or unparsable values fall back to defaults.

use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Rosters and matches untouched for this long are dropped.
    pub session_timeout: Duration,
    pub compare_host: String,
    pub compare_model: String,
    pub compare_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            session_timeout: Duration::from_secs(12 * 3600),
            compare_host: "http://127.0.0.1:11434".to_string(),
            compare_model: "llama3.2".to_string(),
            compare_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };
        let number = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            host: text("HOST", defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            session_timeout: number("SESSION_TIMEOUT_HOURS")
                .filter(|h| *h > 0)
                .map(|h| Duration::from_secs(h * 3600))
                .unwrap_or(defaults.session_timeout),
            compare_host: text("COMPARE_LLM_HOST", defaults.compare_host),
            compare_model: text("COMPARE_LLM_MODEL", defaults.compare_model),
            compare_timeout: number("COMPARE_TIMEOUT_SECS")
                .filter(|s| *s > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.compare_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]), ServerConfig::default());
    }

    #[test]
    fn values_are_read_and_parsed() {
        let cfg = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("SESSION_TIMEOUT_HOURS", "2"),
            ("COMPARE_LLM_MODEL", "mistral"),
            ("COMPARE_TIMEOUT_SECS", "5"),
        ]);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.session_timeout, Duration::from_secs(7200));
        assert_eq!(cfg.compare_model, "mistral");
        assert_eq!(cfg.compare_timeout, Duration::from_secs(5));
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let cfg = config_from(&[("PORT", "eighty"), ("SESSION_TIMEOUT_HOURS", "0"), ("HOST", "  ")]);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.session_timeout, Duration::from_secs(12 * 3600));
        assert_eq!(cfg.host, "0.0.0.0");
    }
}
