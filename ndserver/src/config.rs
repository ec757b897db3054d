//! Server configuration, deserialized with `serde` the way a bundle or
//! project manifest would be. The network transport and wire format
//! are out of scope here; `bind_addr` exists only so a future real
//! transport has somewhere to read its listen address from.

use serde::{Deserialize, Serialize};

fn default_bind_addr() -> String {
    "127.0.0.1:5555".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Process-wide configuration, deserialized once at startup (e.g. from
/// a TOML file or environment) and threaded through explicitly rather
/// than held as a static.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Default `max_bits` applied to a `BigInt` array created without an
    /// explicit width. `None` means unbounded by default.
    #[serde(default)]
    pub default_max_bits: Option<u32>,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: default_bind_addr(),
            default_max_bits: None,
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind_addr, "127.0.0.1:5555");
        assert_eq!(cfg.default_max_bits, None);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg = ServerConfig::from_toml_str("default_max_bits = 64\n").unwrap();
        assert_eq!(cfg.default_max_bits, Some(64));
        assert_eq!(cfg.bind_addr, "127.0.0.1:5555");
    }
}
