//! Host configuration read from the environment.
//!
//! | Variable               | Default     |
//! |------------------------|-------------|
//! | `INKPOST_HOST`         | `127.0.0.1` |
//! | `INKPOST_PORT`         | `8080`      |
//! | `INKPOST_OPEN_BROWSER` | `true`      |

use log::warn;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            open_browser: true,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Invalid values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = lookup("INKPOST_HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(raw) = lookup("INKPOST_PORT") {
            match raw.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(e) => warn!("ignoring INKPOST_PORT={raw:?}: {e}"),
            }
        }
        if let Some(raw) = lookup("INKPOST_OPEN_BROWSER") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.open_browser = true,
                "0" | "false" | "no" | "off" => config.open_browser = false,
                _ => warn!("ignoring INKPOST_OPEN_BROWSER={raw:?}"),
            }
        }
        config
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
