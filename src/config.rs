use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::locale::Locale;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CERT_DIR: &str = "/app/certificates";

/// Runtime settings, all optional and read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub fetch_timeout: Duration,
    pub locale: Locale,
    pub cert_dir: PathBuf,
    pub tls_host_cert: Option<String>,
    pub tls_host_key: Option<String>,
    pub tls_ca_cert: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            locale: Locale::En,
            cert_dir: PathBuf::from(DEFAULT_CERT_DIR),
            tls_host_cert: None,
            tls_host_key: None,
            tls_ca_cert: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let host = match get("HOST") {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|e| ConfigError::invalid("HOST", &raw, e.to_string()))?,
            None => defaults.host,
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid("PORT", &raw, e.to_string()))?,
            None => defaults.port,
        };

        let fetch_timeout = match get("FETCH_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::invalid("FETCH_TIMEOUT_SECS", &raw, e.to_string()))?;
                if secs == 0 {
                    return Err(ConfigError::invalid(
                        "FETCH_TIMEOUT_SECS",
                        &raw,
                        "timeout must be at least one second",
                    ));
                }
                Duration::from_secs(secs)
            }
            None => defaults.fetch_timeout,
        };

        let locale = match get("SEO_LOCALE") {
            Some(raw) => Locale::from_tag(&raw)
                .ok_or_else(|| ConfigError::invalid("SEO_LOCALE", &raw, "expected 'en' or 'zh-TW'"))?,
            None => defaults.locale,
        };

        Ok(Self {
            host,
            port,
            fetch_timeout,
            locale,
            cert_dir: get("CERT_DIR").map(PathBuf::from).unwrap_or(defaults.cert_dir),
            tls_host_cert: get("TLS_HOST_CERT"),
            tls_host_key: get("TLS_HOST_KEY"),
            tls_ca_cert: get("TLS_CA_CERT"),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
