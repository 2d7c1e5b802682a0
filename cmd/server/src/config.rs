//! Server configuration from environment variables and CLI flags.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;

/// Insecure development fallback. Always set `API_KEY` in production.
pub const DEFAULT_API_KEY: &str = "sk_voice_detection_12345_secret";

/// Default bind port when neither `--addr` nor `PORT` is given.
pub const DEFAULT_PORT: u16 = 8000;

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret compared against the `x-api-key` header.
    pub api_key: String,
    /// Bind address.
    pub addr: SocketAddr,
    /// Directory holding the classifier and scaler artifacts.
    pub models_dir: PathBuf,
    /// True when running on the built-in development key.
    pub default_key: bool,
}

impl Config {
    /// Resolves configuration. Precedence: CLI flag, then environment,
    /// then default.
    pub fn resolve(addr_flag: Option<&str>, models_dir: PathBuf) -> Result<Self> {
        let (api_key, default_key) = match std::env::var("API_KEY") {
            Ok(key) if !key.is_empty() => (key, false),
            _ => (DEFAULT_API_KEY.to_string(), true),
        };

        let addr = match addr_flag {
            Some(addr) => parse_addr(addr)?,
            None => {
                let port = match std::env::var("PORT") {
                    Ok(port) => port.parse()?,
                    Err(_) => DEFAULT_PORT,
                };
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        Ok(Self {
            api_key,
            addr,
            models_dir,
            default_key,
        })
    }
}

/// Parses an address string to a SocketAddr. A bare `:port` binds all
/// interfaces.
fn parse_addr(addr: &str) -> Result<SocketAddr> {
    let addr = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };
    Ok(addr.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_addr_bare_port() {
        let addr = parse_addr(":9000").unwrap();
        assert_eq!(addr.port(), 9000);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn test_parse_addr_full() {
        let addr = parse_addr("127.0.0.1:8000").unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8000");
    }

    #[test]
    fn test_parse_addr_invalid() {
        assert!(parse_addr("not-an-addr").is_err());
    }
}
