use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

use crate::tmdb::TMDB_BASE;

const DEFAULT_ADDR: &str = "0.0.0.0:3146";

#[derive(Debug, Clone)]
pub struct Config {
    pub tmdb_token: String,
    pub tmdb_base_url: String,
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source; blank values count as unset.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| var(key).filter(|s| !s.trim().is_empty());
        let tmdb_token = non_empty("TMDB_TOKEN").context("TMDB_TOKEN must be set")?;
        let tmdb_base_url = non_empty("TMDB_BASE_URL").unwrap_or_else(|| TMDB_BASE.to_string());
        let addr_raw = non_empty("CINESEARCH_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = parse_addr(&addr_raw)?;
        Ok(Self {
            tmdb_token,
            tmdb_base_url,
            addr,
        })
    }
}

fn parse_addr(raw: &str) -> Result<SocketAddr> {
    raw.trim()
        .parse()
        .with_context(|| format!("CINESEARCH_ADDR is not a valid socket address: '{}'", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_listen_address() {
        let addr = parse_addr(" 127.0.0.1:8080 ").expect("addr");
        assert_eq!(addr.port(), 8080);
        assert!(parse_addr("localhost").is_err());
    }

    #[test]
    fn missing_or_blank_token_is_rejected() {
        let none = vars(&[]);
        assert!(Config::from_vars(|k| none.get(k).cloned()).is_err());
        let blank = vars(&[("TMDB_TOKEN", "  ")]);
        let err = Config::from_vars(|k| blank.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("TMDB_TOKEN"));
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_unset() {
        let env = vars(&[("TMDB_TOKEN", "abc"), ("TMDB_BASE_URL", "")]);
        let config = Config::from_vars(|k| env.get(k).cloned()).expect("config");
        assert_eq!(config.tmdb_token, "abc");
        assert_eq!(config.tmdb_base_url, TMDB_BASE);
        assert_eq!(config.addr.port(), 3146);
    }

    #[test]
    fn overrides_are_honoured() {
        let env = vars(&[
            ("TMDB_TOKEN", "abc"),
            ("TMDB_BASE_URL", "http://127.0.0.1:9000/3"),
            ("CINESEARCH_ADDR", "127.0.0.1:8080"),
        ]);
        let config = Config::from_vars(|k| env.get(k).cloned()).expect("config");
        assert_eq!(config.tmdb_base_url, "http://127.0.0.1:9000/3");
        assert_eq!(config.addr.to_string(), "127.0.0.1:8080");
    }
}
