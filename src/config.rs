use dotenvy::dotenv;
use eyre::{eyre, Result};
use std::{
    env::{self, VarError},
    fmt,
    net::IpAddr,
    str::FromStr,
    time::Duration,
};
use tracing::{info, warn};

use crate::error::ApiError;

pub const DEFAULT_COVALENT_BASE_URL: &str = "https://api.covalenthq.com";
pub const DEFAULT_BITQUERY_URL: &str = "https://streaming.bitquery.io/graphql";

/// Which transaction-data integration answers `/api/volume`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Covalent,
    Bitquery,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "covalent" => Ok(Self::Covalent),
            "bitquery" => Ok(Self::Bitquery),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Covalent => f.write_str("covalent"),
            Self::Bitquery => f.write_str("bitquery"),
        }
    }
}

/// An API key captured from the environment at startup.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Missing,
    Present(String),
    /// The variable exists but is not valid unicode
    Unreadable,
}

impl Credential {
    fn from_var(value: Result<String, VarError>) -> Self {
        match value {
            Ok(v) if !v.is_empty() => Self::Present(v),
            Ok(_) | Err(VarError::NotPresent) => Self::Missing,
            Err(VarError::NotUnicode(_)) => Self::Unreadable,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Borrow the key, or fail with a configuration error naming `var`.
    pub fn require(&self, var: &str) -> Result<&str, ApiError> {
        match self {
            Self::Present(key) => Ok(key),
            Self::Missing => Err(ApiError::Config(format!("{} is not configured", var))),
            Self::Unreadable => Err(ApiError::Config(format!("{} is not valid unicode", var))),
        }
    }
}

// keys never end up in logs
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("<missing>"),
            Self::Present(_) => f.write_str("<redacted>"),
            Self::Unreadable => f.write_str("<unreadable>"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub provider: ProviderKind,
    pub covalent_api_key: Credential,
    pub covalent_base_url: String,
    pub bitquery_api_key: Credential,
    pub bitquery_url: String,
    pub upstream_timeout: Duration,
}

pub fn load() -> Result<Config> {
    dotenv().ok(); // .env is optional

    let cfg = Config::from_lookup(|key| env::var(key))?;

    info!("Loaded config: {:?}", cfg);

    Ok(cfg)
}

impl Config {
    /// Build a config from any variable source; `load` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let bind_addr = parsed_or(&lookup, "BIND_ADDR", IpAddr::from([127, 0, 0, 1]));
        let port = parsed_or(&lookup, "PORT", 8080u16);
        let provider = parsed_or(&lookup, "VOLUME_PROVIDER", ProviderKind::Covalent);
        let timeout_secs = parsed_or(&lookup, "UPSTREAM_TIMEOUT_SECS", 15u64);

        let covalent_base_url = url_or(&lookup, "COVALENT_BASE_URL", DEFAULT_COVALENT_BASE_URL)?;
        let bitquery_url = url_or(&lookup, "BITQUERY_URL", DEFAULT_BITQUERY_URL)?;

        Ok(Config {
            bind_addr,
            port,
            provider,
            covalent_api_key: Credential::from_var(lookup("COVALENT_API_KEY")),
            covalent_base_url,
            bitquery_api_key: Credential::from_var(lookup("BITQUERY_API_KEY")),
            bitquery_url,
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parsed_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Result<String, VarError>,
    T: FromStr + fmt::Display,
{
    match lookup(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
        _ => default,
    }
}

fn url_or<F>(lookup: &F, key: &str, default: &str) -> Result<String>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let raw = lookup(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string());

    reqwest::Url::parse(raw.trim()).map_err(|e| eyre!("{} is not a valid URL ({}): {}", key, raw, e))?;

    Ok(raw.trim().trim_end_matches('/').to_string())
}
