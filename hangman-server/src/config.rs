use anyhow::{Context, Result};
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub data_directory: PathBuf,
    pub words_directory: Option<PathBuf>,
    pub static_directory: PathBuf,
    pub session_timeout_seconds: u64,
    pub cleanup_interval_seconds: u64,
}

impl Config {
    /// Read the configuration from the environment, falling back to defaults
    pub fn new() -> Result<Self> {
        Ok(Self {
            host: env_or("HOST", "127.0.0.1")?,
            port: env_or("PORT", "8080")?,
            data_directory: env_or("DATA_DIRECTORY", "./data")?,
            words_directory: env::var("WORDS_DIRECTORY").ok().map(PathBuf::from),
            static_directory: env_or("STATIC_DIRECTORY", "./static")?,
            session_timeout_seconds: env_or("SESSION_TIMEOUT_SECONDS", "1800")?,
            cleanup_interval_seconds: env_or("CLEANUP_INTERVAL_SECONDS", "60")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
            data_directory: PathBuf::from("./data"),
            words_directory: None,
            static_directory: PathBuf::from("./static"),
            session_timeout_seconds: 1800,
            cleanup_interval_seconds: 60,
        }
    }
}

fn env_or<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value
        .parse()
        .with_context(|| format!("Invalid {}: {:?}", key, value))
}
