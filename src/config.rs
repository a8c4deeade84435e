use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::voyager::DEFAULT_BASE_URL;

#[derive(Debug, Clone)]
pub struct Config {
    /// Session credential for the explorer. Optional at startup so the server
    /// can boot without it; requests that need it get a 500 with a hint.
    pub voyager_api_key: Option<String>,
    pub voyager_base_url: String,
    pub http_bind_addr: String,
    pub fetch_timeout: Duration,
    pub request_deadline: Duration,
    pub state_path: PathBuf,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?} is not a whole number of seconds")]
    InvalidSeconds { name: &'static str, value: String },
    #[error("invalid VOYAGER_BASE_URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let voyager_api_key = env::var("VOYAGER_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let voyager_base_url =
            env::var("VOYAGER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        url::Url::parse(&voyager_base_url)?;

        let http_bind_addr = env::var("HTTP_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let fetch_timeout = seconds_var("FETCH_TIMEOUT_SECS", 15)?;
        let request_deadline = seconds_var("REQUEST_DEADLINE_SECS", 60)?;
        let state_path = env::var("STATE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/wrapped-state.json"));

        Ok(Self {
            voyager_api_key,
            voyager_base_url,
            http_bind_addr,
            fetch_timeout,
            request_deadline,
            state_path,
        })
    }
}

fn seconds_var(name: &'static str, default: u64) -> Result<Duration, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidSeconds { name, value: raw }),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}
