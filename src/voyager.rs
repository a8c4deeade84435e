use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, COOKIE, PRAGMA, REFERER,
    USER_AGENT,
};
use serde::de::DeserializeOwned;

use crate::models::{ContractMeta, TxPage};

pub const DEFAULT_BASE_URL: &str = "https://voyager.online/api";

/// Upper bound on how much of an upstream error body ends up in the error.
const BODY_EXCERPT_LEN: usize = 300;

#[derive(thiserror::Error, Debug)]
pub enum UpstreamError {
    #[error("voyager returned {status} for {path}: {body}")]
    Status {
        status: u16,
        path: String,
        body: String,
    },
    #[error("voyager request failed for {path}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("voyager sent malformed JSON for {path}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

/// The slice of the explorer API the aggregator needs. Tests drive the
/// aggregator with an in-memory implementation instead of the real service.
#[async_trait]
pub trait Explorer: Send + Sync {
    async fn contract(&self, address: &str) -> Result<ContractMeta, UpstreamError>;

    async fn transactions(
        &self,
        address: &str,
        page: u32,
        page_size: u32,
    ) -> Result<TxPage, UpstreamError>;
}

/// HTTP client for the Voyager explorer. The service fronts its API with
/// browser-shaped checks, so every request carries a fixed browser header set
/// plus the configured session cookie. No retries here; callers decide.
#[derive(Clone)]
pub struct VoyagerClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl VoyagerClient {
    pub fn new(base_url: &str, api_key: &str, fetch_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .default_headers(static_headers())
            .timeout(fetch_timeout)
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        let res = self
            .http
            .get(&url)
            .header(COOKIE, format!("cf_clearance={}", self.api_key))
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                path: path.to_string(),
                source,
            })?;

        let status = res.status();
        if !status.is_success() {
            let body = excerpt(&res.text().await.unwrap_or_default());
            // The credential stays out of the error itself; log it here so an
            // operator can tell an expired cookie from a broken upstream.
            tracing::error!(
                status = status.as_u16(),
                path,
                api_key = %self.api_key,
                "voyager request rejected"
            );
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                path: path.to_string(),
                body,
            });
        }

        res.json::<T>().await.map_err(|source| UpstreamError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl Explorer for VoyagerClient {
    async fn contract(&self, address: &str) -> Result<ContractMeta, UpstreamError> {
        self.fetch_json(&format!("/contracts/{address}")).await
    }

    async fn transactions(
        &self,
        address: &str,
        page: u32,
        page_size: u32,
    ) -> Result<TxPage, UpstreamError> {
        self.fetch_json(&format!("/txns?to={address}&p={page}&ps={page_size}"))
            .await
    }
}

fn static_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB,en;q=0.9"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(REFERER, HeaderValue::from_static("https://voyager.online/"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/141.0.0.0 Safari/537.36",
        ),
    );
    headers
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_LEN).collect()
}
