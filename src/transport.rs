use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Url;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::WikiConfig;
use crate::util::render_query;

pub type QueryParams = Vec<(String, String)>;

/// Sends one API request and returns the decoded JSON document.
pub trait Transport {
    fn send(&self, language: &str, params: &[(String, String)]) -> Result<Value>;
}

pub struct HttpTransport {
    client: Client,
    config: WikiConfig,
}

impl HttpTransport {
    pub fn new(config: &WikiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .context("failed to build MediaWiki HTTP client")?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, language: &str, params: &[(String, String)]) -> Result<Value> {
        let api_url = self.config.api_url(language);
        let base_url =
            Url::parse(&api_url).with_context(|| format!("invalid MediaWiki API URL: {api_url}"))?;

        let mut pairs = params.to_vec();
        pairs.push(("format".to_string(), "json".to_string()));
        pairs.push(("redirects".to_string(), "1".to_string()));

        debug!(url = %base_url, query = %render_query(&pairs), "sending MediaWiki request");

        let response = self
            .client
            .get(base_url)
            .header("User-Agent", self.config.user_agent.clone())
            .query(&pairs)
            .send()
            .context("failed to call MediaWiki API")?;

        let status = response.status();
        if !status.is_success() {
            bail!("MediaWiki API request failed with HTTP {status}");
        }

        let payload: Value = response
            .json()
            .context("failed to decode MediaWiki API JSON response")?;
        if let Some(error) = payload.get("error") {
            let code = error
                .get("code")
                .and_then(Value::as_str)
                .unwrap_or("unknown_error");
            let info = error
                .get("info")
                .and_then(Value::as_str)
                .unwrap_or("unknown info");
            bail!("MediaWiki API error [{code}]: {info}");
        }

        Ok(payload)
    }
}
