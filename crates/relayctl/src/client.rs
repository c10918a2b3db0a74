//! HTTP client for talking to a running relayd.

use anyhow::{bail, Context, Result};
use relay_common::{
    HealthResponse, IcpParamsRequest, IcpRequest, IcpResponse, ImageRequest, ImageResponse,
    ProspectsRequest, ProspectsResponse, SearchParams, TripRequest, TripResponse,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:7892";

const BASE_URL_ENV: &str = "RELAYD_URL";

pub struct RelaydClient {
    http: reqwest::Client,
    base_url: String,
}

impl RelaydClient {
    /// Resolve the daemon base URL.
    ///
    /// Priority:
    /// 1. Explicit --url flag
    /// 2. $RELAYD_URL environment variable
    /// 3. http://127.0.0.1:7892 (default)
    pub fn discover_base_url(explicit: Option<&str>) -> String {
        if let Some(url) = explicit {
            return url.trim_end_matches('/').to_string();
        }
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            return url.trim_end_matches('/').to_string();
        }
        DEFAULT_BASE_URL.to_string()
    }

    pub fn new(base_url: String) -> Result<Self> {
        // Generation flows can take a while; give the model room.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(180))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, base_url })
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("relayd unreachable at {}", self.base_url))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("relayd returned {}: {}", status, detail);
        }
        response.json().await.context("invalid response from relayd")
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/v1/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("relayd unreachable at {}", self.base_url))?;
        response.json().await.context("invalid health response")
    }

    pub async fn generate_icp(&self, website: &str) -> Result<IcpResponse> {
        self.post(
            "/v1/icp",
            &IcpRequest {
                website: website.to_string(),
            },
        )
        .await
    }

    pub async fn extract_params(&self, content: &str) -> Result<SearchParams> {
        self.post(
            "/v1/icp/params",
            &IcpParamsRequest {
                content: content.to_string(),
            },
        )
        .await
    }

    pub async fn discover_prospects(&self, icp_text: &str, count: usize) -> Result<ProspectsResponse> {
        self.post(
            "/v1/prospects",
            &ProspectsRequest {
                icp_text: icp_text.to_string(),
                count,
            },
        )
        .await
    }

    pub async fn trip_plan(&self, req: &TripRequest) -> Result<TripResponse> {
        self.post("/v1/trip-plan", req).await
    }

    pub async fn generate_image(&self, prompt: &str, reference_note: Option<String>) -> Result<ImageResponse> {
        self.post(
            "/v1/image",
            &ImageRequest {
                prompt: prompt.to_string(),
                reference_note,
            },
        )
        .await
    }
}
