//! Client for the third-party prospect enrichment service.
//!
//! Organization search, people search, and LinkedIn profile enrichment are
//! all thin relays: the service's JSON comes back verbatim as
//! `serde_json::Value`. Authentication is a bearer token from the
//! environment; the service base URL comes from config.

use relay_common::{EnrichRequest, OrgSearchRequest, PeopleSearchRequest};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Page size the upstream search endpoints expect.
const SEARCH_PAGE_SIZE: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("Enrichment request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Enrichment service error {status}")]
    Api { status: u16 },
}

/// Enrichment service client.
pub struct EnrichmentClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl EnrichmentClient {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, EnrichmentError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("prompt-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn post(&self, endpoint: &str, payload: &Value) -> Result<Value, EnrichmentError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Enrichment POST {}", url);

        let mut builder = self.http.post(&url).json(payload);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EnrichmentError::Api { status: status.as_u16() });
        }

        Ok(response.json().await?)
    }

    /// Search organizations matching location/size/keyword criteria.
    pub async fn search_organizations(&self, req: &OrgSearchRequest) -> Result<Value, EnrichmentError> {
        let payload = json!({
            "organization_locations": req.organization_locations,
            "organization_num_employees_ranges": req.organization_num_employees_ranges,
            "q_organization_keyword_tags": req.q_organization_keyword_tags,
            "per_page": SEARCH_PAGE_SIZE,
            "page": 1,
        });
        self.post("/api/apollo-api-orgs", &payload).await
    }

    /// Search people by title within previously found organizations.
    pub async fn search_people(&self, req: &PeopleSearchRequest) -> Result<Value, EnrichmentError> {
        let payload = json!({
            "person_titles": req.person_titles,
            "contact_email_status": req.contact_email_status,
            "organization_ids": req.organization_ids,
            "q_organization_domains": req.q_organization_domains,
        });
        self.post("/api/apollo-api", &payload).await
    }

    /// Enrich LinkedIn profile URLs with contact details.
    pub async fn enrich(&self, req: &EnrichRequest) -> Result<Value, EnrichmentError> {
        let payload = json!({ "linkedin_urls": req.linkedin_urls });
        self.post("/api/enrichment-api", &payload).await
    }
}
