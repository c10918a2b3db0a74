//! Wire types for the relayd HTTP API.

use crate::prospects::Prospect;
use serde::{Deserialize, Serialize};

// ============================================================================
// ICP generation
// ============================================================================

/// Request to generate an Ideal Customer Profile for a company website.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcpRequest {
    pub website: String,
}

/// The generated ICP, raw markdown text from the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcpResponse {
    pub raw: String,
}

/// Request to extract search parameters from previously generated ICP text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcpParamsRequest {
    pub content: String,
}

/// Search parameters the model extracts from ICP text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub organization_locations: Vec<String>,
    #[serde(default)]
    pub organization_num_employees_ranges: Vec<String>,
    #[serde(default)]
    pub person_titles: Vec<String>,
    #[serde(default)]
    pub q_organization_keyword_tags: Vec<String>,
}

// ============================================================================
// Enrichment relay
// ============================================================================

/// Organization search forwarded to the enrichment service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgSearchRequest {
    pub organization_locations: Vec<String>,
    pub organization_num_employees_ranges: Vec<String>,
    pub q_organization_keyword_tags: Vec<String>,
}

/// People search forwarded to the enrichment service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeopleSearchRequest {
    pub person_titles: Vec<String>,
    pub contact_email_status: Vec<String>,
    pub organization_ids: Vec<String>,
    pub q_organization_domains: String,
}

/// LinkedIn profile enrichment forwarded to the enrichment service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichRequest {
    pub linkedin_urls: Vec<String>,
}

// ============================================================================
// Prospect discovery
// ============================================================================

/// Request to discover prospects matching an ICP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProspectsRequest {
    pub icp_text: String,

    /// How many prospects to ask the model for.
    #[serde(default = "default_prospect_count")]
    pub count: usize,
}

pub fn default_prospect_count() -> usize {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProspectsResponse {
    pub prospects: Vec<Prospect>,
}

// ============================================================================
// Trip planning
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    pub origin: String,
    pub cities: Vec<String>,
    pub date_range: String,
    pub interests: String,
}

impl TripRequest {
    /// All fields are required; an empty one means a malformed request.
    pub fn is_complete(&self) -> bool {
        !self.origin.trim().is_empty()
            && !self.cities.is_empty()
            && self.cities.iter().all(|c| !c.trim().is_empty())
            && !self.date_range.trim().is_empty()
            && !self.interests.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripResponse {
    pub trip_plan: String,
}

// ============================================================================
// Image generation
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,

    /// Appended to the prompt when the caller has a reference image on hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    pub url: String,
}

// ============================================================================
// Service meta
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub llm_available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub title: String,
    pub version: String,
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prospects_request_default_count() {
        let req: ProspectsRequest = serde_json::from_str(r#"{"icp_text": "fintech CTOs"}"#).unwrap();
        assert_eq!(req.count, 10);
    }

    #[test]
    fn test_trip_request_completeness() {
        let req = TripRequest {
            origin: "Oslo".to_string(),
            cities: vec!["Lisbon".to_string(), "Porto".to_string()],
            date_range: "2026-09-01 to 2026-09-08".to_string(),
            interests: "food, architecture".to_string(),
        };
        assert!(req.is_complete());

        let empty_city = TripRequest {
            cities: vec!["".to_string()],
            ..req.clone()
        };
        assert!(!empty_city.is_complete());

        let no_interests = TripRequest {
            interests: "  ".to_string(),
            ..req
        };
        assert!(!no_interests.is_complete());
    }

    #[test]
    fn test_search_params_tolerates_missing_fields() {
        let params: SearchParams = serde_json::from_str(r#"{"person_titles": ["CTO"]}"#).unwrap();
        assert_eq!(params.person_titles, vec!["CTO"]);
        assert!(params.organization_locations.is_empty());
    }

    #[test]
    fn test_image_request_reference_note_optional() {
        let req: ImageRequest = serde_json::from_str(r#"{"prompt": "a lighthouse"}"#).unwrap();
        assert!(req.reference_note.is_none());
    }
}
