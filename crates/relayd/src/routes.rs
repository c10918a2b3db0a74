//! API routes for relayd.
//!
//! Each flow gets its own router group, merged in `server::run`. Handlers
//! build a prompt, call the hosted model or the enrichment service, clean
//! the response, and return typed JSON. Upstream failures surface as 502,
//! unusable model output as 422.

use crate::enrichment::EnrichmentError;
use crate::llm::{ChatMessage, LlmError, SYSTEM_PROMPT};
use crate::prompts;
use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use relay_common::{
    cleanup, parse_prospects, EnrichRequest, HealthResponse, IcpParamsRequest, IcpRequest,
    IcpResponse, ImageRequest, ImageResponse, OrgSearchRequest, PeopleSearchRequest,
    ProspectsRequest, ProspectsResponse, SearchParams, SettingsResponse, TripRequest,
    TripResponse,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

type AppStateArc = Arc<AppState>;

/// Largest prospect list a single request may ask the model for.
const MAX_PROSPECT_COUNT: usize = 50;

/// Image size the generation flow requests.
const IMAGE_SIZE: &str = "1024x1024";

fn upstream_llm_error(e: LlmError) -> (StatusCode, String) {
    error!("LLM call failed: {}", e);
    (StatusCode::BAD_GATEWAY, e.to_string())
}

fn upstream_enrichment_error(e: EnrichmentError) -> (StatusCode, String) {
    error!("Enrichment call failed: {}", e);
    (StatusCode::BAD_GATEWAY, e.to_string())
}

// ============================================================================
// ICP Routes
// ============================================================================

pub fn icp_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/icp", post(generate_icp))
        .route("/v1/icp/params", post(extract_icp_params))
}

/// Generate an Ideal Customer Profile for a company website.
async fn generate_icp(
    State(state): State<AppStateArc>,
    Json(req): Json<IcpRequest>,
) -> Result<Json<IcpResponse>, (StatusCode, String)> {
    let website = req.website.trim();
    if website.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "website is required".to_string()));
    }

    info!("[ICP] Generating profile for {}", website);

    let messages = [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(prompts::build_icp_prompt(website)),
    ];
    let raw = state
        .llm
        .chat(&state.config.llm.chat_model, &messages, 0.1, Some(1500))
        .await
        .map_err(upstream_llm_error)?;

    Ok(Json(IcpResponse { raw }))
}

/// Extract structured search parameters from ICP text.
async fn extract_icp_params(
    State(state): State<AppStateArc>,
    Json(req): Json<IcpParamsRequest>,
) -> Result<Json<SearchParams>, (StatusCode, String)> {
    info!("[ICP] Extracting search params ({} chars of context)", req.content.len());

    let messages = [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(prompts::build_params_prompt(&req.content)),
    ];
    let raw = state
        .llm
        .chat(&state.config.llm.chat_model, &messages, 0.1, Some(1500))
        .await
        .map_err(upstream_llm_error)?;

    let cleaned = cleanup::clean_object_output(&raw);
    let params: SearchParams = serde_json::from_str(&cleaned).map_err(|e| {
        error!("[ICP] Unusable params JSON from model: {}", e);
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Model output was not valid parameter JSON: {}", e),
        )
    })?;

    Ok(Json(params))
}

// ============================================================================
// Enrichment Relay Routes
// ============================================================================

pub fn enrichment_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/orgs/search", post(search_organizations))
        .route("/v1/people/search", post(search_people))
        .route("/v1/enrich", post(enrich_profiles))
}

async fn search_organizations(
    State(state): State<AppStateArc>,
    Json(req): Json<OrgSearchRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    info!("[ENRICH] Organization search ({} keyword tags)", req.q_organization_keyword_tags.len());
    let value = state
        .enrichment
        .search_organizations(&req)
        .await
        .map_err(upstream_enrichment_error)?;
    Ok(Json(value))
}

async fn search_people(
    State(state): State<AppStateArc>,
    Json(req): Json<PeopleSearchRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    info!("[ENRICH] People search ({} titles)", req.person_titles.len());
    let value = state
        .enrichment
        .search_people(&req)
        .await
        .map_err(upstream_enrichment_error)?;
    Ok(Json(value))
}

async fn enrich_profiles(
    State(state): State<AppStateArc>,
    Json(req): Json<EnrichRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    if req.linkedin_urls.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "linkedin_urls is required".to_string()));
    }
    info!("[ENRICH] Enriching {} profiles", req.linkedin_urls.len());
    let value = state
        .enrichment
        .enrich(&req)
        .await
        .map_err(upstream_enrichment_error)?;
    Ok(Json(value))
}

// ============================================================================
// Prospect Routes
// ============================================================================

pub fn prospect_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/prospects", post(discover_prospects))
}

/// Discover prospects matching an ICP via the model, then clean and
/// validate the returned JSON array.
async fn discover_prospects(
    State(state): State<AppStateArc>,
    Json(req): Json<ProspectsRequest>,
) -> Result<Json<ProspectsResponse>, (StatusCode, String)> {
    if req.icp_text.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "icp_text is required".to_string()));
    }
    if req.count == 0 || req.count > MAX_PROSPECT_COUNT {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("count must be between 1 and {}", MAX_PROSPECT_COUNT),
        ));
    }

    info!("[PROSPECTS] Discovering {} prospects", req.count);

    let messages = [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(prompts::build_prospects_prompt(&req.icp_text, req.count)),
    ];
    let raw = state
        .llm
        .chat(&state.config.llm.chat_model, &messages, 0.2, Some(2000))
        .await
        .map_err(upstream_llm_error)?;

    let prospects = parse_prospects(&raw, req.count).map_err(|e| {
        error!("[PROSPECTS] Unusable prospect JSON from model: {}", e);
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    })?;

    info!("[PROSPECTS] Parsed {} prospects", prospects.len());
    Ok(Json(ProspectsResponse { prospects }))
}

// ============================================================================
// Trip Routes
// ============================================================================

pub fn trip_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/trip-plan", post(generate_trip_plan))
}

async fn generate_trip_plan(
    State(state): State<AppStateArc>,
    Json(req): Json<TripRequest>,
) -> Result<Json<TripResponse>, (StatusCode, String)> {
    if !req.is_complete() {
        return Err((StatusCode::BAD_REQUEST, "All fields are required".to_string()));
    }

    info!("[TRIP] Planning {} -> {}", req.origin, req.cities.join(", "));

    let messages = [
        ChatMessage::system(prompts::TRIP_SYSTEM_PROMPT),
        ChatMessage::user(prompts::build_trip_prompt(
            &req.origin,
            &req.cities,
            &req.date_range,
            &req.interests,
        )),
    ];
    let trip_plan = state
        .llm
        .chat(&state.config.llm.chat_model, &messages, 0.7, None)
        .await
        .map_err(upstream_llm_error)?;

    Ok(Json(TripResponse { trip_plan }))
}

// ============================================================================
// Image Routes
// ============================================================================

pub fn image_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/image", post(generate_image))
}

async fn generate_image(
    State(state): State<AppStateArc>,
    Json(req): Json<ImageRequest>,
) -> Result<Json<ImageResponse>, (StatusCode, String)> {
    if req.prompt.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "prompt is required".to_string()));
    }

    let prompt = prompts::build_image_prompt(&req.prompt, req.reference_note.as_deref());
    info!("[IMAGE] Generating image ({} char prompt)", prompt.len());

    let url = state
        .llm
        .generate_image(&state.config.llm.image_model, &prompt, IMAGE_SIZE)
        .await
        .map_err(upstream_llm_error)?;

    Ok(Json(ImageResponse { url }))
}

// ============================================================================
// Meta Routes
// ============================================================================

pub fn meta_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", get(root))
        .route("/v1/health", get(health_check))
        .route("/v1/settings", get(get_settings))
}

async fn root(State(state): State<AppStateArc>) -> Json<Value> {
    Json(serde_json::json!({
        "message": format!("Welcome to the {} API", state.config.server.title)
    }))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    let llm_available = state.llm.is_available().await;
    Json(HealthResponse {
        status: if llm_available { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        llm_available,
    })
}

async fn get_settings(State(state): State<AppStateArc>) -> Json<SettingsResponse> {
    Json(SettingsResponse {
        title: state.config.server.title.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        debug: state.config.server.debug,
    })
}
