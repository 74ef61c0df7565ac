use crate::error::ServerResult;
use crate::extract::ApiJson;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use matcher::NameMatch;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name search request
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Name as the guest typed it
    #[serde(default)]
    pub name: String,
}

/// Name search response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    /// Matching display names, best first
    pub matches: Vec<String>,
    /// Best match; the name to sign in with
    pub resolved: String,
    /// More than one name matched
    pub ambiguous: bool,
    /// Score and category per match, same order as `matches`
    pub scored: Vec<NameMatch>,
}

/// Resolve a typed name against the guest directory
pub async fn search_names(
    State(state): State<Arc<ServerState>>,
    ApiJson(request): ApiJson<SearchRequest>,
) -> ServerResult<impl IntoResponse> {
    let lookup = state.sign_in.resolve_name(&request.name)?;

    Ok(Json(SearchResponse {
        query: lookup.query,
        matches: lookup.candidates,
        resolved: lookup.display_name,
        ambiguous: lookup.ambiguous,
        scored: lookup.scored,
    }))
}
