use crate::error::ServerResult;
use crate::sessions::Session;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use guestlist::{Event, Guest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Home page links; none are built yet.
const ACTIONS: [(&str, &str); 3] = [
    ("RSVP", "/api/v1/rsvp"),
    ("Schedule", "/api/v1/schedule"),
    ("Gift", "/api/v1/gift"),
];

#[derive(Debug, Serialize, Deserialize)]
pub struct HomeAction {
    pub name: String,
    pub path: String,
    pub coming_soon: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HomeResponse {
    pub greeting: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wedding: Option<String>,
    pub full_name: String,
    pub actions: Vec<HomeAction>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub guest: String,
    pub events: Vec<Event>,
}

/// Placeholder home page for the signed-in guest
pub async fn home(
    State(state): State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
) -> ServerResult<impl IntoResponse> {
    let directory = state.sign_in.directory();
    let name = directory
        .guest(&session.user_key)
        .map(greeting_name)
        .unwrap_or_else(|| session.user.full_name.clone());

    Ok(Json(HomeResponse {
        greeting: format!("Welcome, {name}!"),
        wedding: directory.name().map(str::to_string),
        full_name: session.user.full_name,
        actions: ACTIONS
            .iter()
            .map(|(name, path)| HomeAction {
                name: name.to_string(),
                path: path.to_string(),
                coming_soon: true,
            })
            .collect(),
    }))
}

/// Events the signed-in guest is invited to, earliest first
pub async fn schedule(
    State(state): State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
) -> ServerResult<impl IntoResponse> {
    let events = state
        .sign_in
        .directory()
        .events_for_guest(&session.user_key)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ScheduleResponse {
        guest: session.user_key,
        events,
    }))
}

fn greeting_name(guest: &Guest) -> String {
    guest
        .nickname
        .clone()
        .unwrap_or_else(|| guest.first.clone())
}
