use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct PromptModesResponse {
    pub modes: Vec<String>,
}

pub async fn prompts_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(PromptModesResponse {
            modes: state.qa_service.modes(),
        }),
    )
}
