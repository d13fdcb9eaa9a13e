use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::QaError;
use crate::domain::{Answer, CollectionId};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::handlers::error::error_response;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct AskRagRequest {
    pub question: String,
    pub collection_name: String,
    #[serde(default)]
    pub prompt_type: Option<String>,
}

#[derive(Deserialize)]
pub struct AskDirectRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub sources: Vec<SourceResponse>,
}

#[derive(Serialize)]
pub struct SourceResponse {
    pub content: String,
    pub page: Option<u32>,
}

impl From<Answer> for AnswerResponse {
    fn from(answer: Answer) -> Self {
        Self {
            answer: answer.text,
            sources: answer
                .sources
                .into_iter()
                .map(|s| SourceResponse {
                    content: s.content,
                    page: s.page,
                })
                .collect(),
        }
    }
}

#[tracing::instrument(skip(state, payload))]
pub async fn ask_rag_handler(
    State(state): State<AppState>,
    payload: Result<Json<AskRagRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return bad_json(rejection),
    };

    if request.question.trim().is_empty() || request.collection_name.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing question or collection_name",
        );
    }

    tracing::debug!(
        question = %sanitize_prompt(&request.question),
        collection = %request.collection_name,
        prompt_type = ?request.prompt_type,
        "Processing RAG question"
    );

    let collection = CollectionId::from_raw(request.collection_name.trim());
    match state
        .qa_service
        .ask_with_context(
            &request.question,
            &collection,
            request.prompt_type.as_deref(),
        )
        .await
    {
        Ok(answer) => (StatusCode::OK, Json(AnswerResponse::from(answer))).into_response(),
        Err(e) => qa_error(e),
    }
}

#[tracing::instrument(skip(state, payload))]
pub async fn ask_direct_handler(
    State(state): State<AppState>,
    payload: Result<Json<AskDirectRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return bad_json(rejection),
    };

    if request.question.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Missing question");
    }

    tracing::debug!(question = %sanitize_prompt(&request.question), "Processing direct question");

    match state.qa_service.ask_direct(&request.question).await {
        Ok(answer) => (StatusCode::OK, Json(AnswerResponse::from(answer))).into_response(),
        Err(e) => qa_error(e),
    }
}

fn bad_json(rejection: JsonRejection) -> Response {
    tracing::warn!(error = %rejection.body_text(), "Malformed request body");
    error_response(StatusCode::BAD_REQUEST, rejection.body_text())
}

fn qa_error(e: QaError) -> Response {
    if e.is_collection_not_found() {
        tracing::warn!(error = %e, "Unknown collection");
        return error_response(StatusCode::NOT_FOUND, e.to_string());
    }
    tracing::error!(error = %e, "Question answering failed");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("An error occurred: {e}"),
    )
}
