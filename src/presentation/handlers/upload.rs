use std::path::{Path, PathBuf};

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::FileLoaderError;
use crate::application::services::IngestionError;
use crate::domain::ValidationReport;
use crate::presentation::handlers::error::error_response;
use crate::presentation::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub collection_name: String,
    pub validation: ValidationReport,
}

#[derive(Serialize)]
pub struct RejectedUploadResponse {
    pub error: String,
    pub validation: ValidationReport,
}

struct UploadedFile {
    filename: String,
    data: Vec<u8>,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler(State(state): State<AppState>, multipart: Multipart) -> Response {
    let upload = match read_file_field(multipart, state.uploads.max_upload_size_bytes).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };

    let Some(basename) = Path::new(&upload.filename)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
    else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid file name");
    };

    if !basename.to_lowercase().ends_with(".pdf") {
        tracing::warn!(filename = %basename, "Rejected non-PDF upload");
        return error_response(StatusCode::BAD_REQUEST, "Only PDF files are accepted");
    }

    let staged_path = match stage(&state.uploads.dir, &basename, &upload.data).await {
        Ok(path) => path,
        Err(e) => {
            tracing::error!(error = %e, "Failed to stage upload");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to store upload: {e}"),
            );
        }
    };

    tracing::debug!(path = %staged_path.display(), bytes = upload.data.len(), "Upload staged");

    match state.ingestion_service.ingest_file(&staged_path).await {
        Ok(report) => {
            tracing::info!(
                collection_id = %report.collection_id,
                chunks = report.chunk_count,
                "Upload ingested"
            );
            (
                StatusCode::OK,
                Json(UploadResponse {
                    message: format!(
                        "Processed {} page(s) into {} chunk(s)",
                        report.page_count, report.chunk_count
                    ),
                    collection_name: report.collection_id.to_string(),
                    validation: report.validation,
                }),
            )
                .into_response()
        }
        Err(IngestionError::Rejected(validation)) => (
            StatusCode::BAD_REQUEST,
            Json(RejectedUploadResponse {
                error: "The uploaded document does not appear to be a legal document".to_string(),
                validation,
            }),
        )
            .into_response(),
        Err(IngestionError::FileLoading(e @ FileLoaderError::UnsupportedFile(_))) => {
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "Ingestion failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Ingestion failed: {e}"),
            )
        }
    }
}

async fn read_file_field(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<UploadedFile, Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                tracing::warn!("Upload request with no file");
                return Err(error_response(StatusCode::BAD_REQUEST, "No file uploaded"));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return Err(error_response(
                    e.status(),
                    format!("Failed to read multipart: {e}"),
                ));
            }
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = match field.file_name() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => return Err(error_response(StatusCode::BAD_REQUEST, "No file selected")),
        };

        let data = field.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read file bytes");
            error_response(e.status(), format!("Failed to read file: {e}"))
        })?;

        if data.len() > max_bytes {
            return Err(error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("File exceeds the {max_bytes} byte upload limit"),
            ));
        }

        return Ok(UploadedFile {
            filename,
            data: data.to_vec(),
        });
    }
}

async fn stage(dir: &str, basename: &str, data: &[u8]) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = Path::new(dir).join(basename);
    tokio::fs::write(&path, data).await?;
    Ok(path)
}
