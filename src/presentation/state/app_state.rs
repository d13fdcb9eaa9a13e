use std::sync::Arc;

use crate::application::services::{IngestionService, QaService};
use crate::presentation::config::UploadSettings;

#[derive(Clone)]
pub struct AppState {
    pub ingestion_service: Arc<IngestionService>,
    pub qa_service: Arc<QaService>,
    pub uploads: UploadSettings,
}
