use std::collections::BTreeMap;
use std::path::Path;

use crate::application::ports::{TemplateEntry, TemplateProvider, TemplateRegistryError};

/// Prompt modes loaded once from a JSON object of
/// `{"mode": {"prompt_template": "...", "description": "..."}}`.
#[derive(Debug, Default)]
pub struct JsonTemplateRegistry {
    entries: BTreeMap<String, TemplateEntry>,
}

impl JsonTemplateRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A missing file yields an empty registry. An unreadable or malformed
    /// file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateRegistryError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Prompt template file not found, no prompt modes registered"
            );
            return Ok(Self::empty());
        }

        let contents =
            std::fs::read_to_string(path).map_err(|e| TemplateRegistryError::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let registry = Self::from_json(&contents).map_err(|e| TemplateRegistryError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::info!(
            path = %path.display(),
            modes = registry.entries.len(),
            "Prompt templates loaded"
        );
        Ok(registry)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: BTreeMap<String, TemplateEntry> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }
}

impl TemplateProvider for JsonTemplateRegistry {
    fn lookup(&self, mode: &str) -> Option<&TemplateEntry> {
        self.entries.get(mode)
    }

    fn modes(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
