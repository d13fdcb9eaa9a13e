/// A registry entry describing a prompt mode.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct TemplateEntry {
    pub prompt_template: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Read-only lookup of prompt modes by name.
pub trait TemplateProvider: Send + Sync {
    fn lookup(&self, mode: &str) -> Option<&TemplateEntry>;

    fn modes(&self) -> Vec<String>;
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateRegistryError {
    #[error("failed to read template registry {path}: {message}")]
    Read { path: String, message: String },
    #[error("failed to parse template registry {path}: {message}")]
    Parse { path: String, message: String },
}
