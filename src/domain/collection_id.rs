use std::fmt;
use std::path::Path;

use sha2::{Digest, Sha256};

const COLLECTION_PREFIX: &str = "legal_case_";
const HASH_PREFIX_LEN: usize = 10;

/// Name of the vector-store partition holding one ingested document.
///
/// Derived from the basename of the uploaded file, so re-uploading a file with
/// the same name always lands in the same collection. Two different files that
/// share a name collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionId(String);

impl CollectionId {
    pub fn from_filename(filename: &str) -> Self {
        let basename = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(filename);

        let digest = hex::encode(Sha256::digest(basename.as_bytes()));
        Self(format!("{COLLECTION_PREFIX}{}", &digest[..HASH_PREFIX_LEN]))
    }

    /// Wraps an id received from a client. No format check is made; unknown
    /// ids surface as "collection not found" at lookup time.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
