use super::CollectionId;

/// An uploaded PDF on its way through ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub filename: String,
    pub size_bytes: u64,
    pub collection_id: CollectionId,
}

impl Document {
    pub fn new(filename: String, size_bytes: u64) -> Self {
        let collection_id = CollectionId::from_filename(&filename);
        Self {
            filename,
            size_bytes,
            collection_id,
        }
    }

    pub fn has_pdf_extension(&self) -> bool {
        self.filename.to_lowercase().ends_with(".pdf")
    }
}
