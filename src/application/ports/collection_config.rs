/// Shape of a chunk collection. Vectors are always compared by cosine
/// similarity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionConfig {
    pub vector_dimensions: u64,
    /// Integer payload fields that get a filterable index.
    pub integer_indexes: Vec<String>,
}

impl CollectionConfig {
    /// Chunks are cited by page, so the page number is indexed.
    pub fn for_chunks(vector_dimensions: u64) -> Self {
        Self {
            vector_dimensions,
            integer_indexes: vec!["page".to_string()],
        }
    }
}
