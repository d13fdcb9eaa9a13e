use uuid::Uuid;

use super::CollectionId;

/// A bounded span of page text belonging to exactly one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub id: ChunkId,
    pub collection_id: CollectionId,
    pub text: String,
    pub page: Option<u32>,
    /// Char offset of the chunk within its page text.
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(Uuid);

impl ChunkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ChunkId {
    fn default() -> Self {
        Self::new()
    }
}

impl Chunk {
    pub fn new(
        text: String,
        collection_id: CollectionId,
        page: Option<u32>,
        offset: usize,
    ) -> Self {
        Self {
            id: ChunkId::new(),
            collection_id,
            text,
            page,
            offset,
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
