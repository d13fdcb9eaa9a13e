//! Candidate generation and ranking for question answering.
//!
//! Retrieval is split into two capabilities composed by [`RetrievalPipeline`]:
//! a [`ChunkRetriever`] that produces candidates from the vector store and an
//! optional [`Reranker`](crate::application::ports::Reranker) that rescores
//! them.

mod chunk_retriever;
mod multi_query_retriever;
mod pipeline;
mod vector_retriever;

pub use chunk_retriever::{ChunkRetriever, RetrievalError, dedupe_by_text};
pub use multi_query_retriever::{MultiQueryRetriever, parse_query_variants};
pub use pipeline::{RetrievalPipeline, RetrievalStrategy};
pub use vector_retriever::VectorRetriever;
