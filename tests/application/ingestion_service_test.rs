use std::sync::Arc;

use lexcase::application::ports::{VectorStore, VectorStoreError};
use lexcase::application::services::{IngestionError, IngestionService};
use lexcase::domain::CollectionId;
use lexcase::infrastructure::persistence::InMemoryVectorStore;
use lexcase::infrastructure::text_processing::SlidingWindowSplitter;

use crate::helpers::{
    FakeFileLoader, HashEmbedder, LEGAL_TEXT, TEST_DIMENSIONS, UpsertFailingStore,
};

fn service(store: Arc<InMemoryVectorStore>) -> IngestionService {
    IngestionService::new(
        Arc::new(FakeFileLoader),
        Arc::new(HashEmbedder),
        store,
        Arc::new(SlidingWindowSplitter::new(60, 10).unwrap()),
        TEST_DIMENSIONS as u64,
    )
}

#[tokio::test]
async fn given_legal_document_when_ingesting_then_stores_chunks_under_filename_id() {
    let store = Arc::new(InMemoryVectorStore::new());
    let data = format!("{LEGAL_TEXT}\u{c}The appeal is dismissed with costs.");

    let report = service(Arc::clone(&store))
        .ingest(data.as_bytes(), "case.pdf".to_string())
        .await
        .unwrap();

    assert_eq!(report.collection_id, CollectionId::from_filename("case.pdf"));
    assert_eq!(report.page_count, 2);
    assert!(report.chunk_count >= 2);
    assert!(report.validation.is_valid);
    assert_eq!(
        store.point_count(&report.collection_id).await,
        Some(report.chunk_count)
    );
}

#[tokio::test]
async fn given_same_file_ingested_twice_when_storing_then_old_chunks_are_replaced() {
    let store = Arc::new(InMemoryVectorStore::new());
    let service = service(Arc::clone(&store));

    let first = service
        .ingest(LEGAL_TEXT.as_bytes(), "case.pdf".to_string())
        .await
        .unwrap();
    let second = service
        .ingest(LEGAL_TEXT.as_bytes(), "case.pdf".to_string())
        .await
        .unwrap();

    assert_eq!(first.collection_id, second.collection_id);
    assert_eq!(
        store.point_count(&second.collection_id).await,
        Some(second.chunk_count)
    );
}

#[tokio::test]
async fn given_non_legal_document_when_ingesting_then_rejected_and_nothing_stored() {
    let store = Arc::new(InMemoryVectorStore::new());

    let result = service(Arc::clone(&store))
        .ingest(b"Grocery list: milk, eggs, flour.", "groceries.pdf".to_string())
        .await;

    match result {
        Err(IngestionError::Rejected(report)) => assert!(!report.is_valid),
        other => panic!("expected rejection, got {other:?}"),
    }
    let id = CollectionId::from_filename("groceries.pdf");
    assert!(!store.collection_exists(&id).await.unwrap());
}

#[tokio::test]
async fn given_rejected_staged_file_when_ingesting_from_disk_then_file_is_removed() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("notes.pdf");
    std::fs::write(&path, "Shopping notes and weekend plans.").unwrap();

    let result = service(Arc::new(InMemoryVectorStore::new()))
        .ingest_file(&path)
        .await;

    assert!(matches!(result, Err(IngestionError::Rejected(_))));
    assert!(!path.exists());
}

#[tokio::test]
async fn given_accepted_staged_file_when_ingesting_from_disk_then_file_is_kept() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("case.pdf");
    std::fs::write(&path, LEGAL_TEXT).unwrap();

    let report = service(Arc::new(InMemoryVectorStore::new()))
        .ingest_file(&path)
        .await
        .unwrap();

    assert_eq!(report.collection_id, CollectionId::from_filename("case.pdf"));
    assert!(path.exists());
}

#[tokio::test]
async fn given_missing_staged_file_when_ingesting_then_returns_io_error() {
    let dir = tempfile::TempDir::new().unwrap();

    let result = service(Arc::new(InMemoryVectorStore::new()))
        .ingest_file(&dir.path().join("absent.pdf"))
        .await;

    assert!(matches!(result, Err(IngestionError::Io(_))));
}

#[tokio::test]
async fn given_upsert_failure_when_ingesting_then_storage_error_and_no_empty_collection_left() {
    let store = UpsertFailingStore::new();
    let service = IngestionService::new(
        Arc::new(FakeFileLoader),
        Arc::new(HashEmbedder),
        store.clone(),
        Arc::new(SlidingWindowSplitter::new(60, 10).unwrap()),
        TEST_DIMENSIONS as u64,
    );

    let error = service
        .ingest(LEGAL_TEXT.as_bytes(), "case.pdf".to_string())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        IngestionError::Storage(VectorStoreError::UpsertFailed(_))
    ));
    let collection = CollectionId::from_filename("case.pdf");
    assert!(!store.collection_exists(&collection).await.unwrap());
}
