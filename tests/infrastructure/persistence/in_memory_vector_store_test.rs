use lexcase::application::ports::{CollectionConfig, VectorStore, VectorStoreError};
use lexcase::domain::{Chunk, CollectionId, Embedding};
use lexcase::infrastructure::persistence::InMemoryVectorStore;

fn collection(name: &str) -> CollectionId {
    CollectionId::from_filename(name)
}

fn chunk(text: &str, collection_id: &CollectionId) -> Chunk {
    Chunk::new(text.to_string(), collection_id.clone(), Some(1), 0)
}

async fn store_with(collection_id: &CollectionId) -> InMemoryVectorStore {
    let store = InMemoryVectorStore::new();
    store
        .create_collection(collection_id, &CollectionConfig::for_chunks(2))
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn given_new_collection_when_creating_twice_then_second_call_reports_existing() {
    let id = collection("a.pdf");
    let store = store_with(&id).await;

    let created = store
        .create_collection(&id, &CollectionConfig::for_chunks(2))
        .await
        .unwrap();

    assert!(!created);
    assert!(store.collection_exists(&id).await.unwrap());
}

#[tokio::test]
async fn given_points_when_searching_then_returns_most_similar_first() {
    let id = collection("a.pdf");
    let store = store_with(&id).await;
    store
        .upsert(
            &id,
            &[chunk("north", &id), chunk("east", &id), chunk("north-east", &id)],
            &[
                Embedding::new(vec![0.0, 1.0]),
                Embedding::new(vec![1.0, 0.0]),
                Embedding::normalized(vec![1.0, 1.0]),
            ],
        )
        .await
        .unwrap();

    let results = store
        .search(&id, &Embedding::new(vec![0.0, 1.0]), 2)
        .await
        .unwrap();

    let texts: Vec<&str> = results.iter().map(|r| r.chunk.text.as_str()).collect();
    assert_eq!(texts, vec!["north", "north-east"]);
    assert!(results[0].score > results[1].score);
}

#[tokio::test]
async fn given_two_collections_when_searching_one_then_other_is_never_returned() {
    let first = collection("first.pdf");
    let second = collection("second.pdf");
    let store = store_with(&first).await;
    store
        .create_collection(&second, &CollectionConfig::for_chunks(2))
        .await
        .unwrap();
    store
        .upsert(&first, &[chunk("mine", &first)], &[Embedding::new(vec![1.0, 0.0])])
        .await
        .unwrap();
    store
        .upsert(&second, &[chunk("theirs", &second)], &[Embedding::new(vec![1.0, 0.0])])
        .await
        .unwrap();

    let results = store
        .search(&first, &Embedding::new(vec![1.0, 0.0]), 10)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].chunk.text, "mine");
}

#[tokio::test]
async fn given_wrong_dimensions_when_upserting_then_rejected() {
    let id = collection("a.pdf");
    let store = store_with(&id).await;

    let result = store
        .upsert(&id, &[chunk("x", &id)], &[Embedding::new(vec![1.0, 0.0, 0.0])])
        .await;

    assert!(matches!(result, Err(VectorStoreError::UpsertFailed(_))));
    assert_eq!(store.point_count(&id).await, Some(0));
}

#[tokio::test]
async fn given_missing_collection_when_searching_then_collection_not_found() {
    let store = InMemoryVectorStore::new();

    let result = store
        .search(&collection("nope.pdf"), &Embedding::new(vec![1.0, 0.0]), 3)
        .await;

    assert!(matches!(result, Err(VectorStoreError::CollectionNotFound(_))));
}

#[tokio::test]
async fn given_deleted_collection_when_checking_then_it_is_gone() {
    let id = collection("a.pdf");
    let store = store_with(&id).await;

    store.delete_collection(&id).await.unwrap();
    store.delete_collection(&id).await.unwrap();

    assert!(!store.collection_exists(&id).await.unwrap());
    assert_eq!(store.point_count(&id).await, None);
}
