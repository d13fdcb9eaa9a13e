use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use lexcase::application::ports::{
    Embedder, FileLoader, LlmClient, Reranker, TemplateProvider, TextSplitter, VectorStore,
};
use lexcase::application::services::{
    AnswerGenerator, ChunkRetriever, IngestionService, MultiQueryRetriever, PromptSelector,
    QaService, RetrievalPipeline, RetrievalStrategy, VectorRetriever,
};
use lexcase::infrastructure::llm::{ChatLlmClient, CrossEncoderReranker, EmbedderFactory};
use lexcase::infrastructure::observability::{TracingConfig, init_tracing};
use lexcase::infrastructure::persistence::{InMemoryVectorStore, QdrantAdapter};
use lexcase::infrastructure::prompts::JsonTemplateRegistry;
use lexcase::infrastructure::text_processing::{PdfAdapter, SlidingWindowSplitter};
use lexcase::presentation::config::VectorStoreProvider;
use lexcase::presentation::{AppState, create_router, load_settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (environment, settings) = load_settings().context("Failed to load configuration")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    let file_loader: Arc<dyn FileLoader> = Arc::new(PdfAdapter::new());
    let text_splitter: Arc<dyn TextSplitter> = Arc::new(SlidingWindowSplitter::new(
        settings.chunking.chunk_size,
        settings.chunking.chunk_overlap,
    )?);

    let embedder: Arc<dyn Embedder> = EmbedderFactory::create(&settings.embeddings)?;

    let vector_store: Arc<dyn VectorStore> = match settings.vector_store.provider {
        VectorStoreProvider::Qdrant => {
            tracing::info!(url = %settings.vector_store.url, "Using Qdrant vector store");
            Arc::new(QdrantAdapter::new(&settings.vector_store.url)?)
        }
        VectorStoreProvider::Memory => {
            tracing::warn!("Using in-memory vector store, collections are lost on restart");
            Arc::new(InMemoryVectorStore::new())
        }
    };

    let llm_client: Arc<dyn LlmClient> = Arc::new(ChatLlmClient::from_settings(&settings.llm)?);

    let reranker: Option<Arc<dyn Reranker>> = if settings.reranker.enabled {
        let reranker = CrossEncoderReranker::new(
            &settings.reranker.model,
            settings.reranker.max_length,
        )?;
        Some(Arc::new(reranker))
    } else {
        tracing::info!("Reranking disabled, using vector scores");
        None
    };

    let templates: Arc<dyn TemplateProvider> = Arc::new(
        JsonTemplateRegistry::load(&settings.prompts.path)
            .context("Failed to load prompt templates")?,
    );

    let vector_retriever = VectorRetriever::new(
        Arc::clone(&embedder),
        Arc::clone(&vector_store),
        settings.retrieval.fetch_k,
    );
    let retriever: Arc<dyn ChunkRetriever> = match settings.retrieval.strategy {
        RetrievalStrategy::Direct => Arc::new(vector_retriever),
        RetrievalStrategy::MultiQuery => Arc::new(MultiQueryRetriever::new(
            vector_retriever,
            Arc::clone(&llm_client),
            settings.retrieval.query_count,
        )),
    };
    tracing::info!(
        strategy = ?settings.retrieval.strategy,
        top_n = settings.retrieval.top_n,
        "Retrieval configured"
    );

    let ingestion_service = Arc::new(IngestionService::new(
        file_loader,
        embedder,
        vector_store,
        text_splitter,
        settings.embeddings.dimension,
    ));

    let qa_service = Arc::new(QaService::new(
        RetrievalPipeline::new(retriever, reranker, settings.retrieval.top_n),
        PromptSelector::new(templates),
        AnswerGenerator::new(llm_client),
    ));

    let state = AppState {
        ingestion_service,
        qa_service,
        uploads: settings.uploads.clone(),
    };

    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(address = %addr, "Listening");

    axum::serve(listener, router).await?;

    Ok(())
}
