//! Gateway wiring and the serve loop.

use std::{sync::Arc, time::Duration};

use {
    coastal_config::{CoastalConfig, EmbeddingBackend},
    coastal_memory::{
        EmbeddingProvider, MemoryConfig, MemoryManager, SqliteVectorStore,
        embeddings_ollama::OllamaEmbeddingProvider, embeddings_openai::OpenAiEmbeddingProvider,
    },
    coastal_providers::OllamaProvider,
    tracing::info,
};

use crate::{routes::build_router, services::RagService, state::GatewayState};

/// Open the vector store and build the embedding and LLM clients.
pub async fn prepare_gateway(config: &CoastalConfig) -> anyhow::Result<Arc<GatewayState>> {
    let store = SqliteVectorStore::open(&config.store.db_path).await?;
    let embedder = build_embedder(config)?;
    info!(
        db = %config.store.db_path.display(),
        embedding_model = %embedder.model_name(),
        llm = %config.ollama.model,
        ollama = %config.ollama.base_url,
        "gateway prepared"
    );

    let memory = MemoryManager::new(
        MemoryConfig {
            chunk_size: config.store.chunk_size,
            chunk_overlap: config.store.chunk_overlap,
            top_k: config.store.top_k,
        },
        Box::new(store),
        embedder,
    );

    let llm = OllamaProvider::new(
        &config.ollama.base_url,
        config.ollama.model.clone(),
        Duration::from_secs(config.ollama.request_timeout_secs),
    )?
    .with_temperature(config.ollama.temperature);

    let rag = RagService::new(Arc::new(memory), Arc::new(llm));
    Ok(Arc::new(GatewayState::new(rag)))
}

fn build_embedder(config: &CoastalConfig) -> anyhow::Result<Box<dyn EmbeddingProvider>> {
    let emb = &config.embeddings;
    let base_url = emb.effective_base_url(&config.ollama);
    Ok(match emb.provider {
        EmbeddingBackend::Ollama => Box::new(
            OllamaEmbeddingProvider::new(base_url)?.with_model(emb.model.clone(), emb.dimensions),
        ),
        EmbeddingBackend::OpenAi => {
            let mut provider =
                OpenAiEmbeddingProvider::new(base_url, emb.model.clone(), emb.dimensions)?;
            if let Some(key) = &emb.api_key {
                provider = provider.with_api_key(key.clone());
            }
            Box::new(provider)
        },
    })
}

/// Bind to the configured address and serve until Ctrl-C / SIGTERM.
pub async fn serve(config: &CoastalConfig) -> anyhow::Result<()> {
    let state = prepare_gateway(config).await?;
    let app = build_router(Arc::clone(&state));

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(
        uptime_secs = state.started_at.elapsed().as_secs(),
        "gateway stopped"
    );
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
