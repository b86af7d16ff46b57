mod config;
mod documents;
mod embedding;
mod errors;
mod matching;
mod models;
mod nlp;
mod routes;
mod state;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, EmbeddingBackend};
use crate::embedding::{Embedder, HashingEmbedder, OllamaEmbedder};
use crate::matching::vocabulary::{SectionHeaders, SkillVocabulary};
use crate::matching::{MatchingEngine, ScoringSettings};
use crate::nlp::NlpCapability;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RecruitDesk API v{}", env!("CARGO_PKG_VERSION"));

    let embedder = build_embedder(&config)?;
    info!(
        "Embedding backend: {} (model: {})",
        config.embedding_backend.as_str(),
        embedder.model()
    );
    let model_loaded = probe_embedder(embedder.as_ref()).await;

    let nlp = if config.nlp_enabled {
        NlpCapability::rule_based()
    } else {
        NlpCapability::Unavailable
    };
    if !nlp.is_available() {
        warn!("NLP capability disabled; keyword and skill scores will be zero");
    }

    let vocabulary = SkillVocabulary::default();
    if vocabulary.is_empty() {
        warn!("Skill vocabulary is empty; skill scores will be zero");
    }
    let headers = SectionHeaders::default();
    info!(
        "Skill vocabulary {} ({} terms), section headers {}",
        vocabulary.version,
        vocabulary.len(),
        headers.version
    );

    let engine = MatchingEngine::new(
        embedder,
        nlp,
        Arc::new(vocabulary),
        headers,
        ScoringSettings::from_config(&config),
    );
    info!("Matching engine ready");

    let cors = build_cors(&config)?;
    let state = AppState {
        config: config.clone(),
        engine: Arc::new(engine),
        model_loaded,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    let embedder: Arc<dyn Embedder> = match config.embedding_backend {
        EmbeddingBackend::Ollama => Arc::new(
            OllamaEmbedder::new(&config.ollama_host, &config.embedding_model)
                .context("Failed to build embedding client")?,
        ),
        EmbeddingBackend::Hashing => Arc::new(HashingEmbedder::default()),
    };
    Ok(embedder)
}

/// One embedding round-trip at startup. A failure is logged, not fatal: the
/// server still starts and reports `model_loaded: false`.
async fn probe_embedder(embedder: &dyn Embedder) -> bool {
    match embedder.embed_one("health check").await {
        Ok(_) => {
            info!("Embedding model loaded successfully");
            true
        }
        Err(e) => {
            warn!("Embedding model probe failed: {e}");
            false
        }
    }
}

fn build_cors(config: &Config) -> Result<CorsLayer> {
    let origins = config
        .cors_allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}
