mod answer;
mod auth;
mod config;
mod conversation;
mod db;
mod errors;
mod llm_client;
mod models;
mod profile;
mod responder;
mod routes;
mod sessions;
mod state;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::answer::AnswerService;
use crate::auth::AccessGate;
use crate::config::Config;
use crate::conversation::{ConversationController, UtteranceSlot};
use crate::db::create_pool;
use crate::llm_client::{GenerativeModel, LlmClient};
use crate::profile::repository::PgProfileRepository;
use crate::profile::storage::S3BlobStore;
use crate::profile::ProfileService;
use crate::routes::build_router;
use crate::sessions::{ChatSessionStore, RedisSlot};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // PostgreSQL connects lazily; an unreachable database only degrades profile reads
    let db = create_pool(&config.database_url)?;
    let profiles_repo = Arc::new(PgProfileRepository::new(db));

    // S3 / MinIO for profile photos and resume PDFs
    let s3 = build_s3_client(&config).await;
    let blobs = Arc::new(S3BlobStore::new(
        s3,
        config.s3_bucket.clone(),
        config.s3_public_url.clone(),
    ));
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    let profiles =
        Arc::new(ProfileService::load(profiles_repo, blobs, config.s3_bucket.clone()).await);

    // Redis holds the chat session archive
    let redis = redis::Client::open(config.redis_url.clone())?;
    let archive = ChatSessionStore::load(Arc::new(RedisSlot::new(redis))).await;
    info!("Chat archive loaded ({} sessions)", archive.sessions().len());

    let model: Option<Arc<dyn GenerativeModel>> = match &config.gemini_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.gemini_api_base.clone())?;
            info!("LLM client initialized ({})", config.gemini_api_base);
            Some(Arc::new(client))
        }
        None => {
            warn!("No GEMINI_API_KEY configured, answering from the local responder only");
            None
        }
    };
    let answers = AnswerService::new(model);
    let online = answers.is_online();

    let speech = Arc::new(UtteranceSlot::default());
    let conversation = Arc::new(ConversationController::new(
        answers,
        profiles.clone(),
        speech.clone(),
        archive,
    ));

    let state = AppState {
        conversation,
        profiles,
        speech,
        gate: AccessGate::new(&config.admin_password),
        online,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "folio-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::from_conf(
        aws_sdk_s3::config::Builder::from(&s3_config)
            .force_path_style(true)
            .build(),
    )
}
