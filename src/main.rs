//! Lectern server binary.

use anyhow::Context;
use clap::Parser;
use lectern::{
    AppState, FileSessionStore, LecternConfig, LocalDocumentStore, RateLimiter,
    ResearchOrchestrator, SessionManager, SourceProvider,
    api::routes::create_router,
    llm::OpenAiClient,
    providers::{AnswerProvider, ArxivProvider, WebProvider},
    retrieval::HttpRetriever,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Lectern - Document Research Server
///
/// Answers questions about documents in your library by querying an
/// answer engine, arXiv, and web search concurrently, merging the
/// results into one report with bounded per-document history.
#[derive(Parser, Debug)]
#[command(
    name = "lectern-server",
    version,
    about = "Lectern - Document Research Server"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "lectern.toml")]
    config: PathBuf,

    /// Override the configured bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured bind port
    #[arg(long)]
    port: Option<u16>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config =
        LecternConfig::load_or_default(&cli.config).context("loading configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let default_filter = if cli.verbose {
        "debug".to_string()
    } else {
        config.server.log_level.clone()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = build_state(config)?;

    let addr: SocketAddr = format!("{}:{}", state.config.server.host, state.config.server.port)
        .parse()
        .context("invalid bind address")?;

    let app = create_router(state);

    tracing::info!(%addr, "lectern server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("binding listener")?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("serving")?;

    Ok(())
}

fn build_state(config: LecternConfig) -> anyhow::Result<AppState> {
    let config = Arc::new(config);

    let limiter = Arc::new(RateLimiter::new(
        config.limits.max_requests,
        Duration::from_secs(config.limits.window_seconds),
    ));
    let _ = limiter.spawn_sweeper(Duration::from_secs(config.limits.sweep_interval_seconds));

    let sessions = Arc::new(SessionManager::new(Arc::new(FileSessionStore::new(
        &config.storage.sessions_dir,
    ))));

    let documents = Arc::new(LocalDocumentStore::new(&config.storage.documents_dir));

    // A missing API key degrades the answer source to per-request
    // failures instead of blocking startup; papers and web still work.
    let api_key = config.providers.openai.api_key().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "answer synthesis unavailable until the API key is set");
        String::new()
    });
    let llm = Arc::new(OpenAiClient::new(
        api_key,
        config.providers.openai.api_base.clone(),
        config.providers.openai.model.clone(),
    ));
    let retriever = Arc::new(HttpRetriever::new(config.providers.retrieval.url.clone())?);
    let answer_provider: Arc<dyn SourceProvider> = Arc::new(AnswerProvider::new(
        retriever,
        llm,
        config.research.answer_top_k,
    ));

    let paper_provider: Arc<dyn SourceProvider> = Arc::new(ArxivProvider::new(
        config.providers.arxiv.base_url.clone(),
        config.research.paper_max_results,
    )?);

    let web_provider: Arc<dyn SourceProvider> =
        Arc::new(WebProvider::new(config.research.web_max_results));

    let orchestrator = Arc::new(ResearchOrchestrator::new(
        vec![
            Arc::clone(&answer_provider),
            Arc::clone(&paper_provider),
            Arc::clone(&web_provider),
        ],
        Duration::from_secs(config.research.provider_timeout_secs),
    ));

    Ok(AppState {
        config,
        limiter,
        sessions,
        documents,
        orchestrator,
        paper_provider,
        web_provider,
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install shutdown handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
