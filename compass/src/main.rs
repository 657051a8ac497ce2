use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mood_compass::api::{create_router, AppState};
use mood_compass::config::Config;
use mood_compass::dashboard::{render_text, DashboardView};
use mood_compass::llm::LlmProvider;
use mood_compass::models::AnalysisRequest;
use mood_compass::services::{AnalysisService, CredentialStore, EnvCredentials, SessionSweeper};
use mood_compass::session::SessionState;

#[derive(Parser)]
#[command(name = "mood-compass")]
#[command(about = "Mood diary dashboard backed by an LLM")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the dashboard server (default)
    Serve,
    /// Analyze one entry and print the report
    Analyze {
        /// How you are feeling
        text: String,
        /// Number of movie recommendations, 0 for none
        #[arg(long, default_value_t = 0)]
        movies: u32,
        /// Number of book recommendations, 0 for none
        #[arg(long, default_value_t = 0)]
        books: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env();

    tracing::info!("Initializing LLM provider: {}...", config.llm.model);
    let llm = LlmProvider::new(&config.llm);
    if !llm.is_available() {
        tracing::warn!("LLM unavailable - every analysis will fail with a provider error");
    }

    let credentials: Arc<dyn CredentialStore> =
        Arc::new(EnvCredentials::new(config.llm.api_key_env.clone()));
    if credentials.api_key().is_none() {
        tracing::warn!(
            "{} is not set - analyses will fail until a key is configured",
            config.llm.api_key_env
        );
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, llm, credentials).await,
        Command::Analyze {
            text,
            movies,
            books,
        } => analyze(&config, llm, credentials.as_ref(), text, movies, books).await,
    }
}

fn init_tracing() {
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mood_compass=info,tower_http=debug".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

async fn serve(
    config: Config,
    llm: LlmProvider,
    credentials: Arc<dyn CredentialStore>,
) -> anyhow::Result<()> {
    let state = AppState::new(config.clone(), llm, credentials);

    let cancel_token = CancellationToken::new();

    tracing::info!(
        "Starting session sweeper... (idle_ttl={}s, interval={}s)",
        config.session.idle_ttl_secs,
        config.session.sweep_interval_secs
    );
    let sweeper = SessionSweeper::new(state.sessions.clone(), config.session.sweep_interval_secs);
    let token = cancel_token.child_token();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::info!("Session sweeper shutting down...");
                    break;
                }
                _ = tokio::time::sleep(tokio::time::Duration::from_secs(sweeper.interval_secs())) => {
                    sweeper.run_once().await;
                }
            }
        }
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Mood Compass starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    Ok(())
}

async fn analyze(
    config: &Config,
    llm: LlmProvider,
    credentials: &dyn CredentialStore,
    text: String,
    movies: u32,
    books: u32,
) -> anyhow::Result<()> {
    let max = config.recommendations.max_count;
    for (kind, count) in [("movies", movies), ("books", books)] {
        if count > max {
            anyhow::bail!("Number of {kind} must be between 0 and {max}, got {count}");
        }
    }

    let service = AnalysisService::new(Arc::new(llm));
    let request = AnalysisRequest::new(text, movies, books);

    let outcome = match request.validate() {
        Ok(()) => service.analyze(&request, credentials).await,
        Err(error) => Err(error),
    };

    let mut state = SessionState::new();
    state.record(&outcome, chrono::Utc::now());

    match outcome {
        Ok(_) => {
            print!("{}", render_text(&DashboardView::from_state(&state, false)));
            Ok(())
        }
        Err(error) => Err(anyhow::anyhow!(error.user_message())),
    }
}

async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, cancelling background tasks...");
    cancel_token.cancel();
}
