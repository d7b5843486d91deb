mod config;
mod db;
mod handlers;
mod models;
mod org;
mod templates;
mod utils;

use anyhow::Result;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use clap::Parser;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use handlers::AppState;

#[derive(Parser, Debug)]
#[command(name = "org-command-center")]
#[command(about = "Org health dashboard", long_about = None)]
struct Args {
    /// Host pro HTTP server
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port pro HTTP server
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Neotvírat prohlížeč automaticky
    #[arg(long)]
    no_browser: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Inicializuj logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "org_command_center=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI argumenty
    let args = Args::parse();

    tracing::info!("Starting Org Command Center...");

    // Inicializuj adresáře
    config::init_directories()?;

    // Inicializuj databázi
    let db = db::Database::new().await?;
    tracing::info!("Database initialized successfully");

    // Shared state
    let state = Arc::new(AppState { db });

    // Vytvoř axum router
    let app = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/dashboard", get(handlers::dashboard::dashboard))
        .route("/dashboard/limits", get(handlers::dashboard::limits_panel))
        .route("/dashboard/licenses", get(handlers::dashboard::licenses_panel))
        .route("/dashboard/jobs", get(handlers::dashboard::jobs_panel))
        .route("/dashboard/trust", get(handlers::dashboard::trust_panel))
        .route("/orgs", get(handlers::orgs::list_orgs))
        .route("/orgs", post(handlers::orgs::create_org))
        .route("/orgs/{id}", put(handlers::orgs::update_org))
        .route("/orgs/{id}", delete(handlers::orgs::delete_org))
        .route("/orgs/{id}/select", post(handlers::orgs::select_org))
        .route("/orgs/{id}/test", post(handlers::orgs::test_org))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state);

    // Adresa serveru
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    // Otevři prohlížeč
    if !args.no_browser {
        let url = format!("http://{}", addr);
        if let Err(e) = utils::open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
            tracing::info!("Please open {} manually", url);
        }
    }

    // Spusť server
    tracing::info!("Server started successfully");
    axum::serve(listener, app).await?;

    Ok(())
}
