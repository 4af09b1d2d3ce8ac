use axum::{middleware::from_fn, routing::get, Router};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use rosterhub::config::config;
use rosterhub::database::Database;
use rosterhub::handlers::{children, organizations, profiles};
use rosterhub::middleware::auth::actor_middleware;

#[derive(Parser)]
#[command(name = "rosterhub", version, about = "Athlete roster API server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server
    Serve {
        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = config();
    tracing::info!("Starting rosterhub in {:?} mode", config.environment);

    match Cli::parse().command {
        Some(Command::Migrate) => migrate().await,
        Some(Command::Serve { port }) => serve(port).await,
        None => serve(None).await,
    }
}

async fn migrate() -> anyhow::Result<()> {
    Database::migrate().await?;
    Ok(())
}

async fn serve(port_override: Option<u16>) -> anyhow::Result<()> {
    let config = config();

    // Warm the pool so bad connection settings fail at startup, not on the
    // first request
    Database::pool().await?;

    let port = port_override.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Listening on http://{}", bind_addr);
    axum::serve(listener, app()).await?;
    Ok(())
}

fn app() -> Router {
    let cors = if config().security.enable_cors {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Protected API
        .merge(api_routes())
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router {
    Router::new()
        .route(
            "/api/profiles",
            get(profiles::list_profiles).post(profiles::create_profile),
        )
        .route(
            "/api/profiles/:id",
            get(profiles::get_profile)
                .put(profiles::update_profile)
                .delete(profiles::delete_profile),
        )
        .route(
            "/api/profiles/:id/achievements",
            get(children::list_achievements).put(children::save_achievements),
        )
        .route(
            "/api/profiles/:id/stats",
            get(children::list_stats).put(children::save_stats),
        )
        .route(
            "/api/profiles/:id/videos",
            get(children::list_videos).put(children::save_videos),
        )
        .route(
            "/api/organizations",
            get(organizations::list_organizations).post(organizations::create_organization),
        )
        .route(
            "/api/organizations/:id",
            get(organizations::get_organization)
                .put(organizations::update_organization)
                .delete(organizations::delete_organization),
        )
        .layer(from_fn(actor_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "rosterhub",
            "version": version,
            "description": "Role-scoped athlete roster and profile API",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "profiles": "/api/profiles[/:id] (protected)",
                "achievements": "/api/profiles/:id/achievements (protected)",
                "stats": "/api/profiles/:id/stats (protected)",
                "videos": "/api/profiles/:id/videos (protected)",
                "organizations": "/api/organizations[/:id] (protected)",
            },
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    let database = match Database::health_check().await {
        Ok(()) => "up",
        Err(_) => "down",
    };

    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "database": database,
        }
    }))
}
