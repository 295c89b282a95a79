use std::time::Duration;

use anyhow::Context;
use storage::{Database, services::seed};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod extract;
mod features;
mod lookup;
mod routes;
mod state;

#[cfg(test)]
mod tests;

use config::Config;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::history::handlers::list_all_history,
        features::history::handlers::get_history_entry,
        features::history::handlers::create_history_entry,
        features::history::handlers::update_history_entry,
        features::history::handlers::complete_event,
        features::history::handlers::delete_history_entry,
        features::volunteers::handlers::get_volunteer_history,
        features::volunteers::handlers::get_volunteer_stats,
        features::volunteers::handlers::get_volunteer_profile,
        features::volunteers::handlers::update_volunteer_profile,
        features::events::handlers::get_event_history,
        features::ranking::handlers::get_top_volunteers,
    ),
    components(
        schemas(
            storage::dto::common::ErrorResponse,
            storage::dto::history::CreateHistoryEntryRequest,
            storage::dto::history::UpdateHistoryEntryRequest,
            storage::dto::history::CompleteEventRequest,
            storage::dto::history::EnrichedHistoryEntry,
            storage::dto::stats::VolunteerStats,
            storage::dto::stats::VolunteerStatsResponse,
            storage::dto::stats::TopVolunteer,
            storage::dto::stats::RankedVolunteer,
            storage::models::HistoryEntry,
            storage::models::EntryStatus,
            storage::models::Volunteer,
            storage::models::VolunteerProfile,
        )
    ),
    tags(
        (name = "history", description = "Volunteer history entries"),
        (name = "volunteers", description = "Per-volunteer history, statistics and profiles"),
        (name = "events", description = "Event participation"),
        (name = "rankings", description = "Volunteer rankings"),
    )
)]
struct ApiDoc;

async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let state = match config.database_url {
        Some(ref database_url) => {
            tracing::info!(
                "Connecting to database at: {}",
                database_url.split('@').next_back().unwrap_or("unknown")
            );
            let db = Database::new(database_url)
                .await
                .context("Failed to initialize database")?;
            tracing::info!("Database connection established");

            tracing::info!("Running database migrations");
            db.run_migrations()
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Database migrations completed successfully");

            AppState::postgres(&db)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, history is kept in memory only");
            AppState::in_memory()
        }
    };

    if let Some(ref path) = config.volunteers_file {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read volunteers file {}", path.display()))?;
        let count = seed::seed_directory(state.volunteers.as_ref(), &json)
            .await
            .with_context(|| format!("Failed to load volunteers from {}", path.display()))?;
        tracing::info!("Loaded {} volunteer profiles from {}", count, path.display());
    }

    Ok(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting volunteer history API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let state = build_state(&config).await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let app = routes::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}
