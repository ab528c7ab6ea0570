pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use cardsheet_core::{ClassRegistry, EditorSession, SheetLayout};
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::catalog::CatalogClient;
use crate::services::draft::DraftApplier;
use crate::services::library::CardLibrary;

/// Backing images arrive as data URLs, well above axum's default body limit.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<EditorSession>>,
    pub library: Arc<CardLibrary>,
    pub catalog: Arc<CatalogClient>,
    pub drafts: Arc<DraftApplier>,
}

impl AppState {
    pub fn new(config: &Config) -> cardsheet_core::Result<Self> {
        let layout = SheetLayout::new(config.page_capacity)?;
        let session = EditorSession::new(ClassRegistry::with_defaults(), layout);

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            library: Arc::new(CardLibrary::new(&config.card_dir)),
            catalog: Arc::new(CatalogClient::new(&config.catalog_url)),
            drafts: Arc::new(DraftApplier::new(config.apply_debounce)),
        })
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/schema", get(routes::schema::get))
        // Card routes
        .route("/api/cards", get(routes::cards::list).post(routes::cards::create))
        .route("/api/cards/visible", get(routes::cards::visible))
        .route(
            "/api/cards/{id}",
            get(routes::cards::get).delete(routes::cards::delete),
        )
        .route("/api/cards/{id}/fields", post(routes::cards::add_field))
        .route(
            "/api/cards/{id}/fields/{key}",
            put(routes::cards::edit_field).delete(routes::cards::remove_field),
        )
        .route("/api/cards/{id}/classes", put(routes::cards::set_classes))
        .route("/api/cards/{id}/level", put(routes::cards::set_level))
        .route("/api/cards/{id}/color", put(routes::cards::recolor))
        .route("/api/cards/{id}/duplicate", post(routes::cards::duplicate))
        // Filter routes
        .route(
            "/api/filters",
            get(routes::filters::get).put(routes::filters::replace),
        )
        .route("/api/filters/toggle", post(routes::filters::toggle))
        // Deck routes
        .route("/api/deck/example", post(routes::deck::load_example))
        .route("/api/deck/catalog", post(routes::deck::load_catalog))
        .route("/api/deck/saved", post(routes::deck::load_saved))
        .route(
            "/api/deck/text",
            get(routes::deck::get_text).put(routes::deck::apply_text),
        )
        .route("/api/deck/text/draft", post(routes::deck::draft_text))
        // Sheet routes
        .route("/api/sheets", get(routes::sheets::list))
        .route(
            "/api/sheets/backing",
            put(routes::sheets::set_backing).delete(routes::sheets::clear_backing),
        )
        .route("/api/sheets/mirror", put(routes::sheets::set_mirror))
        .route("/api/sheets/capacity", put(routes::sheets::set_capacity))
        // Export routes
        .route("/api/export/deck", get(routes::export::deck))
        .route("/api/export/document", get(routes::export::document))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Card directory: {}", config.card_dir.display());
    tracing::info!("Catalog: {}", config.catalog_url);

    let state = AppState::new(&config)?;

    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
