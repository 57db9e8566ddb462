//! Web server for the composed map.
//!
//! The feed is fetched once before the server starts; handlers only read the
//! resulting page, so there is no polling and no shared mutable state.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::Html,
    routing::get,
};

use crate::compose::MapDocument;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Pre-rendered page served at `/`
    page: Arc<str>,
    /// Document the page was rendered from
    document: Arc<MapDocument>,
}

impl AppState {
    /// Render the page once up front.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized.
    pub fn new(document: MapDocument) -> Result<Self, serde_json::Error> {
        let page = document.render_html()?;
        Ok(Self {
            page: page.into(),
            document: Arc::new(document),
        })
    }
}

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/map.json", get(document_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(config: ServerConfig, state: AppState) -> anyhow::Result<()> {
    let markers = state.document.marker_count();
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("serving map with {} earthquakes at http://{}", markers, addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Main page handler - serves the map.
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.page.to_string())
}

/// Map document as JSON.
async fn document_handler(State(state): State<AppState>) -> Json<MapDocument> {
    Json(state.document.as_ref().clone())
}

/// Health check endpoint.
async fn health_handler() -> &'static str {
    "OK"
}
