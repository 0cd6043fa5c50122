mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::geocode::ReverseGeocoder;

pub fn build_router(geocoder: ReverseGeocoder) -> Router {
    let state = Arc::new(AppState { geocoder });

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/reverse", get(handlers::reverse))
        .route("/api/address", get(handlers::address))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, geocoder: ReverseGeocoder) -> std::io::Result<()> {
    let upstream = geocoder.config().base_url.clone();
    let app = build_router(geocoder);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("revgeo listening on http://{} (upstream {})", addr, upstream);

    axum::serve(listener, app).await
}
