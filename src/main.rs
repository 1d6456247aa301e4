// Main entry point - Dependency injection and preview server setup
use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use barangay_dashboard::application::dashboard_controller::DashboardController;
use barangay_dashboard::application::modal_form::{ModalForm, ModalFormConfig};
use barangay_dashboard::infrastructure::config::load_dashboard_config;
use barangay_dashboard::infrastructure::http_api::HttpRecordsApi;
use barangay_dashboard::presentation::app_state::AppState;
use barangay_dashboard::presentation::events::EventRouter;
use barangay_dashboard::presentation::handlers::{dispatch_event, health_check, render_page};
use barangay_dashboard::presentation::layout::dashboard_page;
use barangay_dashboard::presentation::page::shared;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Records API client (infrastructure layer)
    let api = Arc::new(HttpRecordsApi::new(config.api.base_url.clone()));

    // Controllers (application layer)
    let page = shared(dashboard_page());
    let controller = Arc::new(DashboardController::new(
        api.clone(),
        page.clone(),
        config.controller_settings(),
    ));
    let resident_form = ModalForm::new(
        ModalFormConfig::add_resident(),
        api,
        page.clone(),
        controller.toaster().clone(),
    );

    controller.init().await;

    let state = Arc::new(AppState {
        page,
        events: EventRouter::new(controller).with_form(resident_form),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/", get(render_page))
        .route("/events", post(dispatch_event))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = config.preview.listen_addr.parse()?;
    tracing::info!(
        "Serving dashboard preview on {} (records API {})",
        addr,
        config.api.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
