//! # Server Configuration
//!
//! Router assembly and startup for the channel management API.

use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers::{self, channels};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route(
            "/v1/channels",
            get(channels::get_channels)
                .post(channels::create_channel)
                .put(channels::missing_id)
                .delete(channels::missing_id),
        )
        .route(
            "/v1/channels/{id}",
            get(channels::get_channel)
                .put(channels::update_channel)
                .delete(channels::remove_channel),
        )
        .route(
            "/v1/channels/{channel_id}/configs/{config_id}",
            post(channels::create_config_link).delete(channels::remove_config_link),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

/// Starts the server with the given configuration
pub async fn run_server(config: AppConfig, db: DatabaseConnection) -> anyhow::Result<()> {
    let state = AppState { db };
    let app = create_app(state);

    let addr = config.bind_addr()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, profile = %config.profile, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::channels::get_channels,
        crate::handlers::channels::get_channel,
        crate::handlers::channels::create_channel,
        crate::handlers::channels::update_channel,
        crate::handlers::channels::remove_channel,
        crate::handlers::channels::create_config_link,
        crate::handlers::channels::remove_config_link,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::models::channel::EmailDetails,
            crate::models::channel::OpsgenieDetails,
            crate::models::channel::PagerDutyDetails,
            crate::models::channel::SlackDetails,
            crate::models::channel::TelegramDetails,
            crate::models::channel::TwilioDetails,
            crate::models::channel::LinkedConfig,
            crate::handlers::channels::ChannelInfo,
            crate::handlers::channels::ChannelTypeInfo,
            crate::error::ApiError,
        )
    ),
    info(
        title = "PANIC Channels API",
        description = "REST API for managing alert channels and their config links",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
