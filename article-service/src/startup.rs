//! Application startup and lifecycle management.

use crate::config::ArticleConfig;
use crate::handlers::{
    generate_article, health_check, method_not_allowed, preflight, readiness_check,
};
use crate::services::providers::chat::ChatCompletionProvider;
use crate::services::providers::ChatProvider;
use axum::http::{header, HeaderName, Method};
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use service_core::error::AppError;
use service_core::middleware::tracing::request_id_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ArticleConfig,
    pub provider: Arc<dyn ChatProvider>,
}

/// Build the HTTP router with CORS, tracing, and request-id layers.
pub fn build_router(state: AppState) -> Router {
    // The CORS policy is deliberately permissive: the endpoint is called
    // from the blog's frontend on an arbitrary origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("http-referer"),
            HeaderName::from_static("x-title"),
        ]);

    Router::new()
        .route(
            "/api/generate",
            post(generate_article)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(cors)
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ArticleConfig) -> Result<Self, AppError> {
        let provider: Arc<dyn ChatProvider> =
            Arc::new(ChatCompletionProvider::new(config.upstream.clone()));

        tracing::info!(
            vendor = ?config.upstream.vendor,
            model = %config.upstream.model,
            prompt_style = ?config.prompt_style,
            "Initialized chat-completion provider"
        );

        let state = AppState { config, provider };

        // Port 0 = random port for testing.
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let http_port = listener.local_addr()?.port();

        tracing::info!("Article service listening on port {}", http_port);

        Ok(Self {
            http_port,
            listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await
    }
}
