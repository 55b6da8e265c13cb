//! HTTP API server implementation

use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use utoipa::{OpenApi, ToSchema};

use crate::core::client::TranslationClient;
use crate::core::config::AppConfig;
use crate::core::models::{
    parse_payload, SpeechRequest, SpeechResult, TranslationRequest, TranslationResult,
};
use crate::core::speech::SpeechClient;
use crate::server::error::{ApiError, ErrorBody};
use crate::server::pages;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Medical translation client
    pub translator: TranslationClient,
    /// Text-to-speech client
    pub speech: SpeechClient,
}

impl AppState {
    /// Bundle the two clients
    pub fn new(translator: TranslationClient, speech: SpeechClient) -> Self {
        Self { translator, speech }
    }

    /// Build both clients from configuration, sharing one HTTP connection pool
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::new(
            TranslationClient::from_config(config, http.clone()),
            SpeechClient::from_config(config, http),
        ))
    }
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy`
    #[schema(example = "healthy")]
    status: String,
}

/// OpenAPI document for the JSON endpoints
#[derive(OpenApi)]
#[openapi(
    paths(health_check, translate, text_to_speech),
    components(schemas(
        HealthResponse,
        TranslationRequest,
        TranslationResult,
        SpeechRequest,
        SpeechResult,
        ErrorBody
    )),
    tags(
        (name = "translation", description = "Medical text translation"),
        (name = "speech", description = "Text-to-speech audio")
    )
)]
pub struct ApiDoc;

/// Health check handler
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Translation handler
#[utoipa::path(
    post,
    path = "/api/translate",
    tag = "translation",
    request_body = TranslationRequest,
    responses(
        (status = 200, description = "Translated text", body = TranslationResult),
        (status = 400, description = "Missing body or fields", body = ErrorBody),
        (status = 500, description = "Provider failure", body = ErrorBody)
    )
)]
pub async fn translate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TranslationResult>, ApiError> {
    let payload = parse_payload(&body)?;
    let request = TranslationRequest::from_payload(&payload)?;

    // Length only; patient text stays out of the logs
    info!(
        "Translation request: {} chars from {} to {}",
        request.text.chars().count(),
        request.source_lang,
        request.target_lang
    );

    // Failures are logged by the client
    let result = state.translator.translate_request(&request).await?;
    Ok(Json(result))
}

/// Text-to-speech handler
#[utoipa::path(
    post,
    path = "/api/text-to-speech",
    tag = "speech",
    request_body = SpeechRequest,
    responses(
        (status = 200, description = "Audio as a data URL", body = SpeechResult),
        (status = 400, description = "Missing body or fields", body = ErrorBody),
        (status = 500, description = "Provider failure", body = ErrorBody)
    )
)]
pub async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SpeechResult>, ApiError> {
    let payload = parse_payload(&body)?;
    let request = SpeechRequest::from_payload(&payload)?;

    info!(
        "Text-to-speech request: {} chars in {}",
        request.text.chars().count(),
        request.language
    );

    let audio_data_url = state.speech.synthesize(&request.text, &request.language).await?;

    Ok(Json(SpeechResult {
        audio_data_url,
        text: request.text,
        language: request.language,
    }))
}

/// OpenAPI JSON handler
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/user-guide", get(pages::user_guide))
        .route("/health", get(health_check))
        .route("/api/translate", post(translate))
        .route("/api/text-to-speech", post(text_to_speech))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(config: AppConfig, host: String, port: u16) -> anyhow::Result<()> {
    // Create app state
    let state = Arc::new(AppState::from_config(&config)?);

    // Create router
    let app = create_router(state);

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {} ({} mode)", addr, config.environment);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
