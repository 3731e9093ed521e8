mod env;

use std::net::SocketAddr;

use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use docreel::{SummarizerConfig, VideoOptions, WhisperModel};

use env::env;

const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

fn app() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/summarize", post(summarize))
        .route("/generate-video", post(generate_video))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docreel=info,docreel_server=info,tower_http=info".into()),
        )
        .init();

    let addr = SocketAddr::from(([0, 0, 0, 0], env().port));
    tracing::info!(%addr, "server listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    tracing::info!("shutdown signal received");
}

async fn health() -> &'static str {
    "ok"
}

async fn summarize(multipart: Multipart) -> Response {
    let (bytes, filename) = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };

    match docreel::summarize_bytes(&bytes, &filename, &summarizer_config()).await {
        Ok(summary) => Json(serde_json::json!({ "summary": summary })).into_response(),
        Err(e) => error_response(e),
    }
}

async fn generate_video(multipart: Multipart) -> Response {
    let (bytes, filename) = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };

    match docreel::generate_video_from_bytes(&bytes, &filename, &video_options()).await {
        Ok(artifact) => Json(serde_json::json!({
            "video_path": artifact.video_path,
            "summary": artifact.summary,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// Pull the uploaded document out of the `file` multipart field.
async fn read_upload(mut multipart: Multipart) -> Result<(Vec<u8>, String), Response> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        bad_request(format!("malformed multipart body: {e}"))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| bad_request(format!("failed to read upload: {e}")))?;

        return Ok((bytes.to_vec(), filename));
    }

    Err(bad_request("missing \"file\" field".into()))
}

fn summarizer_config() -> SummarizerConfig {
    let env = env();
    let mut config = SummarizerConfig::new()
        .base_url(env.llm_base_url.clone())
        .model(env.llm_model.clone());
    if let Some(key) = &env.llm_api_key {
        config = config.api_key(key.clone());
    }
    config
}

fn video_options() -> VideoOptions {
    let env = env();
    VideoOptions::new()
        .summarizer(summarizer_config())
        .whisper_model(
            WhisperModel::parse_name(&env.whisper_model).unwrap_or_default(),
        )
        .voice_model(env.voice_model.clone())
        .background(env.background.clone())
        .output_dir(env.output_dir.clone())
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

/// Any pipeline failure maps to a generic 500 with the error text.
fn error_response(e: docreel::Error) -> Response {
    tracing::error!(error = %e, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": e.to_string() })),
    )
        .into_response()
}
