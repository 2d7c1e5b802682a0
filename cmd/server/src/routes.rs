//! HTTP routes and handlers.
//!
//! API endpoints:
//! - GET/HEAD /              - health check, no auth
//! - POST /api/voice-detection - classify a base64 MP3 clip
//!
//! Validation and processing failures are reported with HTTP 200 and an
//! error body, matching the upstream API contract; the only hard failure
//! is an invalid `x-api-key` (401).

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::warn;

use voiceguard_audio::{codec, resample, Extractor};
use voiceguard_detect::{Detection, DetectError, Detector};

use crate::tmpfile::TempAudio;

/// Languages accepted by the API, in the order they are reported.
pub const SUPPORTED_LANGUAGES: [&str; 5] = ["Tamil", "English", "Hindi", "Malayalam", "Telugu"];

/// Shared read-only application state.
pub struct AppState {
    pub api_key: String,
    pub detector: Detector,
    pub extractor: Extractor,
}

/// Builds the application router.
///
/// CORS is wide open: browser clients may call from any origin. The
/// `x-api-key` check still applies to every detection request.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/voice-detection", post(detect_voice))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct VoiceRequest {
    pub language: String,
    #[serde(rename = "audioFormat")]
    pub audio_format: String,
    #[serde(rename = "audioBase64")]
    pub audio_base64: String,
}

#[derive(Debug, Serialize)]
struct DetectionResponse {
    status: &'static str,
    language: String,
    classification: &'static str,
    #[serde(rename = "confidenceScore")]
    confidence_score: f64,
    explanation: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

/// HTTP 200 with the error body shape.
fn soft_error(message: String) -> Response {
    Json(ErrorBody {
        status: "error",
        message,
    })
    .into_response()
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "API is running",
        "message": "Use POST /api/voice-detection",
    }))
}

async fn detect_voice(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<VoiceRequest>,
) -> Response {
    // 1. API key: the only hard-failure path
    let key = headers.get("x-api-key").and_then(|v| v.to_str().ok());
    if key != Some(state.api_key.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody {
                status: "error",
                message: "Invalid API key".to_string(),
            }),
        )
            .into_response();
    }

    // 2. Language allow-list, case-normalized
    if !SUPPORTED_LANGUAGES.contains(&capitalize(&request.language).as_str()) {
        return soft_error(format!(
            "Language must be one of: {}",
            SUPPORTED_LANGUAGES.join(", ")
        ));
    }

    // 3. Audio format
    if request.audio_format.to_lowercase() != "mp3" {
        return soft_error("Only MP3 format is supported".to_string());
    }

    // 4. Decode, extract, classify
    match run_pipeline(&state, &request.audio_base64) {
        Ok(detection) => Json(DetectionResponse {
            status: "success",
            language: request.language,
            classification: detection.classification.as_str(),
            confidence_score: round2(detection.confidence),
            explanation: detection.explanation(),
        })
        .into_response(),
        Err(e) => {
            warn!("voice detection failed: {}", e);
            soft_error(format!("Error processing audio: {}", e))
        }
    }
}

/// Runs the base64 -> temp file -> features -> classifier chain.
///
/// The temp file guard drops on every return path, so the decoded clip
/// never outlives the request.
fn run_pipeline(state: &AppState, audio_base64: &str) -> Result<Detection, DetectError> {
    let bytes = BASE64
        .decode(audio_base64)
        .map_err(|e| DetectError::Decode(format!("Error decoding audio: {}", e)))?;
    let temp = TempAudio::create(&bytes)
        .map_err(|e| DetectError::Decode(format!("Error decoding audio: {}", e)))?;

    let (pcm, sample_rate, channels) =
        codec::decode_mp3(temp.path()).map_err(|e| DetectError::Extraction(e.to_string()))?;
    let mono = resample::to_mono_16k(&pcm, sample_rate, channels)
        .map_err(|e| DetectError::Extraction(e.to_string()))?;
    let features = state
        .extractor
        .extract(&mono)
        .map_err(|e| DetectError::Extraction(e.to_string()))?;

    state.detector.detect(&features)
}

/// First char uppercased, rest lowercased. This is what makes language
/// matching case-insensitive against the title-cased allow-list.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Rounds to two decimal places for the wire format, ties to even.
fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}
