use thiserror::Error;

/// Request-time failures in the detection pipeline.
///
/// Every variant maps to the soft-error response; none of them should
/// terminate the process.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Extraction(String),

    #[error("{0}")]
    Inference(String),
}

/// Startup-time artifact loading failures. Fatal: the server must not
/// start serving traffic if an artifact is missing or malformed.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dimension mismatch: artifact fitted on {got} features, expected {expected}")]
    Dimension { expected: usize, got: usize },
}
