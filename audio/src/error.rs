use thiserror::Error;

/// Errors returned by the audio pipeline.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("decode error: {0}")]
    Decode(String),

    #[error("no audio track found")]
    NoAudioTrack,

    #[error("resample error: {0}")]
    Resample(String),

    #[error("audio too short: need at least {min_samples} samples, got {got_samples}")]
    TooShort {
        min_samples: usize,
        got_samples: usize,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
