//! Audio front-end for voice classification.
//!
//! This crate turns an MP3 file into the fixed 173-element acoustic feature
//! vector the classifier was trained on:
//!
//! 1. [`codec::decode_mp3`]: MP3 file -> interleaved f32 PCM + sample rate
//! 2. [`resample::to_mono_16k`]: any rate/channels -> 16 kHz mono
//! 3. [`features::Extractor::extract`]: PCM -> `[f32; 173]` feature vector
//!
//! The feature order and count must match training exactly; see
//! [`features::FEATURE_LEN`] and the layout documented on the [`features`]
//! module.

pub mod codec;
pub mod features;
pub mod resample;

mod error;

pub use error::AudioError;
pub use features::{Extractor, FeatureConfig, FEATURE_LEN, SAMPLE_RATE};
