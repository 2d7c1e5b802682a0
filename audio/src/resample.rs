//! Whole-buffer sample rate conversion using rubato.

use rubato::{FftFixedInOut, Resampler};

use crate::features::SAMPLE_RATE;
use crate::AudioError;

impl From<rubato::ResamplerConstructionError> for AudioError {
    fn from(e: rubato::ResamplerConstructionError) -> Self {
        AudioError::Resample(e.to_string())
    }
}

impl From<rubato::ResampleError> for AudioError {
    fn from(e: rubato::ResampleError) -> Self {
        AudioError::Resample(e.to_string())
    }
}

/// Converts interleaved PCM at any rate/channel count to 16 kHz mono.
///
/// Channels are downmixed by averaging before rate conversion. The output
/// length is `round(frames * 16000 / sample_rate)`; the final resampler
/// chunk is zero-padded and the output truncated so repeated calls on the
/// same input are identical.
pub fn to_mono_16k(
    interleaved: &[f32],
    sample_rate: u32,
    channels: usize,
) -> Result<Vec<f32>, AudioError> {
    if interleaved.is_empty() || channels == 0 {
        return Err(AudioError::TooShort {
            min_samples: 1,
            got_samples: 0,
        });
    }

    let mono = downmix(interleaved, channels);
    if sample_rate == SAMPLE_RATE as u32 {
        return Ok(mono);
    }

    let chunk_size = 1024;
    let mut resampler =
        FftFixedInOut::<f32>::new(sample_rate as usize, SAMPLE_RATE, chunk_size, 1)?;

    let expected_len = ((mono.len() as f64) * SAMPLE_RATE as f64 / sample_rate as f64)
        .round() as usize;

    let mut out = Vec::with_capacity(expected_len + chunk_size);
    let mut pos = 0usize;
    let mut input = vec![vec![0.0f32; 0]; 1];

    while pos < mono.len() {
        let need = resampler.input_frames_next();
        input[0].clear();
        let take = need.min(mono.len() - pos);
        input[0].extend_from_slice(&mono[pos..pos + take]);
        input[0].resize(need, 0.0);
        pos += take;

        let chunks = resampler.process(&input, None)?;
        out.extend_from_slice(&chunks[0]);
    }

    // One flush pass so the resampler's internal delay drains.
    let need = resampler.input_frames_next();
    input[0].clear();
    input[0].resize(need, 0.0);
    let chunks = resampler.process(&input, None)?;
    out.extend_from_slice(&chunks[0]);

    out.truncate(expected_len);
    Ok(out)
}

/// Averages interleaved channels into a single mono channel.
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }
    let frames = interleaved.len() / channels;
    let mut mono = Vec::with_capacity(frames);
    for f in 0..frames {
        let mut acc = 0.0f32;
        for c in 0..channels {
            acc += interleaved[f * channels + c];
        }
        mono.push(acc / channels as f32);
    }
    mono
}
