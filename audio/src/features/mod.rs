//! Acoustic feature extraction for voice classification.
//!
//! Produces the 173-element vector the classifier was trained on, in this
//! exact order:
//!
//! ```text
//! [  0.. 40)  MFCC mean        (40 coefficients)
//! [ 40.. 80)  MFCC std         (40)
//! [ 80..120)  MFCC max         (40)
//! [120..160)  MFCC min         (40)
//! [160..162)  spectral centroid  mean, std
//! [162..164)  spectral rolloff   mean, std
//! [164..166)  spectral contrast  mean, std
//! [166..168)  spectral bandwidth mean, std
//! [168..170)  zero-crossing rate mean, std
//! [170..172)  chroma energy      mean, std
//! [172]       tempo (BPM)
//! ```
//!
//! The order and count are load-bearing: they must match the statistics
//! used at training time or predictions are meaningless.

mod fft;
mod mel;
mod spectral;
mod tempo;

use crate::AudioError;

/// Expected input sample rate in Hz. Callers resample before extraction.
pub const SAMPLE_RATE: usize = 16000;

/// Total length of the assembled feature vector.
pub const FEATURE_LEN: usize = 173;

/// Configuration for the feature extractor.
#[derive(Debug, Clone)]
pub struct FeatureConfig {
    /// FFT size (power of two).
    pub n_fft: usize,
    /// Hop between successive analysis frames, in samples.
    pub hop_length: usize,
    /// Mel filterbank channels feeding the cepstrum.
    pub n_mels: usize,
    /// Cepstral coefficients kept per frame.
    pub n_mfcc: usize,
    /// Energy fraction for the rolloff frequency.
    pub rolloff_fraction: f64,
    /// Lowest octave-band edge for spectral contrast, in Hz.
    pub contrast_fmin: f64,
    /// Number of octave bands above `contrast_fmin`.
    pub contrast_bands: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            n_fft: 2048,
            hop_length: 512,
            n_mels: 128,
            n_mfcc: 40,
            rolloff_fraction: 0.85,
            contrast_fmin: 200.0,
            contrast_bands: 6,
        }
    }
}

/// Feature extractor with a precomputed analysis window and mel filterbank.
///
/// Stateless across calls; safe to share behind an `Arc`.
pub struct Extractor {
    cfg: FeatureConfig,
    window: Vec<f64>,
    mel_bank: Vec<Vec<f64>>,
}

impl Extractor {
    /// Creates an extractor for 16 kHz mono input.
    pub fn new(cfg: FeatureConfig) -> Self {
        let window = mel::hann_window(cfg.n_fft);
        let mel_bank = mel::mel_filter_bank(
            cfg.n_mels,
            cfg.n_fft,
            SAMPLE_RATE,
            0.0,
            SAMPLE_RATE as f64 / 2.0,
        );
        Self {
            cfg,
            window,
            mel_bank,
        }
    }

    /// Extracts the raw 173-element feature vector from 16 kHz mono PCM.
    ///
    /// The vector is un-normalized; the caller applies the pre-fitted
    /// scaler before inference.
    pub fn extract(&self, pcm: &[f32]) -> Result<Vec<f32>, AudioError> {
        let cfg = &self.cfg;
        if pcm.len() < cfg.hop_length {
            return Err(AudioError::TooShort {
                min_samples: cfg.hop_length,
                got_samples: pcm.len(),
            });
        }

        let spectrogram = self.stft(pcm);
        let bin_hz = SAMPLE_RATE as f64 / cfg.n_fft as f64;

        // Log mel spectrogram, shared by MFCC and tempo estimation
        let mel_db: Vec<Vec<f64>> = spectrogram
            .iter()
            .map(|frame| self.mel_power_db(frame))
            .collect();

        let mfcc: Vec<Vec<f64>> = mel_db
            .iter()
            .map(|frame| mel::dct_ortho(frame, cfg.n_mfcc))
            .collect();

        let mut out: Vec<f32> = Vec::with_capacity(FEATURE_LEN);

        // MFCC statistics, one block per statistic across all coefficients
        let mut means = Vec::with_capacity(cfg.n_mfcc);
        let mut stds = Vec::with_capacity(cfg.n_mfcc);
        let mut maxs = Vec::with_capacity(cfg.n_mfcc);
        let mut mins = Vec::with_capacity(cfg.n_mfcc);
        for c in 0..cfg.n_mfcc {
            let series: Vec<f64> = mfcc.iter().map(|frame| frame[c]).collect();
            let (mean, std) = mean_std(&series);
            means.push(mean);
            stds.push(std);
            maxs.push(series.iter().cloned().fold(f64::NEG_INFINITY, f64::max));
            mins.push(series.iter().cloned().fold(f64::INFINITY, f64::min));
        }
        for block in [&means, &stds, &maxs, &mins] {
            out.extend(block.iter().map(|&v| v as f32));
        }

        push_mean_std(&mut out, &spectral::centroid(&spectrogram, bin_hz));
        push_mean_std(
            &mut out,
            &spectral::rolloff(&spectrogram, bin_hz, cfg.rolloff_fraction),
        );

        let contrast = spectral::contrast(&spectrogram, bin_hz, cfg.contrast_fmin, cfg.contrast_bands);
        push_mean_std(&mut out, &flatten(&contrast));

        push_mean_std(&mut out, &spectral::bandwidth(&spectrogram, bin_hz));
        push_mean_std(
            &mut out,
            &spectral::zero_crossing_rate(pcm, cfg.n_fft, cfg.hop_length),
        );

        let chroma = spectral::chroma(&spectrogram, bin_hz);
        push_mean_std(&mut out, &flatten(&chroma));

        out.push(tempo::estimate(&mel_db, SAMPLE_RATE, cfg.hop_length) as f32);

        debug_assert_eq!(out.len(), FEATURE_LEN);
        Ok(out)
    }

    /// Magnitude spectrogram `[frame][n_fft/2 + 1]` with centered frames:
    /// the signal is zero-padded by `n_fft / 2` on both ends.
    fn stft(&self, pcm: &[f32]) -> Vec<Vec<f64>> {
        let cfg = &self.cfg;
        let half = cfg.n_fft / 2;
        let half_fft = half + 1;

        let mut padded = vec![0.0f64; pcm.len() + cfg.n_fft];
        for (i, &s) in pcm.iter().enumerate() {
            padded[half + i] = s as f64;
        }

        let num_frames = pcm.len() / cfg.hop_length + 1;
        let mut frames = Vec::with_capacity(num_frames);
        let mut windowed = vec![0.0f64; cfg.n_fft];
        let mut re = vec![0.0f64; cfg.n_fft];
        let mut im = vec![0.0f64; cfg.n_fft];

        for t in 0..num_frames {
            let start = t * cfg.hop_length;
            for i in 0..cfg.n_fft {
                windowed[i] = padded[start + i] * self.window[i];
            }
            let mut mag = vec![0.0f64; half_fft];
            fft::magnitude_spectrum(&windowed, &mut re, &mut im, &mut mag);
            frames.push(mag);
        }
        frames
    }

    /// Mel-filtered power spectrum of one frame, in dB with a noise floor.
    fn mel_power_db(&self, magnitudes: &[f64]) -> Vec<f64> {
        self.mel_bank
            .iter()
            .map(|filter| {
                let energy: f64 = filter
                    .iter()
                    .zip(magnitudes)
                    .map(|(&w, &m)| w * m * m)
                    .sum();
                10.0 * energy.max(1e-10).log10()
            })
            .collect()
    }
}

/// Population mean and standard deviation of a series.
fn mean_std(series: &[f64]) -> (f64, f64) {
    if series.is_empty() {
        return (0.0, 0.0);
    }
    let n = series.len() as f64;
    let mean = series.iter().sum::<f64>() / n;
    let var = series.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, var.sqrt())
}

fn push_mean_std(out: &mut Vec<f32>, series: &[f64]) {
    let (mean, std) = mean_std(series);
    out.push(mean as f32);
    out.push(std as f32);
}

fn flatten(matrix: &[Vec<f64>]) -> Vec<f64> {
    matrix.iter().flatten().cloned().collect()
}
