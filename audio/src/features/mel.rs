//! Mel-scale filterbank, analysis window and DCT for cepstral features.

use std::f64::consts::PI;

/// Generates a periodic Hann window of the given length.
pub fn hann_window(n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![1.0; n];
    }
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / n as f64).cos())
        .collect()
}

/// Converts frequency in Hz to mel scale (HTK formula).
pub fn hz_to_mel(hz: f64) -> f64 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Converts mel scale frequency back to Hz.
pub fn mel_to_hz(mel: f64) -> f64 {
    700.0 * (10.0_f64.powf(mel / 2595.0) - 1.0)
}

/// Creates a triangular mel filterbank.
///
/// Returns `[num_mels][half_fft]` where `half_fft = fft_size / 2 + 1`.
/// Filters span `low_freq..high_freq` on the mel scale.
pub fn mel_filter_bank(
    num_mels: usize,
    fft_size: usize,
    sample_rate: usize,
    low_freq: f64,
    high_freq: f64,
) -> Vec<Vec<f64>> {
    let half_fft = fft_size / 2 + 1;
    let low_mel = hz_to_mel(low_freq);
    let high_mel = hz_to_mel(high_freq);

    // num_mels + 2 equally spaced mel points define the triangle edges
    let step = (high_mel - low_mel) / (num_mels + 1) as f64;
    let hz_points: Vec<f64> = (0..num_mels + 2)
        .map(|i| mel_to_hz(low_mel + i as f64 * step))
        .collect();

    let bin_hz = sample_rate as f64 / fft_size as f64;
    let mut bank = Vec::with_capacity(num_mels);
    for m in 0..num_mels {
        let (left, center, right) = (hz_points[m], hz_points[m + 1], hz_points[m + 2]);
        let mut filter = vec![0.0f64; half_fft];
        for (k, w) in filter.iter_mut().enumerate() {
            let f = k as f64 * bin_hz;
            if f > left && f < center {
                *w = (f - left) / (center - left);
            } else if f >= center && f < right {
                *w = (right - f) / (right - center);
            }
        }
        bank.push(filter);
    }
    bank
}

/// Orthonormal DCT-II over `input`, keeping the first `num_coeffs` terms.
///
/// Matches the scipy `dct(type=2, norm="ortho")` convention used for MFCCs.
pub fn dct_ortho(input: &[f64], num_coeffs: usize) -> Vec<f64> {
    let n = input.len();
    let scale0 = (1.0 / n as f64).sqrt();
    let scale = (2.0 / n as f64).sqrt();

    (0..num_coeffs.min(n))
        .map(|k| {
            let sum: f64 = input
                .iter()
                .enumerate()
                .map(|(i, &x)| x * (PI * k as f64 * (2.0 * i as f64 + 1.0) / (2.0 * n as f64)).cos())
                .sum();
            if k == 0 {
                sum * scale0
            } else {
                sum * scale
            }
        })
        .collect()
}
