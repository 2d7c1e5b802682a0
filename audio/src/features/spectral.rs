//! Frame-level spectral and temporal statistics.
//!
//! All functions operate on a magnitude spectrogram laid out as
//! `[frame][bin]` with `bin_hz = sample_rate / fft_size` spacing, or on the
//! raw time-domain signal for the zero-crossing rate.

/// Per-frame spectral centroid in Hz: magnitude-weighted mean frequency.
pub fn centroid(spectrogram: &[Vec<f64>], bin_hz: f64) -> Vec<f64> {
    spectrogram
        .iter()
        .map(|frame| {
            let total: f64 = frame.iter().sum();
            if total <= 0.0 {
                return 0.0;
            }
            let weighted: f64 = frame
                .iter()
                .enumerate()
                .map(|(k, &m)| k as f64 * bin_hz * m)
                .sum();
            weighted / total
        })
        .collect()
}

/// Per-frame spectral bandwidth in Hz: magnitude-weighted standard
/// deviation of frequency around the centroid.
pub fn bandwidth(spectrogram: &[Vec<f64>], bin_hz: f64) -> Vec<f64> {
    let centroids = centroid(spectrogram, bin_hz);
    spectrogram
        .iter()
        .zip(&centroids)
        .map(|(frame, &c)| {
            let total: f64 = frame.iter().sum();
            if total <= 0.0 {
                return 0.0;
            }
            let var: f64 = frame
                .iter()
                .enumerate()
                .map(|(k, &m)| {
                    let d = k as f64 * bin_hz - c;
                    m * d * d
                })
                .sum();
            (var / total).sqrt()
        })
        .collect()
}

/// Per-frame rolloff frequency: the lowest frequency below which
/// `fraction` of the total spectral magnitude is contained.
pub fn rolloff(spectrogram: &[Vec<f64>], bin_hz: f64, fraction: f64) -> Vec<f64> {
    spectrogram
        .iter()
        .map(|frame| {
            let total: f64 = frame.iter().sum();
            if total <= 0.0 {
                return 0.0;
            }
            let threshold = fraction * total;
            let mut acc = 0.0;
            for (k, &m) in frame.iter().enumerate() {
                acc += m;
                if acc >= threshold {
                    return k as f64 * bin_hz;
                }
            }
            (frame.len() - 1) as f64 * bin_hz
        })
        .collect()
}

/// Spectral contrast: per-band peak-to-valley spread in dB.
///
/// Bands are octaves starting at `fmin` (plus the sub-`fmin` band), giving
/// `n_bands + 1` rows per frame. Peak and valley are the mean of the top and
/// bottom `alpha` quantile of magnitudes within the band. Returns the
/// `[frame][band]` matrix; callers fold it to overall mean/std.
pub fn contrast(
    spectrogram: &[Vec<f64>],
    bin_hz: f64,
    fmin: f64,
    n_bands: usize,
) -> Vec<Vec<f64>> {
    const ALPHA: f64 = 0.02;
    const EPS: f64 = 1e-10;

    let half_fft = match spectrogram.first() {
        Some(frame) => frame.len(),
        None => return Vec::new(),
    };
    let nyquist = (half_fft - 1) as f64 * bin_hz;

    // Band edges: [0, fmin, 2*fmin, 4*fmin, ..., nyquist]
    let mut edges = vec![0.0, fmin];
    for b in 1..=n_bands {
        edges.push((fmin * (1u64 << b) as f64).min(nyquist));
    }
    let top = edges.len() - 1;
    edges[top] = nyquist;

    let mut rows = Vec::with_capacity(spectrogram.len());
    let mut band_buf: Vec<f64> = Vec::with_capacity(half_fft);
    for frame in spectrogram {
        let mut row = Vec::with_capacity(n_bands + 1);
        for b in 0..n_bands + 1 {
            let lo = (edges[b] / bin_hz).floor() as usize;
            let hi = ((edges[b + 1] / bin_hz).ceil() as usize).min(half_fft - 1);
            band_buf.clear();
            band_buf.extend_from_slice(&frame[lo..=hi.max(lo)]);
            band_buf.sort_by(|a, b| a.total_cmp(b));

            let q = ((ALPHA * band_buf.len() as f64).round() as usize).max(1);
            let valley: f64 = band_buf[..q].iter().sum::<f64>() / q as f64;
            let peak: f64 = band_buf[band_buf.len() - q..].iter().sum::<f64>() / q as f64;
            row.push(10.0 * ((peak + EPS) / (valley + EPS)).log10());
        }
        rows.push(row);
    }
    rows
}

/// Per-frame zero-crossing rate: fraction of adjacent sample pairs in the
/// frame whose signs differ.
pub fn zero_crossing_rate(pcm: &[f32], frame_length: usize, hop_length: usize) -> Vec<f64> {
    if pcm.len() < frame_length {
        // Single short frame
        return vec![count_crossings(pcm) as f64 / frame_length.max(1) as f64];
    }
    let num_frames = (pcm.len() - frame_length) / hop_length + 1;
    (0..num_frames)
        .map(|t| {
            let start = t * hop_length;
            let frame = &pcm[start..start + frame_length];
            count_crossings(frame) as f64 / frame_length as f64
        })
        .collect()
}

fn count_crossings(frame: &[f32]) -> usize {
    frame
        .windows(2)
        .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
        .count()
}

/// Chroma energy: folds spectral power onto the 12 pitch classes.
///
/// Each frame's chroma vector is normalized by its maximum (so the dominant
/// pitch class is 1.0). Returns the `[frame][12]` matrix.
pub fn chroma(spectrogram: &[Vec<f64>], bin_hz: f64) -> Vec<Vec<f64>> {
    let mut rows = Vec::with_capacity(spectrogram.len());
    for frame in spectrogram {
        let mut classes = [0.0f64; 12];
        for (k, &m) in frame.iter().enumerate().skip(1) {
            let f = k as f64 * bin_hz;
            if f < 20.0 {
                continue;
            }
            // MIDI pitch number, folded to a pitch class
            let pitch = 69.0 + 12.0 * (f / 440.0).log2();
            let class = (pitch.round() as i64).rem_euclid(12) as usize;
            classes[class] += m * m;
        }
        let max = classes.iter().cloned().fold(0.0f64, f64::max);
        if max > 0.0 {
            for c in classes.iter_mut() {
                *c /= max;
            }
        }
        rows.push(classes.to_vec());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One frame with all energy in a single bin.
    fn impulse_frame(bins: usize, at: usize) -> Vec<Vec<f64>> {
        let mut frame = vec![0.0f64; bins];
        frame[at] = 1.0;
        vec![frame]
    }

    #[test]
    fn test_centroid_single_bin() {
        let spec = impulse_frame(1025, 100);
        let c = centroid(&spec, 16000.0 / 2048.0);
        assert!((c[0] - 100.0 * 16000.0 / 2048.0).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_silence() {
        let spec = vec![vec![0.0f64; 1025]];
        assert_eq!(centroid(&spec, 7.8125)[0], 0.0);
    }

    #[test]
    fn test_bandwidth_single_bin_is_zero() {
        let spec = impulse_frame(1025, 100);
        let bw = bandwidth(&spec, 7.8125);
        assert!(bw[0].abs() < 1e-9);
    }

    #[test]
    fn test_rolloff_single_bin() {
        let spec = impulse_frame(1025, 200);
        let r = rolloff(&spec, 7.8125, 0.85);
        assert!((r[0] - 200.0 * 7.8125).abs() < 1e-9);
    }

    #[test]
    fn test_rolloff_monotone_in_fraction() {
        let spec = vec![(0..1025).map(|k| 1.0 / (1.0 + k as f64)).collect::<Vec<_>>()];
        let lo = rolloff(&spec, 7.8125, 0.5)[0];
        let hi = rolloff(&spec, 7.8125, 0.95)[0];
        assert!(hi >= lo);
    }

    #[test]
    fn test_contrast_shape() {
        let spec: Vec<Vec<f64>> = (0..3)
            .map(|t| (0..1025).map(|k| ((k + t) % 17) as f64).collect())
            .collect();
        let rows = contrast(&spec, 16000.0 / 2048.0, 200.0, 6);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].len(), 7);
        // Peak >= valley by construction
        assert!(rows.iter().flatten().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_zcr_alternating_signal() {
        // Sign flips on every sample: every adjacent pair crosses
        let pcm: Vec<f32> = (0..4096).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect();
        let z = zero_crossing_rate(&pcm, 2048, 512);
        assert!(!z.is_empty());
        assert!((z[0] - 2047.0 / 2048.0).abs() < 1e-9);
    }

    #[test]
    fn test_zcr_dc_signal() {
        let pcm = vec![0.7f32; 4096];
        let z = zero_crossing_rate(&pcm, 2048, 512);
        assert!(z.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_chroma_pitch_class_of_a440() {
        // 440 Hz is pitch class 9 (A)
        let bin_hz: f64 = 16000.0 / 2048.0;
        let bin = (440.0 / bin_hz).round() as usize;
        let spec = impulse_frame(1025, bin);
        let rows = chroma(&spec, bin_hz);
        assert_eq!(rows[0].len(), 12);
        let best = rows[0]
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap()
            .0;
        assert_eq!(best, 9);
        assert!((rows[0][9] - 1.0).abs() < 1e-12);
    }
}
