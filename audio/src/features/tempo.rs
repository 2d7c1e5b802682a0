//! Global tempo estimation from a mel spectrogram.

const MIN_BPM: f64 = 30.0;
const MAX_BPM: f64 = 300.0;
const START_BPM: f64 = 120.0;

/// Onset strength envelope: mean positive spectral flux of the dB mel
/// spectrogram between consecutive frames. One value per frame transition.
pub fn onset_envelope(mel_db: &[Vec<f64>]) -> Vec<f64> {
    if mel_db.len() < 2 {
        return Vec::new();
    }
    let bins = mel_db[0].len() as f64;
    mel_db
        .windows(2)
        .map(|w| {
            w[1].iter()
                .zip(&w[0])
                .map(|(&cur, &prev)| (cur - prev).max(0.0))
                .sum::<f64>()
                / bins
        })
        .collect()
}

/// Estimates a single tempo value in BPM.
///
/// Autocorrelates the onset envelope and scores candidate lags in the
/// 30-300 BPM range with a log-normal prior centered at 120 BPM, the usual
/// beat-tracking convention. Degenerate input (too short or silent) falls
/// back to the prior center.
pub fn estimate(mel_db: &[Vec<f64>], sample_rate: usize, hop_length: usize) -> f64 {
    let env = onset_envelope(mel_db);
    estimate_from_envelope(&env, sample_rate, hop_length)
}

fn estimate_from_envelope(env: &[f64], sample_rate: usize, hop_length: usize) -> f64 {
    let frames_per_sec = sample_rate as f64 / hop_length as f64;
    let min_lag = ((60.0 / MAX_BPM) * frames_per_sec).floor().max(1.0) as usize;
    let max_lag = ((60.0 / MIN_BPM) * frames_per_sec).ceil() as usize;

    if env.len() <= min_lag + 1 {
        return START_BPM;
    }
    let max_lag = max_lag.min(env.len() - 1);

    let energy: f64 = env.iter().map(|v| v * v).sum();
    if energy <= 0.0 {
        return START_BPM;
    }

    let mut best_bpm = START_BPM;
    let mut best_score = f64::NEG_INFINITY;
    for lag in min_lag..=max_lag {
        let ac: f64 = env[lag..]
            .iter()
            .zip(env)
            .map(|(&a, &b)| a * b)
            .sum::<f64>()
            / energy;

        let bpm = 60.0 * frames_per_sec / lag as f64;
        let log_dev = (bpm / START_BPM).log2();
        let prior = (-0.5 * log_dev * log_dev).exp();
        let score = ac * prior;
        if score > best_score {
            best_score = score;
            best_bpm = bpm;
        }
    }
    best_bpm
}
