//! In-place radix-2 Cooley-Tukey FFT.

use std::f64::consts::PI;

/// Performs an in-place radix-2 FFT over `real`/`imag`.
/// Both slices must share the same power-of-two length.
pub fn fft(real: &mut [f64], imag: &mut [f64]) {
    let n = real.len();
    debug_assert_eq!(n, imag.len());
    debug_assert!(n.is_power_of_two());
    if n <= 1 {
        return;
    }

    // Bit-reversal permutation
    let mut j = 0usize;
    for i in 0..n - 1 {
        if i < j {
            real.swap(i, j);
            imag.swap(i, j);
        }
        let mut k = n >> 1;
        while k <= j {
            j -= k;
            k >>= 1;
        }
        j += k;
    }

    // Butterfly stages
    let mut size = 2;
    while size <= n {
        let half = size >> 1;
        let angle = -2.0 * PI / size as f64;
        let (w_r, w_i) = (angle.cos(), angle.sin());

        let mut start = 0;
        while start < n {
            let (mut t_r, mut t_i) = (1.0f64, 0.0f64);
            for k in 0..half {
                let a = start + k;
                let b = a + half;
                let x_r = real[b] * t_r - imag[b] * t_i;
                let x_i = real[b] * t_i + imag[b] * t_r;
                real[b] = real[a] - x_r;
                imag[b] = imag[a] - x_i;
                real[a] += x_r;
                imag[a] += x_i;
                let nt_r = t_r * w_r - t_i * w_i;
                t_i = t_r * w_i + t_i * w_r;
                t_r = nt_r;
            }
            start += size;
        }
        size <<= 1;
    }
}

/// Computes the magnitude spectrum (first `n/2 + 1` bins) of a real frame.
///
/// `scratch_re`/`scratch_im` must be `frame.len()` long; `out` must be
/// `frame.len() / 2 + 1` long. Reusing scratch across frames avoids
/// per-frame allocation in the STFT loop.
pub fn magnitude_spectrum(
    frame: &[f64],
    scratch_re: &mut [f64],
    scratch_im: &mut [f64],
    out: &mut [f64],
) {
    scratch_re.copy_from_slice(frame);
    for v in scratch_im.iter_mut() {
        *v = 0.0;
    }
    fft(scratch_re, scratch_im);
    for (k, o) in out.iter_mut().enumerate() {
        *o = (scratch_re[k] * scratch_re[k] + scratch_im[k] * scratch_im[k]).sqrt();
    }
}
