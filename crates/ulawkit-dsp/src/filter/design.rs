//! Coefficient design for the four filter families.
//!
//! The Butterworth, Bessel and Chebyshev sections come from the bilinear
//! transform of a normalized analog low-pass prototype, pre-warped with
//! `alpha = tan(wc / 2)`. Orders are fixed per family (2, 3 and 2).

use std::f64::consts::{PI, SQRT_2};

use super::section::SectionCoeffs;

/// Analog prototype coefficients of the third-order Bessel approximation:
/// `s^3 + 2.15 s^2 + 3.15 s + 1`.
const BESSEL_C2: f64 = 2.15;
const BESSEL_C1: f64 = 3.15;

/// Cutoffs are kept strictly inside (0, Nyquist) so `tan` stays finite.
fn clamp_cutoff(cutoff: f64, sample_rate: f64) -> f64 {
    cutoff.clamp(1e-3, sample_rate * 0.5 * 0.999)
}

/// Pre-warped analog frequency `tan(wc / 2)` with `wc = 2 pi fc / fs`.
fn prewarp(cutoff: f64, sample_rate: f64) -> f64 {
    let wc = 2.0 * PI * clamp_cutoff(cutoff, sample_rate) / sample_rate;
    (wc / 2.0).tan()
}

/// Bilinear transform of `1 / (s^2 + damping s + 1)`.
fn bilinear_second_order(k: f64, damping: f64) -> SectionCoeffs {
    let k2 = k * k;
    SectionCoeffs::normalized(
        [k2, 2.0 * k2, k2, 0.0],
        [
            1.0 + damping * k + k2,
            2.0 * (k2 - 1.0),
            1.0 - damping * k + k2,
            0.0,
        ],
    )
}

/// Bilinear transform of `1 / (s^3 + c2 s^2 + c1 s + 1)`.
fn bilinear_third_order(k: f64, c2: f64, c1: f64) -> SectionCoeffs {
    let k2 = k * k;
    let k3 = k2 * k;
    SectionCoeffs::normalized(
        [k3, 3.0 * k3, 3.0 * k3, k3],
        [
            1.0 + c2 * k + c1 * k2 + k3,
            -3.0 - c2 * k + c1 * k2 + 3.0 * k3,
            3.0 - c2 * k - c1 * k2 + 3.0 * k3,
            -1.0 + c2 * k - c1 * k2 + k3,
        ],
    )
}

impl SectionCoeffs {
    /// First-order RC low-pass: `y[n] = y[n-1] + alpha * (x[n] - y[n-1])`.
    pub fn rc_lowpass(cutoff: f64, sample_rate: f64) -> Self {
        let rc = 1.0 / (2.0 * PI * cutoff.max(1e-3));
        let dt = 1.0 / sample_rate;
        let alpha = dt / (rc + dt);

        Self {
            b0: alpha,
            a1: -(1.0 - alpha),
            ..Self::default()
        }
    }

    /// First-order RC high-pass: `y[n] = alpha * (y[n-1] + x[n] - x[n-1])`.
    pub fn rc_highpass(cutoff: f64, sample_rate: f64) -> Self {
        let rc = 1.0 / (2.0 * PI * cutoff.max(1e-3));
        let dt = 1.0 / sample_rate;
        let alpha = rc / (rc + dt);

        Self {
            b0: alpha,
            b1: -alpha,
            a1: -alpha,
            ..Self::default()
        }
    }

    /// Second-order Butterworth low-pass.
    pub fn butterworth_lowpass(cutoff: f64, sample_rate: f64) -> Self {
        bilinear_second_order(prewarp(cutoff, sample_rate), SQRT_2)
    }

    /// Third-order Bessel low-pass approximation.
    pub fn bessel_lowpass(cutoff: f64, sample_rate: f64) -> Self {
        bilinear_third_order(prewarp(cutoff, sample_rate), BESSEL_C2, BESSEL_C1)
    }

    /// Second-order Chebyshev Type I low-pass with `ripple_db` of passband ripple.
    pub fn chebyshev_lowpass(cutoff: f64, sample_rate: f64, ripple_db: f64) -> Self {
        // A ripple of 0 dB would make epsilon 0 and v0 infinite.
        let ripple_db = ripple_db.max(1e-6);
        let epsilon = (10.0_f64.powf(ripple_db / 10.0) - 1.0).sqrt();
        let v0 = (1.0 / epsilon).asinh() / 2.0;

        bilinear_second_order(prewarp(cutoff, sample_rate), 2.0 * v0.sinh())
    }
}
