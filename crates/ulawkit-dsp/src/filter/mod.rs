//! Filter bank: band limiting and anti-aliasing.
//!
//! Every filter works on samples normalized to `[-1, 1]` (divided by 32767),
//! runs its recurrence with fresh zeroed history, then rounds and clamps the
//! result back to 16 bits. Nothing carries state between calls.

mod design;
mod section;


use crate::config::{AntiAliasingType, AudioConfig};

pub use section::{apply_section, FilterState, SectionCoeffs};

/// First-order RC low-pass over a whole buffer.
pub fn low_pass(samples: &[i16], sample_rate: f64, cutoff: f64) -> Vec<i16> {
    apply_section(samples, &SectionCoeffs::rc_lowpass(cutoff, sample_rate))
}

/// First-order RC high-pass over a whole buffer.
pub fn high_pass(samples: &[i16], sample_rate: f64, cutoff: f64) -> Vec<i16> {
    apply_section(samples, &SectionCoeffs::rc_highpass(cutoff, sample_rate))
}

/// Coefficients of the configured anti-aliasing family at `cutoff`.
pub fn anti_aliasing_coeffs(
    kind: AntiAliasingType,
    cutoff: f64,
    sample_rate: f64,
    ripple_db: f64,
) -> SectionCoeffs {
    match kind {
        AntiAliasingType::Simple => SectionCoeffs::rc_lowpass(cutoff, sample_rate),
        AntiAliasingType::Butterworth => SectionCoeffs::butterworth_lowpass(cutoff, sample_rate),
        AntiAliasingType::Bessel => SectionCoeffs::bessel_lowpass(cutoff, sample_rate),
        AntiAliasingType::Chebyshev => {
            SectionCoeffs::chebyshev_lowpass(cutoff, sample_rate, ripple_db)
        }
    }
}

/// Cutoff of the anti-aliasing stage: the configured fraction of the target Nyquist.
pub fn anti_aliasing_cutoff(target_rate: f64, config: &AudioConfig) -> f64 {
    target_rate / 2.0 * config.anti_aliasing_cutoff_ratio
}

/// Applies the configured anti-aliasing filter ahead of downsampling.
///
/// Returns `None` when `source_rate <= target_rate`, since nothing can alias.
pub fn anti_alias(
    samples: &[i16],
    source_rate: f64,
    target_rate: f64,
    config: &AudioConfig,
) -> Option<Vec<i16>> {
    if source_rate <= target_rate {
        return None;
    }

    let kind = config.anti_aliasing_type;
    if kind != AntiAliasingType::Simple && config.filter_order != kind.fixed_order() {
        log::warn!(
            "{} filter runs at fixed order {}, ignoring filter_order {}",
            kind,
            kind.fixed_order(),
            config.filter_order
        );
    }

    let cutoff = anti_aliasing_cutoff(target_rate, config);
    let coeffs = anti_aliasing_coeffs(kind, cutoff, source_rate, config.chebyshev_ripple);
    Some(apply_section(samples, &coeffs))
}
