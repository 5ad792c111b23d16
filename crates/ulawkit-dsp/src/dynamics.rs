//! Dynamics processing: static compression and peak normalization.

use crate::error::{AudioError, AudioResult};

const FULL_SCALE: f64 = 32767.0;

fn to_pcm16(value: f64) -> i16 {
    value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Peak absolute sample value of a buffer.
pub fn peak(samples: &[i16]) -> u16 {
    samples.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0)
}

/// Static (instantaneous) compressor.
///
/// Samples whose magnitude exceeds `threshold * 32767` are pulled toward the
/// threshold by `ratio`; everything below passes unchanged. A ratio of 1 is
/// the identity.
pub fn compress(samples: &[i16], ratio: f64, threshold: f64) -> Vec<i16> {
    let knee = threshold * FULL_SCALE;

    samples
        .iter()
        .map(|&s| {
            let x = s as f64;
            let magnitude = x.abs();
            if magnitude <= knee {
                s
            } else {
                to_pcm16(x.signum() * (knee + (magnitude - knee) / ratio))
            }
        })
        .collect()
}

/// Scales a buffer so its peak magnitude becomes `peak_level * 32767`.
///
/// # Errors
///
/// Returns [`AudioError::DegenerateSignal`] for a silent (all-zero or empty)
/// buffer, where no gain can reach the target.
pub fn normalize(samples: &[i16], peak_level: f64) -> AudioResult<Vec<i16>> {
    let current = peak(samples);
    if current == 0 {
        return Err(AudioError::degenerate("normalized"));
    }

    let gain = peak_level * FULL_SCALE / current as f64;
    Ok(samples.iter().map(|&s| to_pcm16(s as f64 * gain)).collect())
}
