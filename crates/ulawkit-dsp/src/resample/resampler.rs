//! Windowed-sinc sample rate conversion.

use std::f64::consts::PI;
use std::sync::Arc;

use super::sinc_table::SincTableCache;

/// Blackman window of `2 * half_width + 1` taps.
///
/// Index `j + half_width` weights the input sample `j` positions away from
/// `floor(pos)`.
pub fn blackman_window(half_width: usize) -> Vec<f64> {
    let len = 2 * half_width + 1;
    if len == 1 {
        return vec![1.0];
    }

    let denom = (len - 1) as f64;
    (0..len)
        .map(|i| {
            let x = i as f64 / denom;
            0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
        })
        .collect()
}

fn is_valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

/// Number of output samples for a conversion: `round(len * out / in)`.
///
/// 0 when either rate is not a positive, finite number.
pub fn output_len(input_len: usize, input_rate: f64, output_rate: f64) -> usize {
    if !is_valid_rate(input_rate) || !is_valid_rate(output_rate) {
        return 0;
    }
    (input_len as f64 * output_rate / input_rate).round() as usize
}

/// Rate converter backed by a shared [`SincTableCache`].
///
/// Cloning is cheap and clones share the cache.
#[derive(Debug, Clone, Default)]
pub struct Resampler {
    cache: Arc<SincTableCache>,
}

impl Resampler {
    /// Creates a resampler with its own empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resampler over an existing cache.
    pub fn with_cache(cache: Arc<SincTableCache>) -> Self {
        Self { cache }
    }

    /// The sinc table cache this resampler draws from.
    pub fn cache(&self) -> &Arc<SincTableCache> {
        &self.cache
    }

    /// Converts `input` from `input_rate` to `output_rate`.
    ///
    /// Each output sample at input position `pos = i * in / out` is the
    /// weighted average of the inputs within `window_size` of `floor(pos)`,
    /// each weighted by `blackman(j) * sinc(pi * (pos - k))`. Inputs outside
    /// the buffer are skipped. Equal rates return the input unchanged; a rate
    /// that is not positive and finite yields an empty buffer.
    pub fn resample(
        &self,
        input: &[i16],
        input_rate: f64,
        output_rate: f64,
        window_size: usize,
    ) -> Vec<i16> {
        if !is_valid_rate(input_rate) || !is_valid_rate(output_rate) {
            log::warn!(
                "cannot resample {} Hz -> {} Hz, returning no samples",
                input_rate,
                output_rate
            );
            return Vec::new();
        }
        if input.is_empty() || input_rate == output_rate {
            return input.to_vec();
        }

        let ratio = output_rate / input_rate;
        let len = output_len(input.len(), input_rate, output_rate);
        let table = self.cache.get(window_size);
        let window = blackman_window(window_size);
        let half = window_size as isize;

        log::debug!(
            "resampling {} samples {} Hz -> {} Hz ({} out, window {})",
            input.len(),
            input_rate,
            output_rate,
            len,
            window_size
        );

        (0..len)
            .map(|i| {
                let pos = i as f64 / ratio;
                let idx = pos.floor() as isize;

                let (sum, weight_sum) = (-half..=half)
                    .filter_map(|j| {
                        let k = idx + j;
                        if k < 0 || k as usize >= input.len() {
                            return None;
                        }
                        let weight =
                            window[(j + half) as usize] * table.value(PI * (pos - k as f64));
                        Some((input[k as usize] as f64 * weight, weight))
                    })
                    .fold((0.0, 0.0), |(s, w), (ds, dw)| (s + ds, w + dw));

                let value = if weight_sum > 0.0 { sum / weight_sum } else { sum };
                value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
            })
            .collect()
    }
}
