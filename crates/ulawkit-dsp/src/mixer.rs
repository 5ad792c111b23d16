//! Channel mixing: interleaved multi-channel to mono.

use crate::wav::PcmFormat;

/// Widens a channel average into the signed 16-bit range.
///
/// 8-bit sources arrive centred on zero in `[-128, 127]`; shifting the
/// offset-binary value `avg + 128` into the high byte and re-centring gives
/// `avg << 8`.
#[inline]
fn widen(avg: i32, bits_per_sample: u16) -> i16 {
    if bits_per_sample == 8 {
        (((avg + 128) << 8) - 0x8000) as i16
    } else {
        avg as i16
    }
}

/// Averages interleaved channels into one sample per frame.
///
/// Each output sample is the integer-truncated mean of the frame. A trailing
/// partial frame is dropped.
///
/// # Arguments
/// * `samples` - Interleaved samples
/// * `channels` - Number of interleaved channels
/// * `bits_per_sample` - Source bit depth (8-bit values are widened)
pub fn mix_to_mono(samples: &[i16], channels: u16, bits_per_sample: u16) -> Vec<i16> {
    let channels = channels.max(1) as usize;

    samples
        .chunks_exact(channels)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            widen(sum / channels as i32, bits_per_sample)
        })
        .collect()
}

/// Extracts one channel from an interleaved buffer, widening 8-bit values.
pub fn extract_channel(
    samples: &[i16],
    channels: u16,
    index: usize,
    bits_per_sample: u16,
) -> Vec<i16> {
    let channels = channels.max(1) as usize;

    samples
        .chunks_exact(channels)
        .filter_map(|frame| frame.get(index))
        .map(|&s| widen(s as i32, bits_per_sample))
        .collect()
}

/// Produces the single channel the rest of the pipeline works on.
///
/// With `force_mono` all channels are averaged. Otherwise only channel 0
/// continues; the other channels are discarded.
pub fn to_working_channel(samples: &[i16], format: &PcmFormat, force_mono: bool) -> Vec<i16> {
    if format.channels <= 1 {
        return extract_channel(samples, 1, 0, format.bits_per_sample);
    }

    if force_mono {
        log::debug!("mixing {} channels to mono", format.channels);
        mix_to_mono(samples, format.channels, format.bits_per_sample)
    } else {
        log::warn!(
            "force_mono is off; keeping channel 0 of {} and discarding the rest",
            format.channels
        );
        extract_channel(samples, format.channels, 0, format.bits_per_sample)
    }
}
