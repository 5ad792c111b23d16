//! Property-based tests for the DSP stages using proptest.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ulawkit-dsp --test proptest_properties
//! ```

use proptest::prelude::*;

use ulawkit_dsp::codec::{decode_sample, encode_sample, quantization_step};
use ulawkit_dsp::config::AntiAliasingType;
use ulawkit_dsp::dynamics::{normalize, peak};
use ulawkit_dsp::filter::{anti_aliasing_coeffs, apply_section, high_pass, low_pass};
use ulawkit_dsp::mixer::mix_to_mono;
use ulawkit_dsp::wav::PcmFormat;
use ulawkit_dsp::{AudioConfig, Resampler, Transcoder};

fn samples(max_len: usize) -> impl Strategy<Value = Vec<i16>> {
    prop::collection::vec(any::<i16>(), 1..max_len)
}

fn sample_rate() -> impl Strategy<Value = f64> {
    prop::sample::select(vec![8000.0, 11025.0, 16000.0, 22050.0, 44100.0, 48000.0, 96000.0])
}

fn family() -> impl Strategy<Value = AntiAliasingType> {
    prop::sample::select(AntiAliasingType::ALL.to_vec())
}

// ============================================================================
// 1. μ-law codec
// ============================================================================

proptest! {
    /// Decoding an encoded sample lands within one segment step of the input.
    #[test]
    fn ulaw_round_trip_within_step(x in any::<i16>()) {
        let byte = encode_sample(x);
        let err = (decode_sample(byte) as i32 - x as i32).abs();
        prop_assert!(err <= quantization_step(byte), "{} -> {:#04x}, err {}", x, byte, err);
    }

    /// The sign survives companding.
    #[test]
    fn ulaw_preserves_sign(x in any::<i16>()) {
        let y = decode_sample(encode_sample(x));
        prop_assert!(y == 0 || (y > 0) == (x > 0), "{} -> {}", x, y);
    }
}

// ============================================================================
// 2. Filter stability
// ============================================================================

proptest! {
    /// Any cutoff inside (0, Nyquist) gives finite coefficients and an output
    /// as long as the input.
    #[test]
    fn filters_are_stable(
        input in samples(2000),
        rate in sample_rate(),
        fraction in 0.0001f64..0.4999,
        ripple in 0.01f64..3.0,
        kind in family(),
    ) {
        let cutoff = rate * fraction;
        let coeffs = anti_aliasing_coeffs(kind, cutoff, rate, ripple);
        prop_assert!(coeffs.is_finite(), "{} at {} Hz / {} Hz", kind, cutoff, rate);

        let output = apply_section(&input, &coeffs);
        prop_assert_eq!(output.len(), input.len());
    }

    /// RC band limiting never changes the length and is deterministic.
    #[test]
    fn rc_filters_are_pure(
        input in samples(1000),
        rate in sample_rate(),
        fraction in 0.0001f64..0.4999,
    ) {
        let cutoff = rate * fraction;
        let lp = low_pass(&input, rate, cutoff);
        let hp = high_pass(&input, rate, cutoff);
        prop_assert_eq!(lp.len(), input.len());
        prop_assert_eq!(hp.len(), input.len());
        prop_assert_eq!(lp, low_pass(&input, rate, cutoff));
    }
}

// ============================================================================
// 3. Dynamics
// ============================================================================

proptest! {
    /// Normalizing a non-silent buffer puts its peak at round(level * 32767).
    #[test]
    fn normalization_hits_target(input in samples(1000), level in 0.01f64..=1.0) {
        prop_assume!(input.iter().any(|&s| s != 0));

        let output = normalize(&input, level).unwrap();
        let target = (level * 32767.0).round() as i32;
        let got = peak(&output) as i32;
        prop_assert!((got - target).abs() <= 1, "peak {} target {}", got, target);
    }
}

// ============================================================================
// 4. Resampler and mixer
// ============================================================================

proptest! {
    /// Resampling to the same rate returns the buffer unchanged.
    #[test]
    fn resampler_identity(input in samples(500), rate in sample_rate(), window in 1usize..64) {
        let output = Resampler::new().resample(&input, rate, rate, window);
        prop_assert_eq!(output, input);
    }

    /// Output length is round(len * out / in).
    #[test]
    fn resampler_length(len in 1usize..2000, from in sample_rate(), to in sample_rate()) {
        let input = vec![0i16; len];
        let output = Resampler::new().resample(&input, from, to, 8);
        prop_assert_eq!(output.len(), (len as f64 * to / from).round() as usize);
    }

    /// N identical channels of a constant mix to that constant.
    #[test]
    fn mono_downmix_of_identical_channels(v in any::<i16>(), channels in 1u16..8, frames in 1usize..200) {
        let interleaved = vec![v; frames * channels as usize];
        let mono = mix_to_mono(&interleaved, channels, 16);
        prop_assert_eq!(mono, vec![v; frames]);
    }

    /// 8-bit sources are widened to the high byte.
    #[test]
    fn mono_downmix_widens_8bit(v in -128i16..=127, channels in 1u16..8) {
        let mono = mix_to_mono(&vec![v; channels as usize * 4], channels, 8);
        prop_assert_eq!(mono, vec![v * 256; 4]);
    }
}

// ============================================================================
// 5. Pipeline
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Encoding is deterministic and emits one byte per 8 kHz sample.
    #[test]
    fn encode_is_deterministic(input in samples(3000), rate in sample_rate()) {
        let transcoder = Transcoder::new();
        let config = AudioConfig::default();
        let format = PcmFormat::mono(rate as u32);

        let first = transcoder.encode(&input, format, &config).unwrap();
        let second = transcoder.encode(&input, format, &config).unwrap();

        let expected_len = if rate as u32 == 8000 {
            input.len()
        } else {
            (input.len() as f64 * 8000.0 / rate).round() as usize
        };
        prop_assert_eq!(first.data.len(), expected_len);
        prop_assert_eq!(first, second);
    }
}
