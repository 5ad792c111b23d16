//! Conversion profile.
//!
//! [`AudioConfig`] carries every tunable of the encode path. It is read-only to
//! the pipeline; build one, validate it, then share it by reference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AudioError, AudioResult};

/// Sample rate of the telephony target, in Hz.
pub const TELEPHONY_RATE: u32 = 8000;

/// Anti-aliasing filter family applied before downsampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AntiAliasingType {
    /// First-order RC low-pass.
    #[default]
    Simple,
    /// Second-order Butterworth biquad.
    Butterworth,
    /// Third-order Bessel approximation.
    Bessel,
    /// Second-order Chebyshev Type I.
    Chebyshev,
}

impl AntiAliasingType {
    /// All filter families, in their numeric-code order.
    pub const ALL: [AntiAliasingType; 4] = [
        AntiAliasingType::Simple,
        AntiAliasingType::Butterworth,
        AntiAliasingType::Bessel,
        AntiAliasingType::Chebyshev,
    ];

    /// Lowercase name used on the command line and in JSON profiles.
    pub fn as_str(&self) -> &'static str {
        match self {
            AntiAliasingType::Simple => "simple",
            AntiAliasingType::Butterworth => "butterworth",
            AntiAliasingType::Bessel => "bessel",
            AntiAliasingType::Chebyshev => "chebyshev",
        }
    }

    /// The order the family is actually implemented at.
    ///
    /// `filter_order` in the config does not change these.
    pub fn fixed_order(&self) -> u32 {
        match self {
            AntiAliasingType::Simple => 1,
            AntiAliasingType::Butterworth | AntiAliasingType::Chebyshev => 2,
            AntiAliasingType::Bessel => 3,
        }
    }
}

impl fmt::Display for AntiAliasingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AntiAliasingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" | "0" => Ok(AntiAliasingType::Simple),
            "butterworth" | "1" => Ok(AntiAliasingType::Butterworth),
            "bessel" | "2" => Ok(AntiAliasingType::Bessel),
            "chebyshev" | "3" => Ok(AntiAliasingType::Chebyshev),
            _ => Err(format!(
                "unknown anti-aliasing type '{}', expected simple, butterworth, bessel or chebyshev",
                s
            )),
        }
    }
}

/// Audio processing configuration.
///
/// Missing fields in a JSON profile fall back to [`AudioConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Input sample rate in Hz. 0 uses the rate declared by the source.
    pub input_sample_rate: u32,
    /// Average all channels down to mono before processing.
    pub force_mono: bool,
    /// Low-pass cutoff in Hz (0 disables).
    pub low_pass_cutoff: f64,
    /// High-pass cutoff in Hz (0 disables).
    pub high_pass_cutoff: f64,
    /// Target peak level, 0.0-1.0 of full scale (0 disables).
    pub normalize_peak: f64,
    /// Compression ratio (1.0 disables).
    pub compression_ratio: f64,
    /// Compression threshold, 0.0-1.0 of full scale.
    pub compression_threshold: f64,
    /// Half-width of the resampling window in input samples.
    pub resampling_window_size: usize,
    /// Anti-aliasing cutoff as a fraction of the target Nyquist frequency.
    pub anti_aliasing_cutoff_ratio: f64,
    /// Anti-aliasing filter family.
    pub anti_aliasing_type: AntiAliasingType,
    /// Requested filter order, 2-6. See [`AntiAliasingType::fixed_order`].
    pub filter_order: u32,
    /// Passband ripple of the Chebyshev filter in dB.
    pub chebyshev_ripple: f64,
}

impl Default for AudioConfig {
    /// Telephone-bandwidth TTS profile.
    fn default() -> Self {
        Self {
            input_sample_rate: 0,
            force_mono: true,
            low_pass_cutoff: 3400.0,
            high_pass_cutoff: 200.0,
            normalize_peak: 0.95,
            compression_ratio: 1.5,
            compression_threshold: 0.5,
            resampling_window_size: 64,
            anti_aliasing_cutoff_ratio: 0.95,
            anti_aliasing_type: AntiAliasingType::Simple,
            filter_order: 2,
            chebyshev_ripple: 0.1,
        }
    }
}

impl AudioConfig {
    /// Narrower voice profile: 300 Hz high-pass, heavier compression and a
    /// Butterworth anti-aliasing stage with a smaller resampling window.
    pub fn voice() -> Self {
        Self {
            high_pass_cutoff: 300.0,
            normalize_peak: 0.9,
            compression_ratio: 2.0,
            compression_threshold: 0.5,
            resampling_window_size: 16,
            anti_aliasing_cutoff_ratio: 0.9,
            anti_aliasing_type: AntiAliasingType::Butterworth,
            filter_order: 4,
            chebyshev_ripple: 0.5,
            ..Self::default()
        }
    }

    /// Looks up a named profile (`default` or `voice`).
    pub fn profile(name: &str) -> AudioResult<Self> {
        match name {
            "default" => Ok(Self::default()),
            "voice" => Ok(Self::voice()),
            other => Err(AudioError::invalid_param(
                "profile",
                format!("unknown profile '{}', expected 'default' or 'voice'", other),
            )),
        }
    }

    /// Checks every option against its documented range.
    pub fn validate(&self) -> AudioResult<()> {
        check_cutoff("low_pass_cutoff", self.low_pass_cutoff)?;
        check_cutoff("high_pass_cutoff", self.high_pass_cutoff)?;

        if !(0.0..=1.0).contains(&self.normalize_peak) {
            return Err(AudioError::invalid_param(
                "normalize_peak",
                format!("must be 0.0-1.0, got {}", self.normalize_peak),
            ));
        }
        if !(self.compression_ratio >= 1.0 && self.compression_ratio.is_finite()) {
            return Err(AudioError::invalid_param(
                "compression_ratio",
                format!("must be a finite value >= 1.0, got {}", self.compression_ratio),
            ));
        }
        if !(0.0..=1.0).contains(&self.compression_threshold) {
            return Err(AudioError::invalid_param(
                "compression_threshold",
                format!("must be 0.0-1.0, got {}", self.compression_threshold),
            ));
        }
        if self.resampling_window_size == 0 {
            return Err(AudioError::invalid_param(
                "resampling_window_size",
                "must be a positive integer",
            ));
        }
        if !(self.anti_aliasing_cutoff_ratio > 0.0 && self.anti_aliasing_cutoff_ratio <= 1.0) {
            return Err(AudioError::invalid_param(
                "anti_aliasing_cutoff_ratio",
                format!(
                    "must be in (0.0, 1.0], got {}",
                    self.anti_aliasing_cutoff_ratio
                ),
            ));
        }
        if !(2..=6).contains(&self.filter_order) {
            return Err(AudioError::invalid_param(
                "filter_order",
                format!("must be 2-6, got {}", self.filter_order),
            ));
        }
        if !(self.chebyshev_ripple > 0.0 && self.chebyshev_ripple.is_finite()) {
            return Err(AudioError::invalid_param(
                "chebyshev_ripple",
                format!("must be a positive dB value, got {}", self.chebyshev_ripple),
            ));
        }

        Ok(())
    }

    /// Resolves the working input rate: the configured override, or the
    /// rate declared by the source when the override is 0.
    pub fn effective_input_rate(&self, declared: u32) -> u32 {
        if self.input_sample_rate > 0 {
            self.input_sample_rate
        } else {
            declared
        }
    }
}

fn check_cutoff(name: &str, value: f64) -> AudioResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AudioError::invalid_param(
            name,
            format!("must be a finite, non-negative frequency, got {}", value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_profile_is_valid() {
        let config = AudioConfig::default();
        config.validate().unwrap();
        assert_eq!(config.low_pass_cutoff, 3400.0);
        assert_eq!(config.high_pass_cutoff, 200.0);
        assert_eq!(config.anti_aliasing_type, AntiAliasingType::Simple);
        assert!(config.force_mono);
    }

    #[test]
    fn test_voice_profile_is_valid() {
        let config = AudioConfig::voice();
        config.validate().unwrap();
        assert_eq!(config.anti_aliasing_type, AntiAliasingType::Butterworth);
        assert_eq!(config.low_pass_cutoff, 3400.0);
    }

    #[test]
    fn test_profile_lookup() {
        assert_eq!(AudioConfig::profile("voice").unwrap(), AudioConfig::voice());
        let err = AudioConfig::profile("studio").unwrap_err();
        assert!(err.to_string().contains("studio"));
    }

    #[test]
    fn test_validate_rejects_bad_filter_order() {
        let config = AudioConfig {
            filter_order: 7,
            ..AudioConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("filter_order"));
    }

    #[test]
    fn test_validate_rejects_ratio_below_one() {
        let config = AudioConfig {
            compression_ratio: 0.5,
            ..AudioConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_window_and_ripple() {
        let config = AudioConfig {
            resampling_window_size: 0,
            ..AudioConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AudioConfig {
            chebyshev_ripple: 0.0,
            ..AudioConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_cutoff() {
        let config = AudioConfig {
            high_pass_cutoff: -10.0,
            ..AudioConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("high_pass_cutoff"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AudioConfig =
            serde_json::from_str(r#"{"anti_aliasing_type": "chebyshev", "filter_order": 4}"#)
                .unwrap();
        assert_eq!(config.anti_aliasing_type, AntiAliasingType::Chebyshev);
        assert_eq!(config.filter_order, 4);
        assert_eq!(config.resampling_window_size, 64);
    }

    #[test]
    fn test_anti_aliasing_type_parse() {
        for kind in AntiAliasingType::ALL {
            assert_eq!(kind.as_str().parse::<AntiAliasingType>().unwrap(), kind);
        }
        assert_eq!(
            "2".parse::<AntiAliasingType>().unwrap(),
            AntiAliasingType::Bessel
        );
        assert!("elliptic".parse::<AntiAliasingType>().is_err());
    }

    #[test]
    fn test_effective_input_rate() {
        let config = AudioConfig::default();
        assert_eq!(config.effective_input_rate(44100), 44100);

        let config = AudioConfig {
            input_sample_rate: 16000,
            ..AudioConfig::default()
        };
        assert_eq!(config.effective_input_rate(44100), 16000);
    }
}
