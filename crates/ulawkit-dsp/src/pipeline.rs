//! Conversion orchestrator.
//!
//! Encode path:
//! `Decoded -> Mixed -> HighPassed -> LowPassed -> AntiAliased -> Resampled
//! -> Compressed -> Normalized -> Encoded`.
//!
//! Decode path: `Decoded -> Resampled`.
//!
//! Every stage is a pure function of the buffer and the config. A stage whose
//! governing parameter is disabled is skipped and does not appear in the
//! report.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::config::{AudioConfig, TELEPHONY_RATE};
use crate::dynamics;
use crate::error::{AudioError, AudioResult};
use crate::filter;
use crate::mixer;
use crate::resample::{Resampler, SincTableCache};
use crate::wav::{self, PcmFormat};

/// A pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Decoded,
    Mixed,
    HighPassed,
    LowPassed,
    AntiAliased,
    Resampled,
    Compressed,
    Normalized,
    Encoded,
}

impl Stage {
    /// Stage name used in logs and error context.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Decoded => "decoded",
            Stage::Mixed => "mixed",
            Stage::HighPassed => "high_passed",
            Stage::LowPassed => "low_passed",
            Stage::AntiAliased => "anti_aliased",
            Stage::Resampled => "resampled",
            Stage::Compressed => "compressed",
            Stage::Normalized => "normalized",
            Stage::Encoded => "encoded",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the encode path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeResult {
    /// μ-law bytes, one per sample.
    #[serde(skip)]
    pub data: Vec<u8>,
    /// Rate of `data`; always 8000 Hz.
    pub sample_rate: u32,
    /// Stages applied, in order.
    pub stages: Vec<Stage>,
}

/// Output of the decode path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult {
    /// Linear 16-bit mono samples.
    pub samples: Vec<i16>,
    /// Rate of `samples`.
    pub sample_rate: u32,
}

/// Runs the encode and decode paths.
///
/// Holds the [`Resampler`] and with it the sinc table cache, so reusing one
/// transcoder (or cloning it) reuses precomputed tables across conversions.
#[derive(Debug, Clone, Default)]
pub struct Transcoder {
    resampler: Resampler,
}

impl Transcoder {
    /// Creates a transcoder with a fresh cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transcoder drawing from an existing cache.
    pub fn with_cache(cache: Arc<SincTableCache>) -> Self {
        Self {
            resampler: Resampler::with_cache(cache),
        }
    }

    /// The resampler used for rate conversion.
    pub fn resampler(&self) -> &Resampler {
        &self.resampler
    }

    /// Encodes interleaved linear samples to 8 kHz mono μ-law.
    ///
    /// `format.sample_rate` is used unless `config.input_sample_rate` overrides it.
    ///
    /// # Errors
    /// - [`AudioError::InvalidParameter`] when the config fails validation
    /// - [`AudioError::EncodeFailure`] for an empty buffer, a zero channel
    ///   count or an unknown input rate
    pub fn encode(
        &self,
        samples: &[i16],
        format: PcmFormat,
        config: &AudioConfig,
    ) -> AudioResult<EncodeResult> {
        config.validate()?;

        if samples.is_empty() {
            return Err(AudioError::encode_failure("input", "sample buffer is empty"));
        }
        if format.channels == 0 {
            return Err(AudioError::encode_failure("input", "channel count is 0"));
        }
        let input_rate = config.effective_input_rate(format.sample_rate);
        if input_rate == 0 {
            return Err(AudioError::encode_failure(
                "input",
                "sample rate is unknown (0) and no override is configured",
            ));
        }

        let mut stages = vec![Stage::Decoded];
        let rate = input_rate as f64;
        let target = TELEPHONY_RATE as f64;

        let mut buffer = mixer::to_working_channel(samples, &format, config.force_mono);
        if buffer.is_empty() {
            return Err(AudioError::encode_failure(
                Stage::Mixed,
                format!(
                    "{} samples do not fill a single {}-channel frame",
                    samples.len(),
                    format.channels
                ),
            ));
        }
        stages.push(Stage::Mixed);

        if config.high_pass_cutoff > 0.0 {
            log::debug!("high-pass at {} Hz", config.high_pass_cutoff);
            buffer = filter::high_pass(&buffer, rate, config.high_pass_cutoff);
            stages.push(Stage::HighPassed);
        }

        if config.low_pass_cutoff > 0.0 {
            log::debug!("low-pass at {} Hz", config.low_pass_cutoff);
            buffer = filter::low_pass(&buffer, rate, config.low_pass_cutoff);
            stages.push(Stage::LowPassed);
        }

        if let Some(filtered) = filter::anti_alias(&buffer, rate, target, config) {
            log::debug!(
                "{} anti-aliasing at {} Hz",
                config.anti_aliasing_type,
                filter::anti_aliasing_cutoff(target, config)
            );
            buffer = filtered;
            stages.push(Stage::AntiAliased);
        }

        if input_rate != TELEPHONY_RATE {
            buffer = self
                .resampler
                .resample(&buffer, rate, target, config.resampling_window_size);
            stages.push(Stage::Resampled);
        }

        if config.compression_ratio > 1.0 {
            log::debug!(
                "compressing {}:1 above {}",
                config.compression_ratio,
                config.compression_threshold
            );
            buffer = dynamics::compress(
                &buffer,
                config.compression_ratio,
                config.compression_threshold,
            );
            stages.push(Stage::Compressed);
        }

        if config.normalize_peak > 0.0 {
            match dynamics::normalize(&buffer, config.normalize_peak) {
                Ok(normalized) => {
                    buffer = normalized;
                    stages.push(Stage::Normalized);
                }
                Err(AudioError::DegenerateSignal { .. }) => {
                    log::debug!("signal is silent, skipping normalization");
                }
                Err(e) => return Err(e),
            }
        }

        let data = codec::encode(&buffer);
        stages.push(Stage::Encoded);

        log::debug!(
            "encoded {} frames at {} Hz into {} bytes",
            samples.len() / format.channels as usize,
            input_rate,
            data.len()
        );

        Ok(EncodeResult {
            data,
            sample_rate: TELEPHONY_RATE,
            stages,
        })
    }

    /// Decodes 8 kHz μ-law to linear samples at `output_rate`.
    ///
    /// Resamples only when `output_rate` is not 8000.
    ///
    /// # Errors
    /// - [`AudioError::DecodeFailure`] for empty input
    /// - [`AudioError::InvalidParameter`] for a zero rate or window size
    pub fn decode(
        &self,
        ulaw: &[u8],
        output_rate: u32,
        window_size: usize,
    ) -> AudioResult<DecodeResult> {
        if ulaw.is_empty() {
            return Err(AudioError::decode_failure("input", "μ-law buffer is empty"));
        }
        if output_rate == 0 {
            return Err(AudioError::invalid_param(
                "sample_rate",
                "output rate must be positive",
            ));
        }
        if window_size == 0 {
            return Err(AudioError::invalid_param(
                "window_size",
                "must be a positive integer",
            ));
        }

        let mut samples = codec::decode(ulaw);
        if output_rate != TELEPHONY_RATE {
            samples = self.resampler.resample(
                &samples,
                TELEPHONY_RATE as f64,
                output_rate as f64,
                window_size,
            );
        }

        log::debug!(
            "decoded {} bytes into {} samples at {} Hz",
            ulaw.len(),
            samples.len(),
            output_rate
        );

        Ok(DecodeResult {
            samples,
            sample_rate: output_rate,
        })
    }

    /// Reads a WAV file from memory and encodes it.
    pub fn encode_wav(&self, wav_bytes: &[u8], config: &AudioConfig) -> AudioResult<EncodeResult> {
        let input = wav::read_pcm(wav_bytes)?;
        log::debug!(
            "read {} frames, {} channel(s), {} Hz, {}-bit",
            input.frames(),
            input.format.channels,
            input.format.sample_rate,
            input.format.bits_per_sample
        );
        self.encode(&input.samples, input.format, config)
    }

    /// Decodes μ-law and wraps the result in a 16-bit mono WAV file.
    pub fn decode_to_wav(
        &self,
        ulaw: &[u8],
        output_rate: u32,
        window_size: usize,
    ) -> AudioResult<Vec<u8>> {
        let decoded = self.decode(ulaw, output_rate, window_size)?;
        Ok(wav::mono_wav(&decoded.samples, decoded.sample_rate))
    }
}

/// Encodes interleaved samples with a one-off [`Transcoder`].
///
/// Every call starts from an empty sinc table cache, so a resampled input pays
/// for building its table each time. Callers converting more than one buffer
/// should hold a [`Transcoder`], or share a cache through
/// [`Transcoder::with_cache`].
pub fn encode(
    samples: &[i16],
    input_rate: u32,
    channels: u16,
    config: &AudioConfig,
) -> AudioResult<Vec<u8>> {
    Transcoder::new()
        .encode(samples, PcmFormat::interleaved(input_rate, channels), config)
        .map(|result| result.data)
}

/// Decodes μ-law with a one-off [`Transcoder`].
///
/// Like [`encode`], this builds a fresh sinc table cache on every call that
/// resamples. Use a long-lived [`Transcoder`] for repeated decodes.
pub fn decode(ulaw: &[u8], output_rate: u32, window_size: usize) -> AudioResult<Vec<i16>> {
    Transcoder::new()
        .decode(ulaw, output_rate, window_size)
        .map(|result| result.samples)
}
