//! WAV container decoding.

use std::io::Cursor;

use crate::error::{AudioError, AudioResult};

use super::format::PcmFormat;

/// Interleaved samples and the layout they were read with.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmInput {
    /// Interleaved samples. 8-bit sources stay in `[-128, 127]`.
    pub samples: Vec<i16>,
    /// Source layout.
    pub format: PcmFormat,
}

impl PcmInput {
    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.format.channels.max(1) as usize
    }

    /// Duration in seconds at the declared sample rate.
    pub fn duration_seconds(&self) -> f64 {
        self.frames() as f64 / self.format.sample_rate as f64
    }
}

/// Parses a RIFF/WAVE byte buffer into interleaved linear samples.
///
/// Integer PCM at 8, 16, 24 or 32 bits is accepted. 24- and 32-bit samples are
/// reduced to 16 bits by dropping the low bits.
///
/// # Errors
/// - [`AudioError::InvalidContainer`] for malformed or truncated files
/// - [`AudioError::UnreadableFormat`] for float or otherwise unsupported formats
pub fn read_pcm(bytes: &[u8]) -> AudioResult<PcmInput> {
    let reader = hound::WavReader::new(Cursor::new(bytes)).map_err(map_hound_error)?;
    let spec = reader.spec();

    if spec.sample_format != hound::SampleFormat::Int {
        return Err(AudioError::unreadable_format(format!(
            "only integer PCM is supported, got {:?}",
            spec.sample_format
        )));
    }
    if spec.sample_rate == 0 {
        return Err(AudioError::unreadable_format("sample rate is 0"));
    }

    let samples: Vec<i16> = match spec.bits_per_sample {
        8 => reader
            .into_samples::<i8>()
            .map(|s| s.map(i16::from))
            .collect::<Result<_, _>>()
            .map_err(map_hound_error)?,
        16 => reader
            .into_samples::<i16>()
            .collect::<Result<_, _>>()
            .map_err(map_hound_error)?,
        bits @ (24 | 32) => {
            let shift = bits - 16;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| (v >> shift) as i16))
                .collect::<Result<_, _>>()
                .map_err(map_hound_error)?
        }
        other => {
            return Err(AudioError::unreadable_format(format!(
                "unsupported bit depth: {} bits (supported: 8, 16, 24, 32)",
                other
            )));
        }
    };

    let bits_per_sample = if spec.bits_per_sample == 8 { 8 } else { 16 };

    Ok(PcmInput {
        samples,
        format: PcmFormat::interleaved(spec.sample_rate, spec.channels).with_bits(bits_per_sample),
    })
}

fn map_hound_error(err: hound::Error) -> AudioError {
    match err {
        hound::Error::FormatError(msg) => AudioError::invalid_container(msg),
        hound::Error::IoError(e) => AudioError::invalid_container(format!("truncated data: {}", e)),
        hound::Error::UnfinishedSample => {
            AudioError::invalid_container("data chunk ends in the middle of a sample")
        }
        other => AudioError::unreadable_format(other.to_string()),
    }
}
