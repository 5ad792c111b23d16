//! PCM stream layout.

use serde::{Deserialize, Serialize};

/// Layout of an interleaved linear PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcmFormat {
    /// Number of interleaved channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth of the source. Samples are always carried as `i16`; an
    /// 8-bit source keeps its values in `[-128, 127]` until the mixer widens them.
    pub bits_per_sample: u16,
}

impl PcmFormat {
    /// Creates a 16-bit mono format.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Creates a 16-bit format with the given channel count.
    pub fn interleaved(sample_rate: u32, channels: u16) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Returns a copy with a different source bit depth.
    pub fn with_bits(self, bits_per_sample: u16) -> Self {
        Self {
            bits_per_sample,
            ..self
        }
    }

    /// Bytes per sample (per channel) once written as 16-bit PCM.
    pub(crate) fn bytes_per_sample(&self) -> u16 {
        2
    }

    /// Bytes per sample frame.
    pub(crate) fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    /// Bytes per second.
    pub(crate) fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}
