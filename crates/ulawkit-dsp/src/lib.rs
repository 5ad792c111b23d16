//! ulawkit DSP core
//!
//! Converts linear PCM audio into 8 kHz mono G.711 μ-law for telephony, and
//! back.
//!
//! # Overview
//!
//! The encode path runs a fixed sequence of stages over one in-memory buffer:
//!
//! - **Channel mixing** - interleaved channels collapse to mono
//! - **Band limiting** - first-order RC high-pass and low-pass
//! - **Anti-aliasing** - Simple, Butterworth, Bessel or Chebyshev low-pass
//! - **Resampling** - windowed-sinc interpolation to 8000 Hz
//! - **Dynamics** - static compression, then peak normalization
//! - **Companding** - G.711 μ-law, one byte per sample
//!
//! The decode path expands μ-law and optionally resamples to a requested rate.
//!
//! # Determinism
//!
//! Every stage is a pure function of its input buffer and the config. Filter
//! history lives only for the duration of a call. The only shared state is the
//! sinc table cache, which holds values that depend on the window size alone.
//!
//! # Example
//!
//! ```ignore
//! use ulawkit_dsp::{AudioConfig, Transcoder};
//!
//! let transcoder = Transcoder::new();
//! let wav = std::fs::read("speech.wav")?;
//! let result = transcoder.encode_wav(&wav, &AudioConfig::default())?;
//! std::fs::write("speech.ulaw", &result.data)?;
//! ```
//!
//! # Crate Structure
//!
//! - [`Transcoder`] - Orchestrates the encode and decode paths
//! - [`config`] - Conversion profile and validation
//! - [`mixer`] - Channel downmix
//! - [`filter`] - RC and biquad-family filters
//! - [`resample`] - Windowed-sinc resampler and sinc table cache
//! - [`dynamics`] - Compression and normalization
//! - [`codec`] - G.711 μ-law companding
//! - [`wav`] - WAV reading (via `hound`) and deterministic writing

pub mod codec;
pub mod config;
pub mod dynamics;
pub mod error;
pub mod filter;
pub mod mixer;
pub mod pipeline;
pub mod resample;
pub mod wav;

// Re-export main types at crate root
pub use config::{AntiAliasingType, AudioConfig, TELEPHONY_RATE};
pub use error::{AudioError, AudioResult};
pub use pipeline::{decode, encode, DecodeResult, EncodeResult, Stage, Transcoder};
pub use resample::{Resampler, SincTableCache};
pub use wav::{PcmFormat, PcmInput};
