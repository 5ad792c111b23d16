//! WAV container adapter.
//!
//! Reading goes through `hound`; writing uses a small deterministic writer that
//! emits a bare 44-byte header with no timestamps or extra chunks.

mod format;
mod reader;
mod writer;


// Re-export public API
pub use format::PcmFormat;
pub use reader::{read_pcm, PcmInput};
pub use writer::{mono_wav, samples_to_pcm16, write_wav, write_wav_to_vec};
