//! Sample rate conversion by windowed-sinc interpolation.
//!
//! [`Resampler`] owns an `Arc<SincTableCache>`. Conversions that should share
//! precomputed tables are given the same cache; tests that need isolation
//! build their own.

mod resampler;
mod sinc_table;

pub use resampler::{blackman_window, output_len, Resampler};
pub use sinc_table::{SincTable, SincTableCache, TABLE_SIZE};
