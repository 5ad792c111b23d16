//! Deterministic 16-bit WAV writer.

use std::io::{self, Write};

use super::format::PcmFormat;

/// Writes a complete 16-bit PCM WAV file to a writer.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - Stream layout (written as 16-bit regardless of `bits_per_sample`)
/// * `pcm_data` - Little-endian 16-bit samples as bytes
pub fn write_wav<W: Write>(writer: &mut W, format: &PcmFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = pcm_data.len() as u32;
    let file_size = 36 + data_size; // Total file size minus 8 bytes for RIFF header

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // Chunk size (16 for PCM)
    writer.write_all(&1u16.to_le_bytes())?; // Audio format (1 = PCM)
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&16u16.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Writes a WAV file to a byte vector.
pub fn write_wav_to_vec(format: &PcmFormat, pcm_data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(44 + pcm_data.len());
    // Writing into a Vec cannot fail.
    let _ = write_wav(&mut buffer, format, pcm_data);
    buffer
}

/// Serializes linear samples as little-endian 16-bit PCM bytes.
pub fn samples_to_pcm16(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Encodes mono samples as a complete WAV file.
pub fn mono_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    write_wav_to_vec(&PcmFormat::mono(sample_rate), &samples_to_pcm16(samples))
}
