//! ITU-T G.711 μ-law companding.
//!
//! Each 16-bit linear sample maps to one byte: an inverted sign bit, a 3-bit
//! segment (exponent) and a 4-bit mantissa, with the usual bias of 0x84.
//! Silence encodes to `0xFF`.

const BIAS: i32 = 0x84;
const CLIP: i32 = 32635;

/// Upper bound of the biased magnitude in each of the eight segments.
const SEGMENT_END: [i32; 8] = [0xFF, 0x1FF, 0x3FF, 0x7FF, 0xFFF, 0x1FFF, 0x3FFF, 0x7FFF];

fn segment(biased: i32) -> u8 {
    SEGMENT_END
        .iter()
        .position(|&end| biased <= end)
        .unwrap_or(SEGMENT_END.len() - 1) as u8
}

/// Encodes one linear sample.
pub fn encode_sample(sample: i16) -> u8 {
    let pcm = sample as i32;
    let (magnitude, mask) = if pcm < 0 {
        (-pcm, 0x7F)
    } else {
        (pcm, 0xFF)
    };

    let biased = magnitude.min(CLIP) + BIAS;
    let seg = segment(biased);
    let mantissa = ((biased >> (seg + 3)) & 0x0F) as u8;

    ((seg << 4) | mantissa) ^ mask
}

/// Decodes one μ-law byte.
pub fn decode_sample(byte: u8) -> i16 {
    let u = !byte;
    let mut t = (((u & 0x0F) as i32) << 3) + BIAS;
    t <<= (u & 0x70) >> 4;

    if u & 0x80 != 0 {
        (BIAS - t) as i16
    } else {
        (t - BIAS) as i16
    }
}

/// Encodes a buffer, one byte per sample.
pub fn encode(samples: &[i16]) -> Vec<u8> {
    samples.iter().map(|&s| encode_sample(s)).collect()
}

/// Decodes a buffer, one sample per byte.
pub fn decode(data: &[u8]) -> Vec<i16> {
    data.iter().map(|&b| decode_sample(b)).collect()
}

/// Quantization step of the segment a μ-law byte falls in.
pub fn quantization_step(byte: u8) -> i32 {
    let seg = ((!byte) >> 4) & 0x07;
    1 << (seg + 3)
}
