//! Byte quantization of analysis results.
//!
//! Both mappings floor before clamping to 0..=255; NaN maps to 0.

/// Map a time-domain sample to a byte: `floor(128·(1 + x))`, clamped.
///
/// `0.0 → 128`, `-1.0 → 0`, `1.0 → 255` (clipped from 256).
#[inline]
pub fn sample_to_byte(sample: f32) -> u8 {
    (128.0 * (1.0 + sample)).floor().clamp(0.0, 255.0) as u8
}

/// Quantize a block of time-domain samples.
pub fn samples_to_bytes(samples: &[f32]) -> Vec<u8> {
    samples.iter().map(|&x| sample_to_byte(x)).collect()
}

/// Linear map from a decibel range onto 0..=255.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecibelScale {
    min_decibels: f32,
    scale: f32,
}

impl DecibelScale {
    /// Scale mapping `min_decibels → 0` and `max_decibels → 255`.
    pub fn new(min_decibels: f32, max_decibels: f32) -> Self {
        Self {
            min_decibels,
            scale: 255.0 / (max_decibels - min_decibels),
        }
    }

    /// `floor(255/(max − min) · (dB − min))`, clamped.
    #[inline]
    pub fn to_byte(&self, db: f32) -> u8 {
        (self.scale * (db - self.min_decibels))
            .floor()
            .clamp(0.0, 255.0) as u8
    }

    /// Quantize a block of dB values.
    pub fn to_bytes(&self, decibels: &[f32]) -> Vec<u8> {
        decibels.iter().map(|&db| self.to_byte(db)).collect()
    }
}
