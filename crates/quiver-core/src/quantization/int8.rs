//! 8-bit symmetric quantization, the storage form of the embedding table.

use super::QuantizedI16;

/// Fixed factor mapping the i16 range onto the i8 range.
const I16_TO_I8: f32 = 127.0 / 32_767.0;

/// An f32 vector quantized to i8, carrying the scale that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedI8 {
    /// Quantized components.
    pub values: Vec<i8>,
    /// Multiplier applied to the source floats.
    pub scale: f32,
}

impl QuantizedI8 {
    /// Quantizes `vector` so its largest magnitude maps to 127.
    ///
    /// An all-zero (or empty) input uses a divisor basis of 1.0, giving
    /// scale `127.0` and all-zero output.
    #[must_use]
    pub fn from_f32(vector: &[f32]) -> Self {
        let scale = i8_scale(vector);
        let values = vector.iter().map(|&v| quantize_value(v, scale)).collect();
        Self { values, scale }
    }

    /// Narrows an i16 quantization to i8 without a float round trip.
    ///
    /// The scales compose: the result dequantizes with
    /// `quantized.scale * 127 / 32767`.
    #[must_use]
    pub fn from_i16(quantized: &QuantizedI16) -> Self {
        Self {
            values: requantize_i16_to_i8(&quantized.values),
            scale: quantized.scale * I16_TO_I8,
        }
    }

    /// Recovers approximate floats by dividing each component by the scale.
    #[must_use]
    pub fn to_f32(&self) -> Vec<f32> {
        dequantize_i8(&self.values, self.scale)
    }

    /// Number of components.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.values.len()
    }
}

/// Narrows i16 components to i8 with the fixed `127 / 32767` factor.
#[must_use]
pub fn requantize_i16_to_i8(values: &[i16]) -> Vec<i8> {
    values
        .iter()
        .map(|&v| narrow_value(f32::from(v) * I16_TO_I8))
        .collect()
}

/// Divides each component by `scale`; the inverse of quantization up to
/// rounding error.
#[must_use]
pub fn dequantize_i8(values: &[i8], scale: f32) -> Vec<f32> {
    values.iter().map(|&v| f32::from(v) / scale).collect()
}

fn i8_scale(vector: &[f32]) -> f32 {
    let max_abs = vector.iter().fold(0.0f32, |m, &v| m.max(v.abs()));
    let basis = if max_abs == 0.0 { 1.0 } else { max_abs };
    f32::from(i8::MAX) / basis
}

fn quantize_value(v: f32, scale: f32) -> i8 {
    narrow_value(v * scale)
}

// Rounds half away from zero, then clamps; the cast cannot truncate
// because the value is already inside the i8 range.
#[allow(clippy::cast_possible_truncation)]
fn narrow_value(v: f32) -> i8 {
    v.round().clamp(f32::from(i8::MIN), f32::from(i8::MAX)) as i8
}
