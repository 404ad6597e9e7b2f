//! 16-bit symmetric quantization.

/// An f32 vector quantized to i16, carrying the scale that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedI16 {
    /// Quantized components.
    pub values: Vec<i16>,
    /// Multiplier applied to the source floats.
    pub scale: f32,
}

impl QuantizedI16 {
    /// Quantizes `vector` so its largest magnitude maps to 32767.
    ///
    /// An all-zero (or empty) input uses a divisor basis of 1.0, giving
    /// scale `32767.0` and all-zero output.
    #[must_use]
    pub fn from_f32(vector: &[f32]) -> Self {
        let scale = i16_scale(vector);
        let values = vector.iter().map(|&v| quantize_value(v, scale)).collect();
        Self { values, scale }
    }

    /// Recovers approximate floats by dividing each component by the scale.
    #[must_use]
    pub fn to_f32(&self) -> Vec<f32> {
        dequantize_i16(&self.values, self.scale)
    }

    /// Number of components.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.values.len()
    }
}

/// Divides each component by `scale`; the inverse of quantization up to
/// rounding error.
#[must_use]
pub fn dequantize_i16(values: &[i16], scale: f32) -> Vec<f32> {
    values.iter().map(|&v| f32::from(v) / scale).collect()
}

fn i16_scale(vector: &[f32]) -> f32 {
    let max_abs = vector.iter().fold(0.0f32, |m, &v| m.max(v.abs()));
    let basis = if max_abs == 0.0 { 1.0 } else { max_abs };
    f32::from(i16::MAX) / basis
}

// Rounds half away from zero, then clamps; the cast cannot truncate
// because the value is already inside the i16 range.
#[allow(clippy::cast_possible_truncation)]
fn quantize_value(v: f32, scale: f32) -> i16 {
    (v * scale)
        .round()
        .clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
}
