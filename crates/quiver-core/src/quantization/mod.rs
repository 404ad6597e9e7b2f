//! Symmetric linear quantization between f32 and narrow integer vectors.
//!
//! | Representation | Scale basis | Value range |
//! |----------------|-------------------|---------------------|
//! | `QuantizedI16` | `32767 / max_abs` | `[-32768, 32767]` |
//! | `QuantizedI8`  | `127 / max_abs`   | `[-128, 127]` |
//!
//! Quantization multiplies by the scale, rounds half away from zero, then
//! clamps to the target range. Every quantized vector carries its scale, so
//! dequantization is a division; losing the scale loses the magnitudes.
//!
//! The i16 form exists as a higher-precision intermediate: pipelines that
//! accumulate in i16 can narrow to i8 afterwards with
//! [`QuantizedI8::from_i16`] without a round trip through floats.

mod int16;
mod int8;

pub use int16::{dequantize_i16, QuantizedI16};
pub use int8::{dequantize_i8, requantize_i16_to_i8, QuantizedI8};
