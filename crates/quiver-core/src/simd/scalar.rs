//! Portable reference kernels.
//!
//! Always compiled. Dispatch uses these below the SIMD width thresholds and
//! on targets without an accelerated backend; tests use them as the
//! correctness baseline. The int8 function is the semantic definition the
//! vector kernels reproduce exactly.

/// Scalar dot product of two f32 slices.
#[inline]
#[must_use]
pub fn dot_product_scalar(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Scalar int8 dot product with i32 accumulation.
///
/// Products of values in [-128, 127] summed over any realistic embedding
/// dimension stay far inside i32 range.
#[inline]
#[must_use]
pub fn dot_product_i8_scalar(a: &[i8], b: &[i8]) -> i32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| i32::from(x) * i32::from(y))
        .sum()
}
