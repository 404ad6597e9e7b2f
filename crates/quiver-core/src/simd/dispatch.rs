//! Public kernel entry points with build-time backend selection.
//!
//! Each operation checks the compiled backend's width threshold and falls
//! through to the scalar reference for shorter inputs, so every length is
//! handled and remainders are never skipped.

use super::scalar;

/// SIMD capability level compiled into this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdLevel {
    /// 512-bit kernels (`avx512f` + `avx512bw`).
    Avx512,
    /// 256-bit kernels (`avx2` + `fma`).
    Avx2,
    /// 128-bit kernels on aarch64.
    Neon,
    /// Portable fallback.
    Scalar,
}

impl SimdLevel {
    /// Short lowercase label for logs and benchmark output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SimdLevel::Avx512 => "avx512",
            SimdLevel::Avx2 => "avx2",
            SimdLevel::Neon => "neon",
            SimdLevel::Scalar => "scalar",
        }
    }
}

/// Backend selected at compile time from the target features.
///
/// This is a constant, not a detection result: the same binary never
/// switches kernels, and a build without the required target features uses
/// the scalar path even on capable hardware.
#[allow(unreachable_code)] // the cfg-selected return covers accelerated targets
#[must_use]
pub const fn simd_level() -> SimdLevel {
    #[cfg(all(
        target_arch = "x86_64",
        target_feature = "avx512f",
        target_feature = "avx512bw"
    ))]
    return SimdLevel::Avx512;

    #[cfg(all(
        target_arch = "x86_64",
        target_feature = "avx2",
        target_feature = "fma",
        not(all(target_feature = "avx512f", target_feature = "avx512bw"))
    ))]
    return SimdLevel::Avx2;

    #[cfg(target_arch = "aarch64")]
    return SimdLevel::Neon;

    SimdLevel::Scalar
}

/// Dot product of two f32 slices on the compiled backend.
///
/// # Panics
///
/// Panics if the slices differ in length.
#[inline]
#[must_use]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    #[cfg(all(
        target_arch = "x86_64",
        target_feature = "avx512f",
        target_feature = "avx512bw"
    ))]
    if a.len() >= 16 {
        // SAFETY: avx512f is a target feature of this build, and the
        // lengths are equal per the assert above.
        return unsafe { super::dot_product_avx512(a, b) };
    }

    #[cfg(all(
        target_arch = "x86_64",
        target_feature = "avx2",
        target_feature = "fma",
        not(all(target_feature = "avx512f", target_feature = "avx512bw"))
    ))]
    if a.len() >= 8 {
        // SAFETY: avx2 and fma are target features of this build, and the
        // lengths are equal per the assert above.
        return unsafe { super::dot_product_avx2(a, b) };
    }

    #[cfg(target_arch = "aarch64")]
    if a.len() >= 4 {
        return super::dot_product_neon(a, b);
    }

    scalar::dot_product_scalar(a, b)
}

/// Dot product of two int8 slices with i32 accumulation.
///
/// Exact on every backend: the result is bit-identical to the scalar
/// reference regardless of which kernel was compiled in.
///
/// # Panics
///
/// Panics if the slices differ in length.
#[inline]
#[must_use]
pub fn dot_product_i8(a: &[i8], b: &[i8]) -> i32 {
    assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    #[cfg(all(
        target_arch = "x86_64",
        target_feature = "avx512f",
        target_feature = "avx512bw"
    ))]
    if a.len() >= 32 {
        // SAFETY: avx512f and avx512bw are target features of this build,
        // and the lengths are equal per the assert above.
        return unsafe { super::dot_product_i8_avx512(a, b) };
    }

    #[cfg(all(
        target_arch = "x86_64",
        target_feature = "avx2",
        target_feature = "fma",
        not(all(target_feature = "avx512f", target_feature = "avx512bw"))
    ))]
    if a.len() >= 32 {
        // SAFETY: avx2 is a target feature of this build, and the lengths
        // are equal per the assert above.
        return unsafe { super::dot_product_i8_avx2(a, b) };
    }

    #[cfg(target_arch = "aarch64")]
    if a.len() >= 16 {
        return super::dot_product_i8_neon(a, b);
    }

    scalar::dot_product_i8_scalar(a, b)
}

/// Euclidean norm of an f32 vector.
#[inline]
#[must_use]
pub fn norm(v: &[f32]) -> f32 {
    dot_product(v, v).sqrt()
}

/// Euclidean norm of an int8 vector, widened to f64 to match stored norms.
#[inline]
#[must_use]
pub fn norm_i8(v: &[i8]) -> f64 {
    f64::from(dot_product_i8(v, v)).sqrt()
}

/// Cosine similarity `dot(a, b) / (|a| * |b|)` between f32 vectors.
///
/// Returns `0.0` when either vector has a zero norm.
///
/// # Panics
///
/// Panics if the slices differ in length.
#[inline]
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vector dimensions must match");
    let denom = norm(a) * norm(b);
    if denom == 0.0 {
        return 0.0;
    }
    dot_product(a, b) / denom
}

/// Cosine similarity between int8 vectors with precomputed norms.
///
/// The norms are supplied by the caller (typically cached alongside the
/// vectors), so the kernel cost is a single dot product. Returns `0.0`
/// when either norm is zero.
///
/// # Panics
///
/// Panics if the slices differ in length.
#[inline]
#[must_use]
pub fn cosine_similarity_i8(a: &[i8], norm_a: f64, b: &[i8], norm_b: f64) -> f64 {
    assert_eq!(a.len(), b.len(), "Vector dimensions must match");
    let denom = norm_a * norm_b;
    if denom == 0.0 {
        return 0.0;
    }
    f64::from(dot_product_i8(a, b)) / denom
}
