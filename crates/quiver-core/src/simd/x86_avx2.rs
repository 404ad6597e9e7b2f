//! AVX2 kernels for x86_64 (256-bit lanes, FMA for floats).
//!
//! Compiled only when the target enables `avx2` and `fma` without reaching
//! the 512-bit level. Loads are unaligned (`loadu`), so page buffers need
//! no special alignment.

/// Dot product over 16 float lanes per iteration with two FMA accumulators.
///
/// # Safety
///
/// Caller must ensure:
/// - Condition 1: the build target enables `avx2` and `fma` (guaranteed by
///   the module's compile-time gate).
/// - Condition 2: `a.len() == b.len()`. Reason: both slices are read at the
///   same offsets up to `a.len()`.
#[target_feature(enable = "avx2", enable = "fma")]
#[inline]
pub(crate) unsafe fn dot_product_avx2(a: &[f32], b: &[f32]) -> f32 {
    use std::arch::x86_64::*;

    let len = a.len();
    let simd_len = len / 16;
    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    let mut acc0 = _mm256_setzero_ps();
    let mut acc1 = _mm256_setzero_ps();

    for i in 0..simd_len {
        let offset = i * 16;
        let va0 = _mm256_loadu_ps(a_ptr.add(offset));
        let vb0 = _mm256_loadu_ps(b_ptr.add(offset));
        acc0 = _mm256_fmadd_ps(va0, vb0, acc0);

        let va1 = _mm256_loadu_ps(a_ptr.add(offset + 8));
        let vb1 = _mm256_loadu_ps(b_ptr.add(offset + 8));
        acc1 = _mm256_fmadd_ps(va1, vb1, acc1);
    }

    // Horizontal sum of the combined accumulator.
    let combined = _mm256_add_ps(acc0, acc1);
    let hi = _mm256_extractf128_ps(combined, 1);
    let lo = _mm256_castps256_ps128(combined);
    let sum128 = _mm_add_ps(lo, hi);
    let shuf = _mm_movehdup_ps(sum128);
    let sums = _mm_add_ps(sum128, shuf);
    let shuf2 = _mm_movehl_ps(sums, sums);
    let mut result = _mm_cvtss_f32(_mm_add_ss(sums, shuf2));

    // Remainder is always handled scalar.
    for i in (simd_len * 16)..len {
        result += a[i] * b[i];
    }
    result
}

/// Exact int8 dot product: sign-extend to 16-bit lanes, multiply-add pairs
/// into eight i32 lanes.
///
/// Bit-identical to the scalar reference for any input. Each i32 lane grows
/// by at most `4 * 128^2` per iteration, so overflow would need vectors
/// approaching a million elements.
///
/// # Safety
///
/// Caller must ensure:
/// - Condition 1: the build target enables `avx2` (module compile-time gate).
/// - Condition 2: `a.len() == b.len()`.
#[target_feature(enable = "avx2")]
#[inline]
// loadu has no alignment requirement, so the i8 -> __m256i pointer cast is fine.
#[allow(clippy::cast_ptr_alignment)]
pub(crate) unsafe fn dot_product_i8_avx2(a: &[i8], b: &[i8]) -> i32 {
    use std::arch::x86_64::*;

    let len = a.len();
    let simd_len = len / 32;
    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    let mut acc = _mm256_setzero_si256();

    for i in 0..simd_len {
        let offset = i * 32;
        let va = _mm256_loadu_si256(a_ptr.add(offset).cast::<__m256i>());
        let vb = _mm256_loadu_si256(b_ptr.add(offset).cast::<__m256i>());

        let va_lo = _mm256_cvtepi8_epi16(_mm256_castsi256_si128(va));
        let vb_lo = _mm256_cvtepi8_epi16(_mm256_castsi256_si128(vb));
        let va_hi = _mm256_cvtepi8_epi16(_mm256_extracti128_si256(va, 1));
        let vb_hi = _mm256_cvtepi8_epi16(_mm256_extracti128_si256(vb, 1));

        acc = _mm256_add_epi32(acc, _mm256_madd_epi16(va_lo, vb_lo));
        acc = _mm256_add_epi32(acc, _mm256_madd_epi16(va_hi, vb_hi));
    }

    // Horizontal sum of the eight i32 lanes.
    let lo = _mm256_castsi256_si128(acc);
    let hi = _mm256_extracti128_si256(acc, 1);
    let sum128 = _mm_add_epi32(lo, hi);
    let sum64 = _mm_add_epi32(sum128, _mm_srli_si128(sum128, 8));
    let sum32 = _mm_add_epi32(sum64, _mm_srli_si128(sum64, 4));
    let mut result = _mm_cvtsi128_si32(sum32);

    for i in (simd_len * 32)..len {
        result += i32::from(a[i]) * i32::from(b[i]);
    }
    result
}
