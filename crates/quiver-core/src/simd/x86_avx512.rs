//! AVX-512 kernels for x86_64 (512-bit lanes).
//!
//! Compiled only when the target enables both `avx512f` and `avx512bw`:
//! the float kernels need only F, but the exact int8 kernel needs BW for
//! 512-bit sign extension and multiply-add, and a half-accelerated level
//! is not worth a second gate.

/// Dot product over 16 float lanes per iteration.
///
/// Long vectors route to a four-accumulator variant that hides FMA latency.
///
/// # Safety
///
/// Caller must ensure:
/// - Condition 1: the build target enables `avx512f` (module compile-time
///   gate).
/// - Condition 2: `a.len() == b.len()`.
#[target_feature(enable = "avx512f")]
#[inline]
pub(crate) unsafe fn dot_product_avx512(a: &[f32], b: &[f32]) -> f32 {
    use std::arch::x86_64::*;

    let len = a.len();
    if len >= 64 {
        return dot_product_avx512_4acc(a, b);
    }

    let simd_len = len / 16;
    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    let mut sum = _mm512_setzero_ps();
    for i in 0..simd_len {
        let offset = i * 16;
        let va = _mm512_loadu_ps(a_ptr.add(offset));
        let vb = _mm512_loadu_ps(b_ptr.add(offset));
        sum = _mm512_fmadd_ps(va, vb, sum);
    }

    let mut result = _mm512_reduce_add_ps(sum);
    for i in (simd_len * 16)..len {
        result += a[i] * b[i];
    }
    result
}

/// Four-accumulator variant, 64 floats per iteration.
///
/// # Safety
///
/// Same conditions as [`dot_product_avx512`].
#[target_feature(enable = "avx512f")]
#[inline]
unsafe fn dot_product_avx512_4acc(a: &[f32], b: &[f32]) -> f32 {
    use std::arch::x86_64::*;

    let len = a.len();
    let simd_len = len / 64;
    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    let mut acc0 = _mm512_setzero_ps();
    let mut acc1 = _mm512_setzero_ps();
    let mut acc2 = _mm512_setzero_ps();
    let mut acc3 = _mm512_setzero_ps();

    for i in 0..simd_len {
        let offset = i * 64;
        acc0 = _mm512_fmadd_ps(
            _mm512_loadu_ps(a_ptr.add(offset)),
            _mm512_loadu_ps(b_ptr.add(offset)),
            acc0,
        );
        acc1 = _mm512_fmadd_ps(
            _mm512_loadu_ps(a_ptr.add(offset + 16)),
            _mm512_loadu_ps(b_ptr.add(offset + 16)),
            acc1,
        );
        acc2 = _mm512_fmadd_ps(
            _mm512_loadu_ps(a_ptr.add(offset + 32)),
            _mm512_loadu_ps(b_ptr.add(offset + 32)),
            acc2,
        );
        acc3 = _mm512_fmadd_ps(
            _mm512_loadu_ps(a_ptr.add(offset + 48)),
            _mm512_loadu_ps(b_ptr.add(offset + 48)),
            acc3,
        );
    }

    let sum = _mm512_add_ps(_mm512_add_ps(acc0, acc1), _mm512_add_ps(acc2, acc3));
    let mut result = _mm512_reduce_add_ps(sum);

    for i in (simd_len * 64)..len {
        result += a[i] * b[i];
    }
    result
}

/// Exact int8 dot product: sign-extend 32 bytes to 16-bit lanes, multiply-add
/// pairs into sixteen i32 lanes.
///
/// Bit-identical to the scalar reference for any input.
///
/// # Safety
///
/// Caller must ensure:
/// - Condition 1: the build target enables `avx512f` and `avx512bw` (module
///   compile-time gate).
/// - Condition 2: `a.len() == b.len()`.
#[target_feature(enable = "avx512f", enable = "avx512bw")]
#[inline]
// loadu has no alignment requirement, so the i8 -> __m256i pointer cast is fine.
#[allow(clippy::cast_ptr_alignment)]
pub(crate) unsafe fn dot_product_i8_avx512(a: &[i8], b: &[i8]) -> i32 {
    use std::arch::x86_64::*;

    let len = a.len();
    let simd_len = len / 32;
    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    let mut acc = _mm512_setzero_si512();
    for i in 0..simd_len {
        let offset = i * 32;
        let va = _mm512_cvtepi8_epi16(_mm256_loadu_si256(a_ptr.add(offset).cast::<__m256i>()));
        let vb = _mm512_cvtepi8_epi16(_mm256_loadu_si256(b_ptr.add(offset).cast::<__m256i>()));
        acc = _mm512_add_epi32(acc, _mm512_madd_epi16(va, vb));
    }

    let mut result = _mm512_reduce_add_epi32(acc);
    for i in (simd_len * 32)..len {
        result += i32::from(a[i]) * i32::from(b[i]);
    }
    result
}
