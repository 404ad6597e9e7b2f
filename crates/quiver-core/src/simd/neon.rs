//! NEON kernels for aarch64 (128-bit lanes).
//!
//! NEON is a baseline feature of aarch64, so these functions are safe
//! wrappers with unsafe blocks only around the loads.

use std::arch::aarch64::*;

/// Dot product, four float lanes per iteration.
///
/// Long vectors route to a four-accumulator variant.
#[inline]
pub(crate) fn dot_product_neon(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len();
    if len >= 64 {
        return dot_product_neon_4acc(a, b);
    }

    let simd_len = len / 4;
    // SAFETY: register initialization, no memory access.
    let mut sum = unsafe { vdupq_n_f32(0.0) };

    for i in 0..simd_len {
        let offset = i * 4;
        // SAFETY: offset + 4 <= len, and vld1q_f32 handles unaligned loads.
        unsafe {
            let va = vld1q_f32(a.as_ptr().add(offset));
            let vb = vld1q_f32(b.as_ptr().add(offset));
            sum = vfmaq_f32(sum, va, vb);
        }
    }

    // SAFETY: lane-wise reduction of an initialized register.
    let mut result = unsafe { vaddvq_f32(sum) };
    for i in (simd_len * 4)..len {
        result += a[i] * b[i];
    }
    result
}

/// Four-accumulator variant, 16 floats per iteration.
#[inline]
fn dot_product_neon_4acc(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len();
    let main_len = len / 16 * 16;

    // SAFETY: register initialization, no memory access.
    let (mut acc0, mut acc1, mut acc2, mut acc3) = unsafe {
        (
            vdupq_n_f32(0.0),
            vdupq_n_f32(0.0),
            vdupq_n_f32(0.0),
            vdupq_n_f32(0.0),
        )
    };

    let mut offset = 0;
    while offset < main_len {
        // SAFETY: offset + 16 <= main_len <= len, unaligned loads.
        unsafe {
            let a_ptr = a.as_ptr().add(offset);
            let b_ptr = b.as_ptr().add(offset);
            acc0 = vfmaq_f32(acc0, vld1q_f32(a_ptr), vld1q_f32(b_ptr));
            acc1 = vfmaq_f32(acc1, vld1q_f32(a_ptr.add(4)), vld1q_f32(b_ptr.add(4)));
            acc2 = vfmaq_f32(acc2, vld1q_f32(a_ptr.add(8)), vld1q_f32(b_ptr.add(8)));
            acc3 = vfmaq_f32(acc3, vld1q_f32(a_ptr.add(12)), vld1q_f32(b_ptr.add(12)));
        }
        offset += 16;
    }

    // SAFETY: lane-wise reduction of initialized registers.
    let mut result =
        unsafe { vaddvq_f32(vaddq_f32(vaddq_f32(acc0, acc1), vaddq_f32(acc2, acc3))) };
    for i in main_len..len {
        result += a[i] * b[i];
    }
    result
}

/// Exact int8 dot product: widening multiply to i16, pairwise-accumulate
/// into four i32 lanes.
///
/// Bit-identical to the scalar reference for any input.
#[inline]
pub(crate) fn dot_product_i8_neon(a: &[i8], b: &[i8]) -> i32 {
    let len = a.len();
    let simd_len = len / 16;

    // SAFETY: register initialization, no memory access.
    let mut acc = unsafe { vdupq_n_s32(0) };

    for i in 0..simd_len {
        let offset = i * 16;
        // SAFETY: offset + 16 <= len, and vld1q_s8 handles unaligned loads.
        unsafe {
            let va = vld1q_s8(a.as_ptr().add(offset));
            let vb = vld1q_s8(b.as_ptr().add(offset));
            let lo = vmull_s8(vget_low_s8(va), vget_low_s8(vb));
            let hi = vmull_high_s8(va, vb);
            acc = vpadalq_s16(acc, lo);
            acc = vpadalq_s16(acc, hi);
        }
    }

    // SAFETY: lane-wise reduction of an initialized register.
    let mut result = unsafe { vaddvq_s32(acc) };
    for i in (simd_len * 16)..len {
        result += i32::from(a[i]) * i32::from(b[i]);
    }
    result
}
