//! Build-time dispatched SIMD kernels for dot products and similarity.
//!
//! Exactly one accelerated backend is compiled in, chosen from the target
//! features of the build:
//!
//! - `x86_avx512`: 512-bit kernels, requires `avx512f` and `avx512bw`
//! - `x86_avx2`: 256-bit kernels, requires `avx2` and `fma`
//! - `neon`: 128-bit kernels on aarch64
//! - `scalar`: portable reference, always compiled
//!
//! The int8 kernels are exact: every backend returns the same `i32` as the
//! scalar reference for the same input. Float kernels may differ from the
//! reference by a few ulps because FMA and lane-wise reduction reorder the
//! additions.

// =============================================================================
// Unsafe invariants reference
// =============================================================================
// Every unsafe kernel below relies on the same three conditions:
//
// 1. Feature presence: a backend module is only compiled when the target
//    statically enables the features named in its #[target_feature]
//    attributes, so the instructions exist on every CPU the binary runs on.
// 2. Equal lengths: dispatch asserts a.len() == b.len() before calling a
//    kernel; kernels read both slices at the same offsets.
// 3. Unaligned loads only: kernels use loadu / vld1q forms exclusively, so
//    no alignment requirement exists beyond what slices already guarantee.

#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx512f",
    target_feature = "avx512bw"
))]
mod x86_avx512;

#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx2",
    target_feature = "fma",
    not(all(target_feature = "avx512f", target_feature = "avx512bw"))
))]
mod x86_avx2;

#[cfg(target_arch = "aarch64")]
mod neon;

pub mod scalar;

#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx512f",
    target_feature = "avx512bw"
))]
pub(crate) use x86_avx512::{dot_product_avx512, dot_product_i8_avx512};

#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx2",
    target_feature = "fma",
    not(all(target_feature = "avx512f", target_feature = "avx512bw"))
))]
pub(crate) use x86_avx2::{dot_product_avx2, dot_product_i8_avx2};

#[cfg(target_arch = "aarch64")]
pub(crate) use neon::{dot_product_i8_neon, dot_product_neon};

mod dispatch;
pub use dispatch::{
    cosine_similarity, cosine_similarity_i8, dot_product, dot_product_i8, norm, norm_i8,
    simd_level, SimdLevel,
};

// Tests (separate file, same module tree)
#[cfg(test)]
mod dispatch_tests;
