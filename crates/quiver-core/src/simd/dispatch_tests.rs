//! Unit tests for kernel dispatch.
//!
//! The property suites in `tests/` cover randomized equivalence; these pin
//! down known values, edge lengths, and the exactness contract.

use super::scalar;
use super::{
    cosine_similarity, cosine_similarity_i8, dot_product, dot_product_i8, norm, norm_i8,
    simd_level,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_i8_vector(len: usize, seed: u64) -> Vec<i8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-128i8..=127)).collect()
}

fn random_f32_vector(len: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-100.0f32..100.0)).collect()
}

#[test]
fn test_dot_product_basic() {
    let a = [1.0, 2.0, 3.0, 4.0];
    let b = [5.0, 6.0, 7.0, 8.0];
    let result = dot_product(&a, &b);
    assert!((result - 70.0).abs() < 1e-6);
}

#[test]
fn test_dot_product_empty() {
    assert_eq!(dot_product(&[], &[]), 0.0);
    assert_eq!(dot_product_i8(&[], &[]), 0);
}

#[test]
fn test_dot_product_zeros() {
    let a = vec![0.0f32; 512];
    let b = random_f32_vector(512, 7);
    assert_eq!(dot_product(&a, &b), 0.0);
}

#[test]
fn test_dot_product_remainder_lengths() {
    // Lengths straddling every backend's width force the scalar tail.
    for len in [1, 3, 4, 5, 7, 8, 9, 15, 16, 17, 31, 32, 33, 63, 64, 65, 100] {
        let a = random_f32_vector(len, 11);
        let b = random_f32_vector(len, 13);
        let dispatched = dot_product(&a, &b);
        let reference = scalar::dot_product_scalar(&a, &b);
        // Reordered additions drift relative to the summed term magnitudes,
        // not relative to the (possibly cancelled) result.
        let magnitude: f32 = a.iter().zip(&b).map(|(x, y)| (x * y).abs()).sum();
        let tolerance = 1e-4 * magnitude + 1e-3;
        assert!(
            (dispatched - reference).abs() <= tolerance,
            "len {len}: dispatched {dispatched} vs reference {reference}"
        );
    }
}

#[test]
fn test_dot_product_i8_matches_scalar_exactly() {
    for len in [0, 1, 15, 16, 17, 31, 32, 33, 63, 64, 100, 511, 512, 513] {
        let a = random_i8_vector(len, 21);
        let b = random_i8_vector(len, 23);
        assert_eq!(
            dot_product_i8(&a, &b),
            scalar::dot_product_i8_scalar(&a, &b),
            "int8 kernel diverged from the reference at len {len}"
        );
    }
}

#[test]
fn test_dot_product_i8_extremes() {
    // -128 * -128 * 512 = 8_388_608, comfortably inside i32.
    let a = vec![-128i8; 512];
    assert_eq!(dot_product_i8(&a, &a), 512 * 128 * 128);

    let b = vec![127i8; 512];
    assert_eq!(dot_product_i8(&a, &b), 512 * -128 * 127);
}

#[test]
fn test_norm_known_values() {
    let v = [3.0f32, 4.0];
    assert!((norm(&v) - 5.0).abs() < 1e-6);

    let ones = vec![1i8; 512];
    assert!((norm_i8(&ones) - 512f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_cosine_similarity_zero_norm_is_zero() {
    let zeros = vec![0.0f32; 16];
    let other = random_f32_vector(16, 3);
    assert_eq!(cosine_similarity(&zeros, &other), 0.0);

    let zeros_i8 = vec![0i8; 16];
    let other_i8 = random_i8_vector(16, 5);
    let n = norm_i8(&other_i8);
    assert_eq!(cosine_similarity_i8(&zeros_i8, 0.0, &other_i8, n), 0.0);
}

#[test]
fn test_cosine_similarity_i8_identical_and_opposite() {
    let v = random_i8_vector(512, 99);
    let n = norm_i8(&v);
    assert!((cosine_similarity_i8(&v, n, &v, n) - 1.0).abs() < 1e-12);

    let neg: Vec<i8> = v.iter().map(|&x| x.saturating_neg()).collect();
    let neg_n = norm_i8(&neg);
    let sim = cosine_similarity_i8(&v, n, &neg, neg_n);
    assert!(sim < -0.99, "opposite vectors should be near -1, got {sim}");
}

#[test]
#[should_panic(expected = "Vector dimensions must match")]
fn test_dot_product_dimension_mismatch_panics() {
    let a = [1.0f32, 2.0];
    let b = [1.0f32, 2.0, 3.0];
    let _ = dot_product(&a, &b);
}

#[test]
#[should_panic(expected = "Vector dimensions must match")]
fn test_dot_product_i8_dimension_mismatch_panics() {
    let a = [1i8, 2];
    let b = [1i8];
    let _ = dot_product_i8(&a, &b);
}

#[test]
fn test_simd_level_reports_compiled_backend() {
    let level = simd_level();
    assert!(["avx512", "avx2", "neon", "scalar"].contains(&level.name()));
}
