//! # Quiver Core
//!
//! Paged int8 embedding store with build-time SIMD similarity kernels.
//!
//! ## Features
//!
//! - Fixed 512-dimensional signed-int8 vectors with their Euclidean norms
//!   cached as `f64`
//! - Page-structured append-only storage: stored vectors never move, and
//!   indices stay valid for the life of the table
//! - AVX-512 / AVX2 / NEON dot-product kernels selected at compile time,
//!   with bit-exact int8 results on every backend
//! - Symmetric f32 -> i16 -> i8 quantization that carries its scale
//! - Incremental flat-record persistence: one 520-byte record per
//!   embedding, appends only what the file is missing
//!
//! ## Quick Start
//!
//! ```rust
//! use quiver_core::{EmbeddingTable, QuantizedI8};
//!
//! let mut table = EmbeddingTable::with_capacity(4)?;
//!
//! // Quantize a float embedding and store it; a negative norm asks the
//! // table to compute the int8 norm itself.
//! let embedding = QuantizedI8::from_f32(&[0.3_f32; 512]);
//! let index = table.add_embedding(&embedding.values, -1.0)?;
//!
//! assert_eq!(table.len(), 1);
//! assert!(table.cosine_similarity(index, index) > 0.999);
//! # Ok::<(), quiver_core::Error>(())
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::cast_precision_loss))]

pub mod error;
pub mod quantization;
pub mod simd;
pub mod store;


pub use error::{Error, Result};
pub use quantization::{
    dequantize_i16, dequantize_i8, requantize_i16_to_i8, QuantizedI16, QuantizedI8,
};
pub use simd::{
    cosine_similarity, cosine_similarity_i8, dot_product, dot_product_i8, norm, norm_i8,
    simd_level, SimdLevel,
};
pub use store::{EmbeddingTable, EMBEDDING_DIM, PAGE_CAPACITY, RECORD_BYTES};
