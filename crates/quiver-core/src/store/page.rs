//! Fixed-capacity page holding vectors and their cached norms.

use super::{EMBEDDING_DIM, PAGE_CAPACITY};
use crate::error::Result;

/// One fixed-capacity slab of embeddings.
///
/// Norms and vector components live in two buffers, both reserved in full
/// when the page is created, so a push never reallocates and stored data
/// never moves.
#[derive(Debug)]
pub(crate) struct Page {
    /// Cached Euclidean norm of each stored vector.
    norms: Vec<f64>,
    /// Vector components, `EMBEDDING_DIM` per slot, contiguous.
    data: Vec<i8>,
}

impl Page {
    /// Creates an empty page with both buffers reserved in full.
    pub(crate) fn try_new() -> Result<Self> {
        let mut norms = Vec::new();
        norms.try_reserve_exact(PAGE_CAPACITY)?;
        let mut data = Vec::new();
        data.try_reserve_exact(PAGE_CAPACITY * EMBEDDING_DIM)?;
        Ok(Self { norms, data })
    }

    /// Number of embeddings stored in this page.
    pub(crate) fn len(&self) -> usize {
        self.norms.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.norms.len() == PAGE_CAPACITY
    }

    /// Appends a vector and its norm, returning the slot it landed in.
    ///
    /// The caller checks `is_full` first; the table only pushes into its
    /// last page.
    pub(crate) fn push(&mut self, vector: &[i8], norm: f64) -> usize {
        debug_assert!(!self.is_full());
        debug_assert_eq!(vector.len(), EMBEDDING_DIM);
        self.data.extend_from_slice(vector);
        self.norms.push(norm);
        self.norms.len() - 1
    }

    pub(crate) fn norm(&self, slot: usize) -> Option<f64> {
        self.norms.get(slot).copied()
    }

    pub(crate) fn vector(&self, slot: usize) -> Option<&[i8]> {
        if slot >= self.norms.len() {
            return None;
        }
        let start = slot * EMBEDDING_DIM;
        Some(&self.data[start..start + EMBEDDING_DIM])
    }

    /// Iterates stored `(norm, vector)` pairs in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (f64, &[i8])> {
        self.norms
            .iter()
            .copied()
            .zip(self.data.chunks_exact(EMBEDDING_DIM))
    }
}
