//! Append-only paged embedding table.

use super::page::Page;
use super::{DEFAULT_PAGE_SLOTS, EMBEDDING_DIM, PAGE_CAPACITY, PAGE_SHIFT, SLOT_MASK};
use crate::error::{Error, Result};
use crate::simd::{dot_product_i8, norm_i8};

/// Append-only table of 512-dimensional int8 embeddings with cached norms.
///
/// Appends return a stable `u64` index; lookups by index never fail hard.
/// An out-of-range index reads as norm `0.0`, no vector, and similarity
/// `0.0`, so callers holding stale indices degrade instead of panicking.
///
/// The table is a single-writer structure: it is `Send` but has no
/// interior synchronization, and concurrent mutation requires external
/// locking.
#[derive(Debug)]
pub struct EmbeddingTable {
    pages: Vec<Page>,
}

impl EmbeddingTable {
    /// Creates a table with the default page-arena reservation, sized for
    /// roughly 268 million embeddings.
    pub fn new() -> Result<Self> {
        Self::with_capacity(DEFAULT_PAGE_SLOTS)
    }

    /// Creates a table whose page arena holds `page_slots` pages before it
    /// must reallocate. `0` reserves nothing; the table still grows on
    /// demand.
    pub fn with_capacity(page_slots: usize) -> Result<Self> {
        let mut pages = Vec::new();
        pages.try_reserve_exact(page_slots)?;
        Ok(Self { pages })
    }

    /// Appends a vector with its precomputed norm and returns the global
    /// index.
    ///
    /// A negative `norm` asks the table to compute the Euclidean norm of
    /// the int8 vector itself.
    ///
    /// # Errors
    ///
    /// - [`Error::DimensionMismatch`] when `vector` is not 512 components.
    /// - [`Error::ZeroNorm`] when the norm (supplied or computed) is zero.
    /// - [`Error::Alloc`] when a page reservation fails.
    pub fn add_embedding(&mut self, vector: &[i8], norm: f64) -> Result<u64> {
        if vector.len() != EMBEDDING_DIM {
            return Err(Error::DimensionMismatch {
                expected: EMBEDDING_DIM,
                actual: vector.len(),
            });
        }
        let norm = if norm < 0.0 { norm_i8(vector) } else { norm };
        if norm == 0.0 {
            return Err(Error::ZeroNorm);
        }
        self.push_record(vector, norm)
    }

    /// Appends without norm validation; persistence replays records as-is.
    pub(crate) fn push_record(&mut self, vector: &[i8], norm: f64) -> Result<u64> {
        if self.pages.last().map_or(true, Page::is_full) {
            self.pages.try_reserve(1)?;
            self.pages.push(Page::try_new()?);
        }
        let page_pos = self.pages.len() - 1;
        let slot = self.pages[page_pos].push(vector, norm);
        Ok(((page_pos as u64) << PAGE_SHIFT) | slot as u64)
    }

    /// Number of embeddings across all pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages
            .last()
            .map_or(0, |last| (self.pages.len() - 1) * PAGE_CAPACITY + last.len())
    }

    /// Returns `true` when the table holds no embeddings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of allocated pages.
    #[must_use]
    pub fn pages(&self) -> usize {
        self.pages.len()
    }

    /// Cached norm for `index`, or `0.0` when the index is out of range.
    #[must_use]
    pub fn norm(&self, index: u64) -> f64 {
        Self::locate(index)
            .and_then(|(page_pos, slot)| self.pages.get(page_pos)?.norm(slot))
            .unwrap_or(0.0)
    }

    /// Borrow of the stored vector, or `None` when the index is out of
    /// range.
    #[must_use]
    pub fn embedding(&self, index: u64) -> Option<&[i8]> {
        let (page_pos, slot) = Self::locate(index)?;
        self.pages.get(page_pos)?.vector(slot)
    }

    /// Cosine similarity between two stored embeddings.
    ///
    /// Uses the cached norms, so the cost is a single int8 dot product.
    /// Returns `0.0` when either index is out of range.
    #[must_use]
    pub fn cosine_similarity(&self, a: u64, b: u64) -> f64 {
        let denom = self.norm(a) * self.norm(b);
        if denom == 0.0 {
            return 0.0;
        }
        let (Some(va), Some(vb)) = (self.embedding(a), self.embedding(b)) else {
            return 0.0;
        };
        f64::from(dot_product_i8(va, vb)) / denom
    }

    /// Iterates `(index, norm, vector)` over all embeddings in append
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, f64, &[i8])> {
        self.pages.iter().enumerate().flat_map(|(page_pos, page)| {
            page.iter().enumerate().map(move |(slot, (norm, vector))| {
                (
                    ((page_pos as u64) << PAGE_SHIFT) | slot as u64,
                    norm,
                    vector,
                )
            })
        })
    }

    /// Norm and vector for `index`; persistence reads records through
    /// this.
    pub(crate) fn record(&self, index: u64) -> Option<(f64, &[i8])> {
        let (page_pos, slot) = Self::locate(index)?;
        let page = self.pages.get(page_pos)?;
        Some((page.norm(slot)?, page.vector(slot)?))
    }

    fn locate(index: u64) -> Option<(usize, usize)> {
        let page_pos = usize::try_from(index >> PAGE_SHIFT).ok()?;
        // Masked to the page width, so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation)]
        let slot = (index & SLOT_MASK) as usize;
        Some((page_pos, slot))
    }
}
