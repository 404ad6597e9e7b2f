//! Paged append-only storage for quantized embeddings.
//!
//! Embeddings live in fixed-capacity pages. When the current page fills,
//! the next append opens a new one; stored vectors are never moved or
//! copied afterwards. A global index packs the page position and the
//! in-page slot: `index = (page << 9) | slot`.

mod page;
mod persistence;
mod table;

pub use table::EmbeddingTable;

/// Fixed dimension of every stored embedding.
pub const EMBEDDING_DIM: usize = 512;

/// Number of embedding slots in one page.
pub const PAGE_CAPACITY: usize = 512;

/// Bytes of one on-disk record: an f64 norm followed by the vector.
pub const RECORD_BYTES: usize = std::mem::size_of::<f64>() + EMBEDDING_DIM;

/// log2 of `PAGE_CAPACITY`: the shift separating page position from slot.
pub(crate) const PAGE_SHIFT: u32 = PAGE_CAPACITY.trailing_zeros();

/// Mask extracting the in-page slot from a global index.
pub(crate) const SLOT_MASK: u64 = PAGE_CAPACITY as u64 - 1;

/// Page-arena reservation of `EmbeddingTable::new`, sized for roughly 268
/// million embeddings before the arena itself reallocates.
pub(crate) const DEFAULT_PAGE_SLOTS: usize = 1024 * 512;
