//! End-to-end store tests: multi-page tables surviving save/load cycles
//! with byte-exact contents and identical similarity scores.

use quiver_core::{EmbeddingTable, EMBEDDING_DIM, PAGE_CAPACITY, RECORD_BYTES};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;

fn random_vector(rng: &mut StdRng) -> Vec<i8> {
    (0..EMBEDDING_DIM).map(|_| rng.gen_range(-128i8..=127)).collect()
}

fn extend_table(table: &mut EmbeddingTable, rng: &mut StdRng, count: usize) {
    for _ in 0..count {
        table.add_embedding(&random_vector(rng), -1.0).unwrap();
    }
}

fn assert_tables_equal(left: &EmbeddingTable, right: &EmbeddingTable) {
    assert_eq!(left.len(), right.len());
    for (index, norm, vector) in left.iter() {
        assert_eq!(right.norm(index), norm);
        assert_eq!(right.embedding(index).unwrap(), vector);
    }
}

#[test]
fn test_multi_page_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.qvr");
    let mut rng = StdRng::seed_from_u64(1701);

    let mut table = EmbeddingTable::with_capacity(4).unwrap();
    extend_table(&mut table, &mut rng, 3 * PAGE_CAPACITY + 464);

    table.serialize(&path).unwrap();
    assert_eq!(
        fs::metadata(&path).unwrap().len(),
        (table.len() * RECORD_BYTES) as u64
    );

    let loaded = EmbeddingTable::deserialize(&path).unwrap();
    assert_eq!(loaded.pages(), 4);
    assert_tables_equal(&table, &loaded);

    // Similarity across a page boundary is identical after the reload.
    let a = (PAGE_CAPACITY - 1) as u64;
    let b = PAGE_CAPACITY as u64;
    assert_eq!(
        loaded.cosine_similarity(a, b),
        table.cosine_similarity(a, b)
    );
}

#[test]
fn test_incremental_save_cycles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cycles.qvr");
    let mut rng = StdRng::seed_from_u64(4242);

    let mut table = EmbeddingTable::with_capacity(8).unwrap();
    let mut expected_records = 0;

    for batch in [700usize, 250, 1100] {
        extend_table(&mut table, &mut rng, batch);
        table.serialize(&path).unwrap();
        expected_records += batch;
        assert_eq!(
            fs::metadata(&path).unwrap().len(),
            (expected_records * RECORD_BYTES) as u64
        );
    }

    let loaded = EmbeddingTable::deserialize(&path).unwrap();
    assert_tables_equal(&table, &loaded);
}

#[test]
fn test_reload_then_continue_appending() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.qvr");
    let mut rng = StdRng::seed_from_u64(77);

    let mut original = EmbeddingTable::with_capacity(4).unwrap();
    extend_table(&mut original, &mut rng, 600);
    original.serialize(&path).unwrap();

    // Resume from disk, append, and save back to the same file.
    let mut resumed = EmbeddingTable::deserialize(&path).unwrap();
    assert_eq!(resumed.len(), 600);
    extend_table(&mut resumed, &mut rng, 10);
    resumed.serialize(&path).unwrap();

    assert_eq!(
        fs::metadata(&path).unwrap().len(),
        (610 * RECORD_BYTES) as u64
    );

    let last = EmbeddingTable::deserialize(&path).unwrap();
    assert_tables_equal(&resumed, &last);
    assert_eq!(last.len(), 610);
}
