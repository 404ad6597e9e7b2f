//! Flat-record binary persistence for embedding tables.
//!
//! # Record Format
//!
//! ```text
//! [norm: 8 bytes, f64][vector: 512 bytes, i8 components]
//! ```
//!
//! A file is a flat sequence of 520-byte records in native byte order with
//! no header, magic, or version field; files do not transfer between
//! machines of different endianness. The record count is `file_size / 520`
//! and any remainder means corruption.
//!
//! `serialize` appends only the records the file does not already hold, so
//! saving a growing table repeatedly costs one write per new embedding. A
//! file with a partial record, or holding more records than the table, is
//! truncated and rewritten from scratch.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::{debug, warn};

use super::{EmbeddingTable, EMBEDDING_DIM, PAGE_CAPACITY, RECORD_BYTES};
use crate::error::{Error, Result};

const RECORD_LEN: u64 = RECORD_BYTES as u64;

impl EmbeddingTable {
    /// Writes records missing from `path`, creating the file if needed.
    pub fn serialize<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;

        let disk_len = file.metadata()?.len();
        let total = self.len() as u64;
        let mut existing = disk_len / RECORD_LEN;

        if disk_len % RECORD_LEN != 0 {
            warn!(
                path = %path.display(),
                len = disk_len,
                "partial record in embedding file, rewriting from scratch"
            );
            file.set_len(0)?;
            existing = 0;
        } else if existing > total {
            warn!(
                path = %path.display(),
                on_disk = existing,
                in_table = total,
                "embedding file is ahead of the table, rewriting from scratch"
            );
            file.set_len(0)?;
            existing = 0;
        }

        file.seek(SeekFrom::End(0))?;
        let mut writer = BufWriter::new(file);
        let mut record = [0u8; RECORD_BYTES];

        for index in existing..total {
            let Some((norm, vector)) = self.record(index) else {
                break;
            };
            record[..8].copy_from_slice(&norm.to_ne_bytes());
            for (dst, v) in record[8..].iter_mut().zip(vector) {
                *dst = v.to_ne_bytes()[0];
            }
            writer.write_all(&record)?;
        }
        writer.flush()?;

        debug!(
            path = %path.display(),
            appended = total - existing,
            total,
            "serialized embedding table"
        );
        Ok(())
    }

    /// Loads a table from `path`.
    ///
    /// An empty file yields an empty table. A missing file is an IO error,
    /// and a length that is not a whole number of records is
    /// [`Error::CorruptFile`].
    pub fn deserialize<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let disk_len = file.metadata()?.len();

        if disk_len % RECORD_LEN != 0 {
            return Err(Error::CorruptFile { len: disk_len });
        }
        let records = disk_len / RECORD_LEN;

        // One page per 512 records, reserved up front. A count past
        // usize::MAX cannot be held in memory; let the reservation fail.
        let page_slots =
            usize::try_from(records.div_ceil(PAGE_CAPACITY as u64)).unwrap_or(usize::MAX);
        let mut table = Self::with_capacity(page_slots)?;

        let mut reader = BufReader::new(file);
        let mut record = [0u8; RECORD_BYTES];
        let mut vector = [0i8; EMBEDDING_DIM];

        for _ in 0..records {
            reader.read_exact(&mut record)?;
            let norm = f64::from_ne_bytes([
                record[0], record[1], record[2], record[3], record[4], record[5], record[6],
                record[7],
            ]);
            for (dst, &b) in vector.iter_mut().zip(&record[8..]) {
                *dst = i8::from_ne_bytes([b]);
            }
            table.push_record(&vector, norm)?;
        }

        debug!(path = %path.display(), records, "deserialized embedding table");
        Ok(table)
    }
}
