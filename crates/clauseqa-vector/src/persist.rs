//! Persisted index layout: a little-endian vector blob and a JSON sidecar
//! mapping integer position to the chunk snapshot. The pair is written and
//! removed together; a missing or unreadable pair means an empty index.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use clauseqa_core::error::Error;
use clauseqa_core::types::ChunkMetadata;
use serde::{Deserialize, Serialize};

// "CQAV" in little-endian byte order.
pub(crate) const VECTORS_MAGIC: u32 = 0x5641_5143;
pub(crate) const VECTORS_VERSION: u32 = 1;

/// Snapshot of a chunk stored alongside its vector for result lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredChunk {
    pub id: String,
    pub text: String,
    pub metadata: ChunkMetadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Sidecar {
    pub built_at: String,
    pub dim: usize,
    pub entries: HashMap<usize, StoredChunk>,
}

/// vectors.bin: `magic, version, dim, count` as u32 LE, then `count * dim`
/// f32 LE values in position order.
pub(crate) fn write_vectors(path: &Path, vectors: &[Vec<f32>], dim: usize) -> Result<(), Error> {
    let mut file = fs::File::create(path).map_err(|e| Error::Persistence(e.to_string()))?;
    let header = [
        VECTORS_MAGIC,
        VECTORS_VERSION,
        u32::try_from(dim).map_err(|e| Error::Persistence(e.to_string()))?,
        u32::try_from(vectors.len()).map_err(|e| Error::Persistence(e.to_string()))?,
    ];
    for word in header {
        file.write_all(&word.to_le_bytes())
            .map_err(|e| Error::Persistence(e.to_string()))?;
    }
    for vector in vectors {
        for value in vector {
            file.write_all(&value.to_le_bytes())
                .map_err(|e| Error::Persistence(e.to_string()))?;
        }
    }
    Ok(())
}

pub(crate) fn read_vectors(path: &Path) -> anyhow::Result<(usize, Vec<Vec<f32>>)> {
    let data = fs::read(path)?;
    anyhow::ensure!(data.len() >= 16, "vector blob too short for header");
    let word = |i: usize| -> anyhow::Result<u32> {
        let bytes: [u8; 4] = data[i * 4..i * 4 + 4].try_into()?;
        Ok(u32::from_le_bytes(bytes))
    };
    anyhow::ensure!(word(0)? == VECTORS_MAGIC, "vector blob has wrong magic");
    anyhow::ensure!(word(1)? == VECTORS_VERSION, "unsupported vector blob version");
    let dim = word(2)? as usize;
    let count = word(3)? as usize;
    let expected = 16 + count * dim * 4;
    anyhow::ensure!(data.len() == expected, "vector blob length {} != expected {}", data.len(), expected);
    let mut vectors = Vec::with_capacity(count);
    let mut offset = 16usize;
    for _ in 0..count {
        let mut v = Vec::with_capacity(dim);
        for _ in 0..dim {
            let bytes: [u8; 4] = data[offset..offset + 4].try_into()?;
            v.push(f32::from_le_bytes(bytes));
            offset += 4;
        }
        vectors.push(v);
    }
    Ok((dim, vectors))
}

pub(crate) fn write_sidecar(path: &Path, sidecar: &Sidecar) -> Result<(), Error> {
    let json = serde_json::to_string(sidecar).map_err(|e| Error::Persistence(e.to_string()))?;
    fs::write(path, json).map_err(|e| Error::Persistence(e.to_string()))
}

pub(crate) fn read_sidecar(path: &Path) -> anyhow::Result<Sidecar> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
