use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use clauseqa_core::error::Error;
use clauseqa_core::types::DocumentChunk;

use crate::persist::{self, Sidecar, StoredChunk};

/// In-memory flat index: unit-normalized vectors scored by dot product,
/// paired by position with chunk snapshots. Always authoritative over the
/// persisted files; persistence failures are non-fatal.
pub struct FlatIndex {
    dim: usize,
    max_candidates: usize,
    vectors_path: PathBuf,
    sidecar_path: PathBuf,
    vectors: Vec<Vec<f32>>,
    entries: HashMap<usize, StoredChunk>,
}

impl FlatIndex {
    /// Open an index rooted at `index_dir`, loading any persisted pair. A
    /// missing or unreadable pair resets to an empty index with a warning.
    pub fn open(dim: usize, max_candidates: usize, index_dir: &Path) -> Self {
        let mut index = Self {
            dim,
            max_candidates,
            vectors_path: index_dir.join("vectors.bin"),
            sidecar_path: index_dir.join("chunks.json"),
            vectors: Vec::new(),
            entries: HashMap::new(),
        };
        if let Err(e) = index.load() {
            tracing::warn!("could not load existing index: {e:#}");
            index.vectors.clear();
            index.entries.clear();
        }
        index
    }

    fn load(&mut self) -> Result<()> {
        if !self.vectors_path.exists() || !self.sidecar_path.exists() {
            return Ok(());
        }
        let (dim, vectors) = persist::read_vectors(&self.vectors_path)?;
        let sidecar = persist::read_sidecar(&self.sidecar_path)?;
        anyhow::ensure!(dim == self.dim, "persisted dimension {} != configured {}", dim, self.dim);
        anyhow::ensure!(
            vectors.len() == sidecar.entries.len(),
            "vector count {} != snapshot count {}",
            vectors.len(),
            sidecar.entries.len()
        );
        self.vectors = vectors;
        self.entries = sidecar.entries;
        tracing::info!(vectors = self.vectors.len(), "loaded persisted index");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Discard all prior state and index `chunks` in input order. Chunks
    /// without an embedding are skipped. The rebuilt pair is persisted
    /// best-effort: a write failure logs a warning and leaves the
    /// in-memory state valid.
    pub fn rebuild(&mut self, chunks: &[DocumentChunk]) -> Result<()> {
        self.vectors.clear();
        self.entries.clear();
        for chunk in chunks {
            let Some(embedding) = &chunk.embedding else { continue };
            anyhow::ensure!(
                embedding.len() == self.dim,
                "chunk {} has embedding dimension {} (expected {})",
                chunk.id,
                embedding.len(),
                self.dim
            );
            self.entries.insert(
                self.vectors.len(),
                StoredChunk {
                    id: chunk.id.clone(),
                    text: chunk.text.clone(),
                    metadata: chunk.metadata.clone(),
                },
            );
            self.vectors.push(normalize(embedding));
        }
        if self.vectors.is_empty() {
            // Nothing to persist; drop any stale pair from a prior rebuild.
            for path in [&self.vectors_path, &self.sidecar_path] {
                if path.exists() {
                    let _ = fs::remove_file(path);
                }
            }
        } else if let Err(e) = self.save() {
            tracing::warn!("could not persist index: {e}");
        }
        Ok(())
    }

    /// Top candidates by cosine similarity, descending, ties in position
    /// order. Over-fetches `max_candidates` (or `k` if larger), bounded by
    /// index size, so the re-ranker can promote lower-similarity chunks.
    /// An empty index returns an empty Vec.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(f32, usize)> {
        if self.vectors.is_empty() {
            return Vec::new();
        }
        let q = normalize(query);
        let mut scored: Vec<(f32, usize)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, v)| (dot(&q, v), position))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k.max(self.max_candidates).min(self.vectors.len()));
        scored
    }

    pub fn entry(&self, position: usize) -> Option<&StoredChunk> {
        self.entries.get(&position)
    }

    /// Substring scan over stored snapshots ranked by mention count; a
    /// debugging helper for the CLI.
    pub fn find_by_text(&self, term: &str, limit: usize) -> Vec<(usize, &StoredChunk)> {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let mut hits: Vec<(usize, &StoredChunk)> = self
            .entries
            .values()
            .filter_map(|chunk| {
                let mentions = chunk.text.to_lowercase().matches(&needle).count();
                (mentions > 0).then_some((mentions, chunk))
            })
            .collect();
        hits.sort_by(|a, b| b.0.cmp(&a.0));
        hits.truncate(limit);
        hits
    }

    /// Drop vectors and the persisted blob; snapshots are retained for
    /// debugging until the next rebuild or purge.
    pub fn clear(&mut self) {
        self.vectors.clear();
        if self.vectors_path.exists() {
            let _ = fs::remove_file(&self.vectors_path);
        }
    }

    /// Drop everything, including both persisted artifacts. Called at the
    /// end of every processing run so no document state leaks into the
    /// next one.
    pub fn purge(&mut self) {
        self.vectors.clear();
        self.entries.clear();
        for path in [&self.vectors_path, &self.sidecar_path] {
            if path.exists() {
                let _ = fs::remove_file(path);
            }
        }
    }

    fn save(&self) -> Result<(), Error> {
        if let Some(parent) = self.vectors_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Persistence(e.to_string()))?;
        }
        persist::write_vectors(&self.vectors_path, &self.vectors, self.dim)?;
        let sidecar = Sidecar {
            built_at: Utc::now().to_rfc3339(),
            dim: self.dim,
            entries: self.entries.clone(),
        };
        persist::write_sidecar(&self.sidecar_path, &sidecar)
    }
}

fn normalize(v: &[f32]) -> Vec<f32> {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-12);
    v.iter().map(|x| x / norm).collect()
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
