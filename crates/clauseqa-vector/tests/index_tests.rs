use std::path::Path;

use clauseqa_core::types::{ChunkKind, ChunkMetadata, DocumentChunk, SectionType};
use clauseqa_vector::FlatIndex;
use tempfile::TempDir;

const DIM: usize = 8;

fn metadata(word_count: usize) -> ChunkMetadata {
    ChunkMetadata {
        source: "doc".to_string(),
        section: "TEST SECTION".to_string(),
        section_type: SectionType::PolicyClause,
        chunk_kind: ChunkKind::Content,
        is_heading: false,
        chunk_index: 0,
        word_count,
        has_numbers: false,
        has_definitions: false,
    }
}

fn chunk(id: &str, text: &str, embedding: Vec<f32>) -> DocumentChunk {
    DocumentChunk {
        id: id.to_string(),
        text: text.to_string(),
        metadata: metadata(text.split_whitespace().count()),
        embedding: Some(embedding),
    }
}

/// One-hot vectors are orthogonal, so self-similarity searches are exact.
fn one_hot(i: usize) -> Vec<f32> {
    let mut v = vec![0f32; DIM];
    v[i] = 3.0; // unnormalized on purpose; rebuild must normalize
    v
}

fn open_index(dir: &Path) -> FlatIndex {
    FlatIndex::open(DIM, 15, dir)
}

#[test]
fn self_similarity_returns_own_position_first() {
    let tmp = TempDir::new().expect("tmp");
    let mut index = open_index(tmp.path());
    let chunks: Vec<DocumentChunk> =
        (0..5).map(|i| chunk(&format!("c{i}"), &format!("chunk {i}"), one_hot(i))).collect();
    index.rebuild(&chunks).expect("rebuild");
    for i in 0..5 {
        let hits = index.search(&one_hot(i), 1);
        let (score, position) = hits[0];
        assert_eq!(position, i);
        assert!((score - 1.0).abs() < 1e-5, "cosine self-similarity ~1.0, got {score}");
    }
}

#[test]
fn empty_index_searches_empty() {
    let tmp = TempDir::new().expect("tmp");
    let index = open_index(tmp.path());
    assert!(index.is_empty());
    assert!(index.search(&one_hot(0), 4).is_empty());
}

#[test]
fn purge_then_search_is_empty_and_files_are_gone() {
    let tmp = TempDir::new().expect("tmp");
    let mut index = open_index(tmp.path());
    index.rebuild(&[chunk("a", "alpha", one_hot(0))]).expect("rebuild");
    assert!(tmp.path().join("vectors.bin").exists());
    assert!(tmp.path().join("chunks.json").exists());

    index.purge();
    assert!(index.search(&one_hot(0), 4).is_empty());
    assert!(index.entry(0).is_none());
    assert!(!tmp.path().join("vectors.bin").exists());
    assert!(!tmp.path().join("chunks.json").exists());
}

#[test]
fn rebuild_replaces_prior_contents_entirely() {
    let tmp = TempDir::new().expect("tmp");
    let mut index = open_index(tmp.path());
    index
        .rebuild(&[chunk("first:0", "first doc", one_hot(0)), chunk("first:1", "first doc two", one_hot(1))])
        .expect("rebuild");
    index
        .rebuild(&[chunk("second:0", "second doc", one_hot(2))])
        .expect("rebuild");

    assert_eq!(index.len(), 1);
    for (_, position) in index.search(&one_hot(2), 10) {
        let stored = index.entry(position).expect("entry");
        assert!(stored.id.starts_with("second:"), "stale chunk survived rebuild: {}", stored.id);
    }
}

#[test]
fn persisted_pair_reloads_together() {
    let tmp = TempDir::new().expect("tmp");
    {
        let mut index = open_index(tmp.path());
        index
            .rebuild(&[chunk("a", "grace period clause", one_hot(0)), chunk("b", "coverage clause", one_hot(1))])
            .expect("rebuild");
    }
    let reopened = open_index(tmp.path());
    assert_eq!(reopened.len(), 2);
    let hits = reopened.search(&one_hot(1), 1);
    assert_eq!(hits[0].1, 1);
    assert_eq!(reopened.entry(1).expect("entry").id, "b");
}

#[test]
fn unreadable_pair_resets_to_empty() {
    let tmp = TempDir::new().expect("tmp");
    std::fs::write(tmp.path().join("vectors.bin"), b"not a vector blob").expect("write");
    std::fs::write(tmp.path().join("chunks.json"), b"{ bad json").expect("write");
    let index = open_index(tmp.path());
    assert!(index.is_empty());
}

#[test]
fn missing_sidecar_means_empty_index() {
    let tmp = TempDir::new().expect("tmp");
    {
        let mut index = open_index(tmp.path());
        index.rebuild(&[chunk("a", "alpha", one_hot(0))]).expect("rebuild");
    }
    std::fs::remove_file(tmp.path().join("chunks.json")).expect("remove");
    let index = open_index(tmp.path());
    assert!(index.is_empty(), "half a persisted pair must not load");
}

#[test]
fn clear_drops_vectors_but_keeps_snapshots() {
    let tmp = TempDir::new().expect("tmp");
    let mut index = open_index(tmp.path());
    index.rebuild(&[chunk("a", "alpha", one_hot(0))]).expect("rebuild");
    index.clear();
    assert!(index.search(&one_hot(0), 4).is_empty());
    assert!(index.entry(0).is_some(), "snapshots are retained for debugging");
    assert!(!tmp.path().join("vectors.bin").exists());
}

#[test]
fn chunks_without_embeddings_are_skipped() {
    let tmp = TempDir::new().expect("tmp");
    let mut index = open_index(tmp.path());
    let mut missing = chunk("no-vec", "unembedded", one_hot(0));
    missing.embedding = None;
    index.rebuild(&[missing, chunk("ok", "embedded", one_hot(1))]).expect("rebuild");
    assert_eq!(index.len(), 1);
    assert_eq!(index.entry(0).expect("entry").id, "ok");
}

#[test]
fn find_by_text_ranks_by_mentions() {
    let tmp = TempDir::new().expect("tmp");
    let mut index = open_index(tmp.path());
    index
        .rebuild(&[
            chunk("a", "premium premium premium", one_hot(0)),
            chunk("b", "premium once", one_hot(1)),
            chunk("c", "nothing relevant", one_hot(2)),
        ])
        .expect("rebuild");
    let hits = index.find_by_text("PREMIUM", 10);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].1.id, "a");
    assert_eq!(hits[0].0, 3);
}
