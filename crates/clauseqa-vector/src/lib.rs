//! clauseqa-vector
//!
//! Flat cosine-similarity index over unit-normalized chunk embeddings with
//! best-effort persistence. Rebuilt per document run; position `i` in the
//! vector list always corresponds to the snapshot keyed `i`.

pub mod index;
pub mod persist;

pub use index::FlatIndex;
pub use persist::StoredChunk;
