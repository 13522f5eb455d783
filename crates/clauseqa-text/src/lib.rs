//! clauseqa-text
//!
//! Document segmentation: heading detection, sentence tokenization,
//! overlapping chunk windows and section-type classification. See `chunker`
//! for the entry point.

pub mod chunker;
pub mod heading;
pub mod section;
pub mod sentence;

pub use chunker::{ChunkerConfig, SemanticChunker};
pub use heading::{detect_heading, HeadingSignal};
pub use section::classify_section;
pub use sentence::split_sentences;
