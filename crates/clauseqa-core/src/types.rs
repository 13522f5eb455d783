//! Domain types shared by the chunking, indexing and ranking crates.

use serde::{Deserialize, Serialize};

pub type ChunkId = String;

/// Closed set of section categories a chunk can be classified into.
/// `PolicyClause` is the fallback when no keyword group matches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Definitions,
    Coverage,
    Exclusions,
    Limits,
    Claims,
    Premiums,
    Conditions,
    PolicyClause,
}

/// Whether a chunk came from a heading-opened section or running content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    Heading,
    Content,
}

/// Structural attributes attached to every chunk, computed from the chunk's
/// own text plus its parent section.
///
/// Invariant: `word_count` equals the whitespace-token count of the chunk
/// text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub source: String,
    pub section: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    #[serde(rename = "chunk_type")]
    pub chunk_kind: ChunkKind,
    pub is_heading: bool,
    pub chunk_index: usize,
    pub word_count: usize,
    pub has_numbers: bool,
    pub has_definitions: bool,
}

/// A bounded span of document text, the unit of retrieval.
///
/// `embedding`, when present, has exactly the provider's declared dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: ChunkId,
    pub text: String,
    pub metadata: ChunkMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

/// A retrieved chunk with its boosted relevance score. Scores are only
/// meaningful for ordering within a single query.
#[derive(Debug, Clone)]
pub struct RetrievalResult {
    pub chunk: DocumentChunk,
    pub score: f32,
}

/// Coarse purpose category inferred for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    Definition,
    SpecificValue,
    CoverageCheck,
    ExclusionCheck,
    TimePeriod,
    Limits,
    General,
}

/// Intent classification output: the winning category plus auxiliary
/// signals derived from the question text.
#[derive(Debug, Clone)]
pub struct QueryIntent {
    pub kind: IntentKind,
    pub looking_for: String,
    pub expects_numbers: bool,
    pub key_concepts: Vec<String>,
    pub confidence: f32,
}

impl QueryIntent {
    pub fn general() -> Self {
        Self {
            kind: IntentKind::General,
            looking_for: "general information".to_string(),
            expects_numbers: false,
            key_concepts: Vec::new(),
            confidence: 0.0,
        }
    }
}
