//! Overlapping semantic chunking.
//!
//! Documents are split into heading-bounded sections, sections into
//! sentences, and sentences are windowed into chunks by word budget with a
//! greedy sentence-suffix overlap. Each chunk carries fixed-schema metadata
//! computed from its own text plus its parent section.

use clauseqa_core::types::{ChunkKind, ChunkMetadata, DocumentChunk};

use crate::heading::detect_heading;
use crate::section::classify_section;
use crate::sentence::split_sentences;

#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    pub window_words: usize,
    pub overlap_words: usize,
    pub min_chunk_words: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self { window_words: 100, overlap_words: 20, min_chunk_words: 50 }
    }
}

/// Transient intermediate produced by boundary detection; never persisted.
struct Section {
    text: String,
    heading: String,
    kind: ChunkKind,
}

#[derive(Default)]
pub struct SemanticChunker {
    config: ChunkerConfig,
}

impl SemanticChunker {
    pub fn new(config: ChunkerConfig) -> Self {
        Self { config }
    }

    /// Split `document_text` into ordered chunks with embeddings unset.
    /// An empty or whitespace-only document yields zero chunks.
    pub fn chunk(&self, source: &str, document_text: &str) -> Vec<DocumentChunk> {
        let text = normalize_text(document_text);
        let mut chunks = Vec::new();
        for section in split_sections(&text) {
            self.chunk_section(source, &section, &mut chunks);
        }
        tracing::debug!(chunks = chunks.len(), source, "segmented document");
        chunks
    }

    fn chunk_section(&self, source: &str, section: &Section, out: &mut Vec<DocumentChunk>) {
        let mut current: Vec<String> = Vec::new();
        let mut current_words = 0usize;
        let mut section_chunk_index = 0usize;
        for sentence in split_sentences(&section.text) {
            let sentence_words = word_count(&sentence);
            if current_words + sentence_words > self.config.window_words && !current.is_empty() {
                let text = current.join(" ");
                if word_count(&text) >= self.config.min_chunk_words {
                    out.push(self.build_chunk(source, section, &text, section_chunk_index, out.len()));
                    section_chunk_index += 1;
                }
                let mut seeded = overlap_suffix(&current, self.config.overlap_words);
                seeded.push(sentence);
                current_words = seeded.iter().map(|s| word_count(s)).sum();
                current = seeded;
            } else {
                current_words += sentence_words;
                current.push(sentence);
            }
        }
        if !current.is_empty() {
            let text = current.join(" ");
            if word_count(&text) >= self.config.min_chunk_words {
                out.push(self.build_chunk(source, section, &text, section_chunk_index, out.len()));
            }
        }
    }

    fn build_chunk(
        &self,
        source: &str,
        section: &Section,
        text: &str,
        chunk_index: usize,
        sequence: usize,
    ) -> DocumentChunk {
        let lower = text.to_lowercase();
        let metadata = ChunkMetadata {
            source: source.to_string(),
            section: truncate_chars(&section.heading, 100),
            section_type: classify_section(text),
            chunk_kind: section.kind,
            is_heading: section.kind == ChunkKind::Heading,
            chunk_index,
            word_count: word_count(text),
            has_numbers: text.chars().any(|c| c.is_ascii_digit()),
            has_definitions: lower.contains("means") || lower.contains("defined as"),
        };
        DocumentChunk { id: chunk_id(text, sequence), text: text.to_string(), metadata, embedding: None }
    }
}

/// Accumulate trimmed non-blank lines into heading-bounded sections. The
/// heading line itself becomes the first text line of its section.
fn split_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section { text: String::new(), heading: String::new(), kind: ChunkKind::Content };
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if detect_heading(line).is_heading {
            if !current.text.trim().is_empty() {
                sections.push(current);
            }
            current = Section { text: line.to_string(), heading: line.to_string(), kind: ChunkKind::Heading };
        } else {
            if !current.text.is_empty() {
                current.text.push('\n');
            }
            current.text.push_str(line);
        }
    }
    if !current.text.trim().is_empty() {
        sections.push(current);
    }
    sections
}

/// Greedy suffix of `sentences` whose cumulative word count fits the
/// overlap budget, in original order.
fn overlap_suffix(sentences: &[String], budget: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut words = 0usize;
    for sentence in sentences.iter().rev() {
        let w = word_count(sentence);
        if words + w <= budget {
            out.insert(0, sentence.clone());
            words += w;
        } else {
            break;
        }
    }
    out
}

/// Codepoint cleanup carried over from upstream text extraction: NBSP and
/// curly quotes to ASCII. Whitespace structure is left intact because the
/// boundary detector is line-based.
fn normalize_text(text: &str) -> String {
    text.replace('\u{00a0}', " ")
        .replace('\u{2019}', "'")
        .replace(['\u{201c}', '\u{201d}'], "\"")
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn chunk_id(text: &str, sequence: usize) -> String {
    let hash = blake3::hash(text.as_bytes()).to_hex();
    format!("{}:{}", &hash.as_str()[..16], sequence)
}
