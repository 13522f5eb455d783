//! The retrieval pipeline.
//!
//! One document at a time: segment, embed in provider batches, rebuild the
//! index, then answer questions sequentially. The index is purged at the
//! end of every run, success or failure, so no document state leaks into
//! the next one.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use clauseqa_core::config::RetrievalSettings;
use clauseqa_core::error::Error;
use clauseqa_core::traits::{AnswerComposer, Embedder};
use clauseqa_core::types::{DocumentChunk, QueryIntent, RetrievalResult};
use clauseqa_text::{ChunkerConfig, SemanticChunker};
use clauseqa_vector::FlatIndex;

use crate::intent::IntentClassifier;
use crate::score::{apply_boosts, ScoreContext};

/// Provider batch size for chunk embedding. Batch boundaries are a
/// throughput detail and never affect chunking or scoring.
const EMBED_BATCH: usize = 32;

pub struct RetrievalPipeline {
    chunker: SemanticChunker,
    embedder: Arc<dyn Embedder>,
    intents: IntentClassifier,
    index: FlatIndex,
    settings: RetrievalSettings,
}

impl RetrievalPipeline {
    pub fn new(settings: RetrievalSettings, embedder: Box<dyn Embedder>, index_dir: &Path) -> Self {
        let embedder: Arc<dyn Embedder> = Arc::from(embedder);
        let chunker = SemanticChunker::new(ChunkerConfig {
            window_words: settings.chunk_window_words,
            overlap_words: settings.chunk_overlap_words,
            min_chunk_words: settings.min_chunk_words,
        });
        let intents = IntentClassifier::new(embedder.clone());
        let index = FlatIndex::open(settings.embedding_dim, settings.max_search_candidates, index_dir);
        Self { chunker, embedder, intents, index, settings }
    }

    /// Chunk, embed and index one document, replacing all prior index
    /// contents. Any failure purges partial state and surfaces a single
    /// ingestion error. Returns the number of chunks indexed; an empty
    /// document yields zero without error.
    pub fn ingest(&mut self, source: &str, document_text: &str) -> Result<usize> {
        match self.ingest_inner(source, document_text) {
            Ok(count) => Ok(count),
            Err(e) => {
                self.index.purge();
                Err(Error::Ingestion(format!("{e:#}")).into())
            }
        }
    }

    fn ingest_inner(&mut self, source: &str, document_text: &str) -> Result<usize> {
        let mut chunks = self.chunker.chunk(source, document_text);
        tracing::info!(chunks = chunks.len(), source, "segmented document");
        if chunks.is_empty() {
            self.index.rebuild(&[])?;
            return Ok(0);
        }
        self.embed_chunks(&mut chunks)?;
        self.index.rebuild(&chunks)?;
        tracing::info!(vectors = self.index.len(), "index rebuilt");
        Ok(chunks.len())
    }

    fn embed_chunks(&self, chunks: &mut [DocumentChunk]) -> Result<()> {
        let pb = ProgressBar::new(chunks.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} chunks embedded")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        for batch in chunks.chunks_mut(EMBED_BATCH) {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let embeddings = self.embedder.embed_batch(&texts)?;
            anyhow::ensure!(
                embeddings.len() == batch.len(),
                "embedder returned {} vectors for {} texts",
                embeddings.len(),
                batch.len()
            );
            for (chunk, embedding) in batch.iter_mut().zip(embeddings) {
                chunk.embedding = Some(embedding);
            }
            pb.inc(texts.len() as u64);
        }
        pb.finish_and_clear();
        Ok(())
    }

    pub fn classify_intent(&self, question: &str) -> Result<QueryIntent> {
        self.intents.classify(question)
    }

    /// Embed the question, over-fetch raw candidates, run the boost chain,
    /// drop results under the similarity threshold and return the top
    /// `top_k` by boosted score (stable order on ties).
    pub fn search_similar(&self, question: &str, intent: &QueryIntent) -> Result<Vec<RetrievalResult>> {
        let query_embedding = self.embedder.embed_one(question)?;
        let mut results = Vec::new();
        for (raw_similarity, position) in self.index.search(&query_embedding, self.settings.top_k) {
            let Some(stored) = self.index.entry(position) else { continue };
            let ctx = ScoreContext {
                metadata: &stored.metadata,
                query: Some(question),
                chunk_text: Some(&stored.text),
                intent: Some(intent),
            };
            let boosted = apply_boosts(raw_similarity, &ctx);
            if boosted < self.settings.similarity_threshold {
                continue;
            }
            results.push(RetrievalResult {
                chunk: DocumentChunk {
                    id: stored.id.clone(),
                    text: stored.text.clone(),
                    metadata: stored.metadata.clone(),
                    embedding: None,
                },
                score: boosted,
            });
        }
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(self.settings.top_k);
        Ok(results)
    }

    /// Answer one question. A failure here is converted into a visible
    /// placeholder answer so remaining questions still run.
    pub fn answer(&self, question: &str, composer: &dyn AnswerComposer) -> String {
        match self.try_answer(question, composer) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("question failed: {e:#}");
                format!("Error answering question: {e:#}")
            }
        }
    }

    fn try_answer(&self, question: &str, composer: &dyn AnswerComposer) -> Result<String> {
        let intent = self.intents.classify(question)?;
        tracing::debug!(
            intent = ?intent.kind,
            looking_for = %intent.looking_for,
            confidence = intent.confidence,
            "classified question"
        );
        let results = self.search_similar(question, &intent)?;
        tracing::debug!(retrieved = results.len(), "retrieved passages");
        composer.compose(question, &results)
    }

    /// Full run: ingest, answer every question in order, then purge the
    /// index on both the success and failure paths.
    pub fn run(
        &mut self,
        source: &str,
        document_text: &str,
        questions: &[String],
        composer: &dyn AnswerComposer,
    ) -> Result<Vec<String>> {
        let outcome = self.run_inner(source, document_text, questions, composer);
        self.index.purge();
        outcome
    }

    fn run_inner(
        &mut self,
        source: &str,
        document_text: &str,
        questions: &[String],
        composer: &dyn AnswerComposer,
    ) -> Result<Vec<String>> {
        self.ingest(source, document_text)?;
        Ok(questions.iter().map(|q| self.answer(q, composer)).collect())
    }

    pub fn index(&self) -> &FlatIndex {
        &self.index
    }

    pub fn purge(&mut self) {
        self.index.purge();
    }
}
