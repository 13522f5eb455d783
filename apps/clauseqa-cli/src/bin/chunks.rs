use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use clauseqa_core::config::Config;
use clauseqa_core::types::SectionType;
use clauseqa_text::{ChunkerConfig, SemanticChunker};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(doc_path) = args.first().map(PathBuf::from) else {
        eprintln!("Usage: clauseqa-chunks <document.txt>");
        std::process::exit(1);
    };
    let config = Config::load()?;
    let settings = config.retrieval();
    let document_text = fs::read_to_string(&doc_path)?;

    let chunker = SemanticChunker::new(ChunkerConfig {
        window_words: settings.chunk_window_words,
        overlap_words: settings.chunk_overlap_words,
        min_chunk_words: settings.min_chunk_words,
    });
    let chunks = chunker.chunk(&doc_path.to_string_lossy(), &document_text);

    println!("🎯 Created {} semantic chunks from {}", chunks.len(), doc_path.display());
    let mut type_counts: HashMap<SectionType, usize> = HashMap::new();
    for chunk in &chunks {
        *type_counts.entry(chunk.metadata.section_type).or_insert(0) += 1;
    }
    let mut distribution: Vec<(SectionType, usize)> = type_counts.into_iter().collect();
    distribution.sort_by(|a, b| b.1.cmp(&a.1));
    println!("📊 Chunk distribution: {:?}", distribution);

    for chunk in &chunks {
        println!(
            "  [{:>3}] {:?} | {} words | heading={} | section=\"{}\"",
            chunk.metadata.chunk_index,
            chunk.metadata.section_type,
            chunk.metadata.word_count,
            chunk.metadata.is_heading,
            chunk.metadata.section,
        );
    }
    Ok(())
}
