use std::env;

use clauseqa_core::config::{expand_path, Config};
use clauseqa_embed::get_default_embedder;
use clauseqa_rank::RetrievalPipeline;
use clauseqa_vector::FlatIndex;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: clauseqa-search <query> [--limit N] [--text <term>]");
        std::process::exit(1);
    }
    let query_text = &args[0];
    let mut limit = 10usize;
    let mut text_term: Option<String> = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--limit" => {
                if let Some(l) = args.get(i + 1).and_then(|v| v.parse::<usize>().ok()) {
                    limit = l;
                    i += 1;
                } else {
                    eprintln!("Error: --limit requires a number");
                    std::process::exit(1);
                }
            }
            "--text" => {
                if let Some(term) = args.get(i + 1) {
                    text_term = Some(term.clone());
                    i += 1;
                } else {
                    eprintln!("Error: --text requires a term");
                    std::process::exit(1);
                }
            }
            _ => {}
        }
        i += 1;
    }

    let config = Config::load()?;
    let settings = config.retrieval();
    let index_dir = expand_path(&settings.index_dir);
    println!("🔍 clauseqa-search\n==================");
    println!("Query: {}", query_text);
    println!("Index directory: {}", index_dir.display());

    if let Some(term) = text_term {
        // Plain substring scan over the persisted snapshots, no embedding.
        let index = FlatIndex::open(settings.embedding_dim, settings.max_search_candidates, &index_dir);
        let hits = index.find_by_text(&term, limit);
        println!("\nFound {} chunks mentioning \"{}\"", hits.len(), term);
        for (mentions, chunk) in hits {
            let preview: String = chunk.text.chars().take(80).collect();
            println!("  {} mentions | {:?} | {}...", mentions, chunk.metadata.section_type, preview);
        }
        return Ok(());
    }

    let embedder = get_default_embedder(settings.embedding_dim)?;
    let pipeline = RetrievalPipeline::new(settings, embedder, &index_dir);
    if pipeline.index().is_empty() {
        println!("\nIndex is empty (nothing persisted at this path); no results.");
        return Ok(());
    }
    let intent = pipeline.classify_intent(query_text)?;
    println!(
        "Intent: {:?} - {} (conf: {:.2})",
        intent.kind, intent.looking_for, intent.confidence
    );
    let results = pipeline.search_similar(query_text, &intent)?;
    println!("\n🔍 Found {} results for: \"{}\"", results.len(), query_text);
    for (i, result) in results.iter().enumerate().take(limit) {
        println!(
            "\n  {}. score={:.4}  id={}  type={:?}  section={}",
            i + 1,
            result.score,
            result.chunk.id,
            result.chunk.metadata.section_type,
            result.chunk.metadata.section
        );
        println!("     📝 {}", result.chunk.text);
    }
    Ok(())
}
