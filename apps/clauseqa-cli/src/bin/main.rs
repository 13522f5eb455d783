use std::env;
use std::fs;
use std::path::PathBuf;

use clauseqa_core::config::{expand_path, Config};
use clauseqa_embed::get_default_embedder;
use clauseqa_rank::{PassageAnswerer, RetrievalPipeline};
use tracing_subscriber::EnvFilter;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} ask <document.txt> <question> [question...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "ask" => {
            let Some(doc_path) = args.first().map(PathBuf::from) else {
                eprintln!("Usage: clauseqa ask <document.txt> <question> [question...]");
                std::process::exit(1);
            };
            let questions: Vec<String> = args[1..].to_vec();
            if questions.is_empty() {
                eprintln!("No questions given");
                std::process::exit(1);
            }
            let document_text = fs::read_to_string(&doc_path)?;
            let settings = config.retrieval();
            let index_dir = expand_path(&settings.index_dir);
            let embedder = get_default_embedder(settings.embedding_dim)?;
            let mut pipeline = RetrievalPipeline::new(settings, embedder, &index_dir);

            let source = doc_path.to_string_lossy().to_string();
            let chunk_count = pipeline.ingest(&source, &document_text)?;
            println!("Created {} semantic chunks", chunk_count);

            let composer = PassageAnswerer;
            for (i, question) in questions.iter().enumerate() {
                println!("\nQuestion {}/{}: {}", i + 1, questions.len(), question);
                report_retrieval(&pipeline, question);
                let answer = pipeline.answer(question, &composer);
                println!("{}", answer);
            }
            pipeline.purge();
            println!("\n✅ Completed {} questions, index purged", questions.len());
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn report_retrieval(pipeline: &RetrievalPipeline, question: &str) {
    let Ok(intent) = pipeline.classify_intent(question) else { return };
    println!(
        "   Intent: {:?} - {} (conf: {:.2})",
        intent.kind, intent.looking_for, intent.confidence
    );
    let Ok(results) = pipeline.search_similar(question, &intent) else { return };
    println!("   Retrieved {} chunks:", results.len());
    for (i, result) in results.iter().enumerate() {
        let preview: String = result.chunk.text.chars().take(60).collect();
        println!(
            "      {}. {:.3} | {:?} | {}...",
            i + 1,
            result.score,
            result.chunk.metadata.section_type,
            preview.replace('\n', " ")
        );
    }
}
