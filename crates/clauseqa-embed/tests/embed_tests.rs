use clauseqa_embed::get_default_embedder;

#[test]
fn embedder_shapes_and_determinism() {
    let embedder = get_default_embedder(384).expect("embedder");
    let texts = vec!["grace period means thirty days".to_string(), "grace period means thirty days".to_string()];
    let embs = embedder.embed_batch(&texts).expect("embed_batch");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), 384, "embedding dim follows the requested dimensionality");

    // Norm approximately 1.0
    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    // Deterministic for same input
    for (a, b) in v1.iter().zip(v2.iter()) {
        assert!((a - b).abs() <= 1e-6);
    }
}

#[test]
fn embed_one_matches_batch() {
    let embedder = get_default_embedder(128).expect("embedder");
    let single = embedder.embed_one("waiting period of ninety days").expect("embed_one");
    let batch = embedder
        .embed_batch(&["waiting period of ninety days".to_string()])
        .expect("embed_batch");
    assert_eq!(single, batch[0]);
}

#[test]
fn tokens_are_case_and_punctuation_insensitive() {
    let embedder = get_default_embedder(384).expect("embedder");
    let a = embedder.embed_one("Grace period.").expect("embed");
    let b = embedder.embed_one("grace period").expect("embed");
    assert_eq!(a, b, "token normalization should erase case and edge punctuation");
}

#[test]
fn disjoint_texts_differ() {
    let embedder = get_default_embedder(384).expect("embedder");
    let a = embedder.embed_one("maternity benefits apply").expect("embed");
    let b = embedder.embed_one("deductible excess clause").expect("embed");
    assert_ne!(a, b);
}
