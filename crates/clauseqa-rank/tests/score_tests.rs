use clauseqa_core::types::{ChunkKind, ChunkMetadata, IntentKind, QueryIntent, SectionType};
use clauseqa_rank::{apply_boosts, ScoreContext, BOOST_CHAIN};

fn metadata(section_type: SectionType) -> ChunkMetadata {
    ChunkMetadata {
        source: "doc".to_string(),
        section: String::new(),
        section_type,
        chunk_kind: ChunkKind::Content,
        is_heading: false,
        chunk_index: 0,
        word_count: 10,
        has_numbers: false,
        has_definitions: false,
    }
}

fn intent(kind: IntentKind) -> QueryIntent {
    QueryIntent {
        kind,
        looking_for: String::new(),
        expects_numbers: false,
        key_concepts: Vec::new(),
        confidence: 0.9,
    }
}

fn boost(name: &str) -> fn(f32, &ScoreContext<'_>) -> f32 {
    BOOST_CHAIN
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, f)| *f)
        .unwrap_or_else(|| panic!("unknown boost {name}"))
}

#[test]
fn chain_order_is_fixed() {
    let names: Vec<&str> = BOOST_CHAIN.iter().map(|(n, _)| *n).collect();
    assert_eq!(
        names,
        vec![
            "intent-alignment",
            "section-priority",
            "content-quality",
            "query-patterns",
            "keyword-density",
            "phrase-match"
        ]
    );
}

#[test]
fn boosts_never_reduce_the_score() {
    let meta = metadata(SectionType::Definitions);
    let q_intent = intent(IntentKind::Definition);
    let ctx = ScoreContext {
        metadata: &meta,
        query: Some("what is the grace period"),
        chunk_text: Some("grace period means thirty days"),
        intent: Some(&q_intent),
    };
    let raw = 0.31;
    assert!(apply_boosts(raw, &ctx) >= raw);
    for (name, f) in BOOST_CHAIN {
        assert!(f(raw, &ctx) >= raw, "boost {name} reduced the score");
    }
}

#[test]
fn scoring_is_monotonic_in_raw_similarity() {
    let meta = metadata(SectionType::Coverage);
    let q_intent = intent(IntentKind::CoverageCheck);
    let ctx = ScoreContext {
        metadata: &meta,
        query: Some("is maternity covered"),
        chunk_text: Some("maternity is covered after nine months"),
        intent: Some(&q_intent),
    };
    let low = apply_boosts(0.2, &ctx);
    let high = apply_boosts(0.4, &ctx);
    assert!(high > low);
}

#[test]
fn intent_alignment_factors() {
    let f = boost("intent-alignment");
    let defs = metadata(SectionType::Definitions);
    let q_intent = intent(IntentKind::Definition);
    let ctx = ScoreContext { metadata: &defs, query: None, chunk_text: None, intent: Some(&q_intent) };
    assert!((f(1.0, &ctx) - 1.8).abs() < 1e-6);

    let exclusions = metadata(SectionType::Exclusions);
    let q_intent = intent(IntentKind::ExclusionCheck);
    let ctx = ScoreContext { metadata: &exclusions, query: None, chunk_text: None, intent: Some(&q_intent) };
    assert!((f(1.0, &ctx) - 1.7).abs() < 1e-6);

    // Value-seeking intent over numeric content compounds 1.6 with 1.3.
    let mut limits = metadata(SectionType::Limits);
    limits.has_numbers = true;
    let q_intent = intent(IntentKind::SpecificValue);
    let ctx = ScoreContext { metadata: &limits, query: None, chunk_text: None, intent: Some(&q_intent) };
    assert!((f(1.0, &ctx) - 1.6 * 1.3).abs() < 1e-5);

    // No intent, no change.
    let ctx = ScoreContext { metadata: &defs, query: None, chunk_text: None, intent: None };
    assert!((f(1.0, &ctx) - 1.0).abs() < 1e-6);
}

#[test]
fn section_priority_factors() {
    let f = boost("section-priority");
    let table = [
        (SectionType::Definitions, 1.6),
        (SectionType::Coverage, 1.4),
        (SectionType::Limits, 1.4),
        (SectionType::Exclusions, 1.3),
        (SectionType::Conditions, 1.3),
        (SectionType::Claims, 1.2),
        (SectionType::Premiums, 1.0),
        (SectionType::PolicyClause, 1.0),
    ];
    for (section_type, factor) in table {
        let meta = metadata(section_type);
        let ctx = ScoreContext { metadata: &meta, query: None, chunk_text: None, intent: None };
        assert!((f(1.0, &ctx) - factor).abs() < 1e-6, "wrong factor for {section_type:?}");
    }
}

#[test]
fn content_quality_flags_compound() {
    let f = boost("content-quality");
    let mut meta = metadata(SectionType::PolicyClause);
    meta.has_definitions = true;
    meta.has_numbers = true;
    meta.is_heading = true;
    let ctx = ScoreContext { metadata: &meta, query: None, chunk_text: None, intent: None };
    assert!((f(1.0, &ctx) - 1.5 * 1.2 * 1.1).abs() < 1e-5);
}

#[test]
fn query_pattern_groups() {
    let f = boost("query-patterns");
    // Definition cue + "means" in a non-definitions chunk: only the 2.2.
    let meta = metadata(SectionType::PolicyClause);
    let ctx = ScoreContext {
        metadata: &meta,
        query: Some("what is the grace period"),
        chunk_text: Some("grace period means thirty days"),
        intent: None,
    };
    // The time-period group also fires only when digits are present; none here.
    assert!((f(1.0, &ctx) - 2.2).abs() < 1e-5);

    // Same cue against a definitions chunk stacks the extra 1.8.
    let defs = metadata(SectionType::Definitions);
    let ctx = ScoreContext {
        metadata: &defs,
        query: Some("what is the grace period"),
        chunk_text: Some("grace period means thirty days"),
        intent: None,
    };
    assert!((f(1.0, &ctx) - 2.2 * 1.8).abs() < 1e-5);

    // Exclusion group.
    let meta = metadata(SectionType::PolicyClause);
    let ctx = ScoreContext {
        metadata: &meta,
        query: Some("is cosmetic surgery excluded"),
        chunk_text: Some("cosmetic surgery is excluded under this policy"),
        intent: None,
    };
    assert!((f(1.0, &ctx) - 1.9).abs() < 1e-5);

    // Time-period group needs digits and a unit in the chunk.
    let ctx = ScoreContext {
        metadata: &meta,
        query: Some("how many days of waiting period"),
        chunk_text: Some("the waiting period lasts 90 days"),
        intent: None,
    };
    // days cue -> 1.7, plus the waiting-period domain pair -> 1.5.
    assert!((f(1.0, &ctx) - 1.7 * 1.5).abs() < 1e-5);

    // Domain-term pair alone.
    let ctx = ScoreContext {
        metadata: &meta,
        query: Some("tell me about the deductible"),
        chunk_text: Some("an excess applies to each admission"),
        intent: None,
    };
    assert!((f(1.0, &ctx) - 1.5).abs() < 1e-5);

    // Without both sides available, nothing fires.
    let ctx = ScoreContext { metadata: &meta, query: None, chunk_text: Some("anything"), intent: None };
    assert!((f(1.0, &ctx) - 1.0).abs() < 1e-6);
}

#[test]
fn keyword_density_tiers() {
    let f = boost("keyword-density");
    let meta = metadata(SectionType::PolicyClause);
    // All four long words present -> top tier.
    let ctx = ScoreContext {
        metadata: &meta,
        query: Some("grace period payment window"),
        chunk_text: Some("the grace period payment window lasts thirty days"),
        intent: None,
    };
    assert!((f(1.0, &ctx) - 1.4).abs() < 1e-5);

    // Half present -> middle tier is skipped, 0.5 lands in the 0.4 tier.
    let ctx = ScoreContext {
        metadata: &meta,
        query: Some("grace period refund voucher"),
        chunk_text: Some("the grace period lasts thirty days"),
        intent: None,
    };
    assert!((f(1.0, &ctx) - 1.1).abs() < 1e-5);

    // Nothing matches -> unchanged.
    let ctx = ScoreContext {
        metadata: &meta,
        query: Some("refund voucher"),
        chunk_text: Some("the grace period lasts thirty days"),
        intent: None,
    };
    assert!((f(1.0, &ctx) - 1.0).abs() < 1e-6);
}

#[test]
fn phrase_match_stacks_per_phrase() {
    let f = boost("phrase-match");
    let meta = metadata(SectionType::PolicyClause);
    let ctx = ScoreContext {
        metadata: &meta,
        query: Some("grace period, waiting period"),
        chunk_text: Some("the grace period and the waiting period are distinct"),
        intent: None,
    };
    // Two comma-separated multi-word phrases, both found verbatim.
    assert!((f(1.0, &ctx) - 1.3 * 1.3).abs() < 1e-5);

    // Single-word phrases never fire.
    let ctx = ScoreContext {
        metadata: &meta,
        query: Some("deductible"),
        chunk_text: Some("the deductible applies"),
        intent: None,
    };
    assert!((f(1.0, &ctx) - 1.0).abs() < 1e-6);
}
