//! The multiplicative boost chain.
//!
//! Raw cosine similarity is run through an ordered list of boost functions,
//! each `(score, context) -> score` and never below ×1.0. The list keeps
//! the application order explicit and each boost testable in isolation.

use std::collections::HashSet;

use clauseqa_core::types::{ChunkMetadata, IntentKind, QueryIntent, SectionType};

pub struct ScoreContext<'a> {
    pub metadata: &'a ChunkMetadata,
    pub query: Option<&'a str>,
    pub chunk_text: Option<&'a str>,
    pub intent: Option<&'a QueryIntent>,
}

pub type BoostFn = fn(f32, &ScoreContext<'_>) -> f32;

pub const BOOST_CHAIN: &[(&str, BoostFn)] = &[
    ("intent-alignment", intent_alignment),
    ("section-priority", section_priority),
    ("content-quality", content_quality),
    ("query-patterns", query_patterns),
    ("keyword-density", keyword_density),
    ("phrase-match", phrase_match),
];

/// Apply the full chain left-to-right.
pub fn apply_boosts(raw_similarity: f32, ctx: &ScoreContext<'_>) -> f32 {
    BOOST_CHAIN.iter().fold(raw_similarity, |score, (_, boost)| boost(score, ctx))
}

/// Intent vs section-type compatibility, plus a numeric-content boost for
/// value-seeking intents.
fn intent_alignment(score: f32, ctx: &ScoreContext<'_>) -> f32 {
    let Some(intent) = ctx.intent else { return score };
    let section = ctx.metadata.section_type;
    let mut s = score;
    match intent.kind {
        IntentKind::Definition if section == SectionType::Definitions => s *= 1.8,
        IntentKind::SpecificValue | IntentKind::TimePeriod
            if matches!(section, SectionType::Coverage | SectionType::Conditions | SectionType::Limits) =>
        {
            s *= 1.6;
        }
        IntentKind::CoverageCheck if section == SectionType::Coverage => s *= 1.5,
        IntentKind::ExclusionCheck if section == SectionType::Exclusions => s *= 1.7,
        _ => {}
    }
    if matches!(intent.kind, IntentKind::SpecificValue | IntentKind::TimePeriod | IntentKind::Limits)
        && ctx.metadata.has_numbers
    {
        s *= 1.3;
    }
    s
}

/// Section-type base priority, independent of intent.
fn section_priority(score: f32, ctx: &ScoreContext<'_>) -> f32 {
    score
        * match ctx.metadata.section_type {
            SectionType::Definitions => 1.6,
            SectionType::Coverage | SectionType::Limits => 1.4,
            SectionType::Exclusions | SectionType::Conditions => 1.3,
            SectionType::Claims => 1.2,
            SectionType::Premiums | SectionType::PolicyClause => 1.0,
        }
}

fn content_quality(score: f32, ctx: &ScoreContext<'_>) -> f32 {
    let mut s = score;
    if ctx.metadata.has_definitions {
        s *= 1.5;
    }
    if ctx.metadata.has_numbers {
        s *= 1.2;
    }
    if ctx.metadata.is_heading {
        s *= 1.1;
    }
    s
}

const COVERAGE_CUES: &[&str] = &["covered", "coverage", "benefit", "include"];
const COVERAGE_TERMS: &[&str] = &["covered", "coverage", "benefit", "include", "pay", "reimburse"];
const EXCLUSION_CUES: &[&str] = &["excluded", "exclusion", "not covered", "exception"];
const EXCLUSION_TERMS: &[&str] = &["excluded", "exclusion", "not covered", "exception", "does not"];
const TIME_CUES: &[&str] = &["days", "months", "years", "period", "duration"];
const TIME_TERMS: &[&str] = &["days", "months", "years"];
const LIMIT_CUES: &[&str] = &["limit", "amount", "maximum", "minimum", "sum"];
const LIMIT_TERMS: &[&str] = &["limit", "amount", "maximum", "minimum", "sum", "usd", "inr", "$"];

const DOMAIN_TERM_PAIRS: &[(&str, &[&str])] = &[
    ("premium", &["premium", "payment", "cost"]),
    ("deductible", &["deductible", "excess", "co-pay"]),
    ("claim", &["claim", "settlement", "reimbursement"]),
    ("hospitalization", &["hospitalization", "hospital", "inpatient"]),
    ("pre-existing", &["pre-existing", "pre existing", "prior condition"]),
    ("waiting period", &["waiting period", "waiting", "exclusion period"]),
];

/// Lexical cue groups: the query must contain a cue and the chunk the
/// matching response terms. Definition-seeking queries additionally favor
/// definitions sections.
fn query_patterns(score: f32, ctx: &ScoreContext<'_>) -> f32 {
    let (Some(query), Some(chunk)) = (ctx.query, ctx.chunk_text) else { return score };
    let q = query.to_lowercase();
    let c = chunk.to_lowercase();
    let mut s = score;

    if contains_any(&q, &["definition", "define", "what is", "meaning"]) {
        if c.contains("means") || c.contains("definition") {
            s *= 2.2;
        }
        if ctx.metadata.section_type == SectionType::Definitions {
            s *= 1.8;
        }
    }
    if contains_any(&q, COVERAGE_CUES) && contains_any(&c, COVERAGE_TERMS) {
        s *= 1.8;
    }
    if contains_any(&q, EXCLUSION_CUES) && contains_any(&c, EXCLUSION_TERMS) {
        s *= 1.9;
    }
    if contains_any(&q, TIME_CUES) && c.chars().any(|ch| ch.is_ascii_digit()) && contains_any(&c, TIME_TERMS) {
        s *= 1.7;
    }
    if contains_any(&q, LIMIT_CUES) && contains_any(&c, LIMIT_TERMS) {
        s *= 1.6;
    }
    for (term, variants) in DOMAIN_TERM_PAIRS {
        if q.contains(term) && contains_any(&c, variants) {
            s *= 1.5;
        }
    }
    s
}

/// Fraction of query words (longer than 3 chars) appearing anywhere in the
/// chunk; only the highest applicable tier applies.
fn keyword_density(score: f32, ctx: &ScoreContext<'_>) -> f32 {
    let (Some(query), Some(chunk)) = (ctx.query, ctx.chunk_text) else { return score };
    let q = query.to_lowercase();
    let c = chunk.to_lowercase();
    let words: HashSet<&str> = q.split_whitespace().filter(|w| w.chars().count() > 3).collect();
    if words.is_empty() {
        return score;
    }
    let matches = words.iter().filter(|w| c.contains(*w)).count();
    let ratio = matches as f32 / words.len() as f32;
    score
        * if ratio >= 0.8 {
            1.4
        } else if ratio >= 0.6 {
            1.2
        } else if ratio >= 0.4 {
            1.1
        } else {
            1.0
        }
}

/// Each maximal multi-word run from the query found verbatim in the chunk
/// stacks a ×1.3.
fn phrase_match(score: f32, ctx: &ScoreContext<'_>) -> f32 {
    let (Some(query), Some(chunk)) = (ctx.query, ctx.chunk_text) else { return score };
    let q = query.to_lowercase();
    let c = chunk.to_lowercase();
    let mut s = score;
    for phrase in word_phrases(&q) {
        if phrase.split_whitespace().count() >= 2 && c.contains(phrase) {
            s *= 1.3;
        }
    }
    s
}

/// Maximal runs of word characters and interior whitespace, split at any
/// other punctuation.
fn word_phrases(text: &str) -> impl Iterator<Item = &str> {
    text.split(|ch: char| !(ch.is_alphanumeric() || ch == '_' || ch.is_whitespace()))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
