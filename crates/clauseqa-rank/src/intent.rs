//! Question intent classification.
//!
//! Each intent category carries five canonical example questions. Their
//! embeddings are computed lazily on first use and cached for the lifetime
//! of the classifier instance; the category with the highest max dot
//! product against the question embedding wins.

use std::sync::{Arc, OnceLock};

use anyhow::Result;
use clauseqa_core::traits::Embedder;
use clauseqa_core::types::{IntentKind, QueryIntent};

const CANONICAL_QUESTIONS: &[(IntentKind, &[&str])] = &[
    (
        IntentKind::Definition,
        &[
            "What is grace period",
            "Define deductible",
            "What does this mean",
            "Explain the term",
            "What is the meaning of",
        ],
    ),
    (
        IntentKind::SpecificValue,
        &[
            "How many days for grace period",
            "What is the amount of deductible",
            "How long is the waiting period",
            "What is the maximum limit",
            "How much is the premium",
        ],
    ),
    (
        IntentKind::CoverageCheck,
        &[
            "Is maternity covered",
            "Does this include dental",
            "What is covered under this policy",
            "Are pre-existing diseases covered",
            "Is this treatment included",
        ],
    ),
    (
        IntentKind::ExclusionCheck,
        &[
            "What is excluded from coverage",
            "Is this not covered",
            "What are the exclusions",
            "Are there any restrictions",
            "What is not included",
        ],
    ),
    (
        IntentKind::TimePeriod,
        &[
            "How long is the waiting period",
            "What is the grace period duration",
            "How many months for pre-existing",
            "What is the cooling period",
            "How long do I have to wait",
        ],
    ),
    (
        IntentKind::Limits,
        &[
            "What is the maximum coverage",
            "What are the policy limits",
            "What is the sum insured",
            "What is the room rent limit",
            "What is the annual limit",
        ],
    ),
];

const KEY_CONCEPTS: &[&str] = &[
    "grace period",
    "waiting period",
    "cooling period",
    "pre-existing",
    "maternity",
    "pregnancy",
    "deductible",
    "co-pay",
    "excess",
    "sum insured",
    "coverage",
    "limit",
    "hospitalization",
    "outpatient",
    "cashless",
    "claim",
    "premium",
    "policy",
];

const NUMERIC_CUES: &[&str] = &[
    "how much",
    "how many",
    "how long",
    "what is the amount",
    "what is the limit",
    "days",
    "months",
    "years",
    "percentage",
];

pub struct IntentClassifier {
    embedder: Arc<dyn Embedder>,
    prototypes: OnceLock<Vec<(IntentKind, Vec<Vec<f32>>)>>,
}

impl IntentClassifier {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder, prototypes: OnceLock::new() }
    }

    fn prototypes(&self) -> Result<&[(IntentKind, Vec<Vec<f32>>)]> {
        if self.prototypes.get().is_none() {
            let mut built = Vec::with_capacity(CANONICAL_QUESTIONS.len());
            for (kind, questions) in CANONICAL_QUESTIONS {
                let texts: Vec<String> = questions.iter().map(|q| (*q).to_string()).collect();
                built.push((*kind, self.embedder.embed_batch(&texts)?));
            }
            let _ = self.prototypes.set(built);
        }
        match self.prototypes.get() {
            Some(p) => Ok(p),
            None => anyhow::bail!("intent prototype cache unavailable"),
        }
    }

    pub fn classify(&self, question: &str) -> Result<QueryIntent> {
        let question_embedding = self.embedder.embed_one(question)?;
        let mut best_kind = IntentKind::General;
        let mut best_score = 0.0f32;
        for (kind, vectors) in self.prototypes()? {
            for v in vectors {
                let similarity = dot(&question_embedding, v);
                if similarity > best_score {
                    best_score = similarity;
                    best_kind = *kind;
                }
            }
        }
        let lower = question.to_lowercase();
        Ok(QueryIntent {
            kind: best_kind,
            looking_for: looking_for(best_kind).to_string(),
            expects_numbers: NUMERIC_CUES.iter().any(|cue| lower.contains(cue)),
            key_concepts: KEY_CONCEPTS
                .iter()
                .filter(|term| lower.contains(*term))
                .map(|term| (*term).to_string())
                .collect(),
            confidence: best_score,
        })
    }
}

pub fn looking_for(kind: IntentKind) -> &'static str {
    match kind {
        IntentKind::Definition => "explanation or meaning",
        IntentKind::SpecificValue => "exact numbers or amounts",
        IntentKind::CoverageCheck => "what is covered",
        IntentKind::ExclusionCheck => "what is excluded",
        IntentKind::TimePeriod => "duration or time limits",
        IntentKind::Limits => "maximum amounts or limits",
        IntentKind::General => "general information",
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
