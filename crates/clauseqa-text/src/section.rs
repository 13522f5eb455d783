//! Section-type classification.
//!
//! Priority-ordered keyword matching over the lowercased text; the first
//! category with a hit wins, falling back to `PolicyClause`. Pure function:
//! identical text always yields the identical category.

use clauseqa_core::types::SectionType;

const SECTION_KEYWORDS: &[(SectionType, &[&str])] = &[
    (SectionType::Definitions, &["definition", "means", "defined as", "shall mean"]),
    (SectionType::Coverage, &["coverage", "benefit", "covered", "insured", "protection"]),
    (SectionType::Exclusions, &["exclusion", "excluded", "not covered", "does not cover"]),
    (SectionType::Limits, &["limit", "maximum", "minimum", "deductible", "amount"]),
    (SectionType::Claims, &["claim", "procedure", "process", "submit"]),
    (SectionType::Premiums, &["premium", "payment", "cost", "fee"]),
    (SectionType::Conditions, &["condition", "requirement", "must", "shall"]),
];

pub fn classify_section(text: &str) -> SectionType {
    let lower = text.to_lowercase();
    for (section_type, keywords) in SECTION_KEYWORDS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return *section_type;
        }
    }
    SectionType::PolicyClause
}
