//! Fallback answer composition.
//!
//! `PassageAnswerer` renders the ranked passages verbatim; it is the seam
//! where a generative model is attached in deployments.

use anyhow::Result;
use clauseqa_core::traits::AnswerComposer;
use clauseqa_core::types::RetrievalResult;

pub const NO_RELEVANT_INFORMATION: &str = "No relevant information found in the document.";

#[derive(Default)]
pub struct PassageAnswerer;

impl AnswerComposer for PassageAnswerer {
    fn compose(&self, _question: &str, results: &[RetrievalResult]) -> Result<String> {
        if results.is_empty() {
            return Ok(NO_RELEVANT_INFORMATION.to_string());
        }
        let sections: Vec<String> = results
            .iter()
            .enumerate()
            .map(|(i, result)| {
                format!(
                    "RELEVANT SECTION {} (Score: {:.3}):\n{}",
                    i + 1,
                    result.score,
                    result.chunk.text.trim()
                )
            })
            .collect();
        Ok(sections.join("\n\n---\n\n"))
    }
}
