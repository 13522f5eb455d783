use crate::types::RetrievalResult;

/// Maps text to fixed-dimension float vectors. Implementations must return
/// `dim()`-length output for every input; batching is a provider-side
/// optimization and must be result-equivalent to one-at-a-time calls.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;

    fn embed_one(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let mut out = self.embed_batch(&[text.to_string()])?;
        out.pop()
            .ok_or_else(|| anyhow::anyhow!("embedder returned no vector for single input"))
    }
}

/// The generative answer step consumed by the pipeline. Results arrive
/// pre-sorted by descending boosted score; an empty slice means the
/// composer must signal that no relevant information was found.
pub trait AnswerComposer: Send + Sync {
    fn compose(&self, question: &str, results: &[RetrievalResult]) -> anyhow::Result<String>;
}
