//! clauseqa-embed
//!
//! Embedding provider surface. The neural model is an external collaborator;
//! this crate ships the deterministic hashed bag-of-words provider used for
//! offline runs and tests, behind the same `Embedder` trait a model-backed
//! provider implements.

use std::hash::{Hash, Hasher};

use anyhow::Result;
use clauseqa_core::traits::Embedder;
use twox_hash::XxHash64;

/// Deterministic hashed bag-of-words embedder. Identical text always maps
/// to the identical unit-length vector, which is what retrieval tests and
/// offline runs need; it is not a semantic model.
pub struct HashedBowEmbedder {
    dim: usize,
}

impl HashedBowEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        for (i, raw) in text.split_whitespace().enumerate() {
            let token = normalize_token(raw);
            if token.is_empty() {
                continue;
            }
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        v
    }
}

impl Embedder for HashedBowEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}

/// Tokens are lowercased and stripped of edge punctuation so lexical
/// overlap survives case and punctuation differences between questions and
/// document text.
fn normalize_token(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase()
}

/// Default provider for the configured dimensionality. Deployments with a
/// model server swap in their own `Embedder` at this seam.
pub fn get_default_embedder(dim: usize) -> Result<Box<dyn Embedder>> {
    Ok(Box::new(HashedBowEmbedder::new(dim)))
}
