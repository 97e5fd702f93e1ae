//! CV text extraction — turns raw resume text into a structured profile
//! payload.
//!
//! Two interchangeable strategies behind one trait, selected once at startup:
//! `AiExtractor` (LLM-backed, primary) and `HeuristicExtractor` (regex
//! section detection, fallback and sole implementation when no LLM is
//! configured). The AI strategy degrades to the heuristic on ANY failure —
//! extraction itself never errors.

pub mod ai;
pub mod heuristic;
pub mod prompts;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::llm_client::LlmClient;

pub use heuristic::HeuristicExtractor;
pub use types::ExtractedProfile;

/// A CV extraction strategy. Carried in `AppState` as `Arc<dyn CvExtractor>`.
#[async_trait]
pub trait CvExtractor: Send + Sync {
    /// Extracts structured profile data from raw CV text. Infallible by
    /// contract: strategies degrade internally rather than returning errors.
    async fn extract(&self, cv_text: &str) -> ExtractedProfile;

    /// "ai" | "heuristic" — for logging and upload summaries.
    fn backend(&self) -> &'static str;
}

/// Selects the extraction strategy from the boot-time AI availability
/// condition.
pub fn select_extractor(llm: Option<LlmClient>) -> Arc<dyn CvExtractor> {
    match llm {
        Some(llm) => {
            info!("CV extractor: AI strategy with heuristic fallback");
            Arc::new(ai::AiExtractor::new(llm))
        }
        None => {
            info!("CV extractor: heuristic strategy (no LLM configured)");
            Arc::new(HeuristicExtractor::new())
        }
    }
}
