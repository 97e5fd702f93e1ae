use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::extraction::CvExtractor;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    /// `None` when no generative-language service is configured — all AI call
    /// sites must degrade to their deterministic fallbacks.
    pub llm: Option<LlmClient>,
    pub config: Config,
    /// Pluggable CV extractor, selected once at startup: AI-backed when the
    /// LLM is configured, heuristic otherwise.
    pub extractor: Arc<dyn CvExtractor>,
}
