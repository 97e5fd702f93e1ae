use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A candidate bookmarked by a recruiter. Unique by `candidate_id`:
/// re-saving updates `notes`/`tags` in place instead of duplicating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCandidate {
    pub candidate_id: Uuid,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One entry in a recruiter's bounded search history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub query: String,
    pub filters: Value,
    pub searched_at: DateTime<Utc>,
    pub results_count: i64,
}

/// Recruiter profile row. `search_history` holds at most the 50 most recent
/// searches (oldest evicted first); `total_searches` counts every search
/// regardless of truncation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecruiterRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub company_website: Option<String>,
    pub company_size: Option<String>,
    pub industry: Option<String>,
    pub designation: Option<String>,
    pub saved_candidates: Json<Vec<SavedCandidate>>,
    pub search_history: Json<Vec<SearchRecord>>,
    pub is_verified: bool,
    pub total_searches: i32,
    pub created_at: DateTime<Utc>,
}
