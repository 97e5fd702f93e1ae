//! Recruiter profile persistence: saved-candidate upserts and the bounded
//! search history.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job_seeker::JobSeekerRow;
use crate::models::recruiter::{RecruiterRow, SavedCandidate, SearchRecord};

/// Maximum retained search-history entries. Oldest are evicted first;
/// `total_searches` keeps counting past the bound.
pub const SEARCH_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct CreateRecruiterRequest {
    pub company_name: String,
    #[serde(default)]
    pub company_website: Option<String>,
    #[serde(default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateRecruiterRequest {
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub company_size: Option<String>,
    pub industry: Option<String>,
    pub designation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveCandidateRequest {
    pub candidate_id: Uuid,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// A saved candidate joined with its live profile.
#[derive(Debug, Serialize)]
pub struct SavedCandidateDetail {
    pub candidate: JobSeekerRow,
    pub saved_at: chrono::DateTime<Utc>,
    pub notes: String,
    pub tags: Vec<String>,
}

pub async fn find_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<RecruiterRow>, sqlx::Error> {
    sqlx::query_as::<_, RecruiterRow>("SELECT * FROM recruiters WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<RecruiterRow, AppError> {
    find_by_user(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recruiter profile not found".to_string()))
}

/// Creates the recruiter profile at registration. `company_name` is the one
/// required field.
pub async fn create_profile(
    pool: &PgPool,
    user_id: Uuid,
    request: CreateRecruiterRequest,
) -> Result<RecruiterRow, AppError> {
    if request.company_name.trim().is_empty() {
        return Err(AppError::Validation("Company name is required".to_string()));
    }
    if find_by_user(pool, user_id).await?.is_some() {
        return Err(AppError::Validation(
            "Recruiter profile already exists".to_string(),
        ));
    }

    let profile = sqlx::query_as::<_, RecruiterRow>(
        r#"
        INSERT INTO recruiters
            (user_id, company_name, company_website, company_size, industry, designation)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(request.company_name.trim())
    .bind(&request.company_website)
    .bind(&request.company_size)
    .bind(&request.industry)
    .bind(&request.designation)
    .fetch_one(pool)
    .await?;

    Ok(profile)
}

pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    update: UpdateRecruiterRequest,
) -> Result<RecruiterRow, AppError> {
    let mut profile = get_profile(pool, user_id).await?;

    if let Some(company_name) = update.company_name {
        if company_name.trim().is_empty() {
            return Err(AppError::Validation("Company name is required".to_string()));
        }
        profile.company_name = company_name;
    }
    if let Some(website) = update.company_website {
        profile.company_website = Some(website);
    }
    if let Some(size) = update.company_size {
        profile.company_size = Some(size);
    }
    if let Some(industry) = update.industry {
        profile.industry = Some(industry);
    }
    if let Some(designation) = update.designation {
        profile.designation = Some(designation);
    }

    persist_recruiter(pool, &profile).await?;
    Ok(profile)
}

/// Bookmarks a candidate. Re-saving the same candidate updates notes and
/// tags in place instead of duplicating the entry.
pub async fn save_candidate(
    pool: &PgPool,
    user_id: Uuid,
    request: SaveCandidateRequest,
) -> Result<RecruiterRow, AppError> {
    let mut profile = get_profile(pool, user_id).await?;

    upsert_saved_candidate(
        &mut profile.saved_candidates,
        request.candidate_id,
        request.notes.unwrap_or_default(),
        request.tags.unwrap_or_default(),
    );

    persist_recruiter(pool, &profile).await?;
    Ok(profile)
}

pub async fn remove_saved_candidate(
    pool: &PgPool,
    user_id: Uuid,
    candidate_id: Uuid,
) -> Result<RecruiterRow, AppError> {
    let mut profile = get_profile(pool, user_id).await?;

    profile
        .saved_candidates
        .retain(|c| c.candidate_id != candidate_id);

    persist_recruiter(pool, &profile).await?;
    Ok(profile)
}

/// Saved candidates joined with their live profiles. Candidates that no
/// longer resolve are silently dropped.
pub async fn get_saved_candidates(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<SavedCandidateDetail>, AppError> {
    let profile = get_profile(pool, user_id).await?;

    let mut details = Vec::with_capacity(profile.saved_candidates.len());
    for saved in profile.saved_candidates.iter() {
        let candidate =
            sqlx::query_as::<_, JobSeekerRow>("SELECT * FROM job_seekers WHERE id = $1")
                .bind(saved.candidate_id)
                .fetch_optional(pool)
                .await?;
        match candidate {
            Some(candidate) => details.push(SavedCandidateDetail {
                candidate,
                saved_at: saved.saved_at,
                notes: saved.notes.clone(),
                tags: saved.tags.clone(),
            }),
            None => warn!("Saved candidate {} no longer exists", saved.candidate_id),
        }
    }

    Ok(details)
}

/// Records one search invocation. A missing recruiter profile makes this a
/// no-op rather than an error so recording can never fail a search.
pub async fn record_search(
    pool: &PgPool,
    user_id: Uuid,
    query: &str,
    filters: Value,
    results_count: i64,
) -> Result<(), AppError> {
    let Some(mut profile) = find_by_user(pool, user_id).await? else {
        return Ok(());
    };

    push_search_record(
        &mut profile.search_history,
        SearchRecord {
            query: query.to_string(),
            filters,
            searched_at: Utc::now(),
            results_count,
        },
    );
    profile.total_searches += 1;

    persist_recruiter(pool, &profile).await?;
    Ok(())
}

/// Search history, most recent first.
pub async fn get_search_history(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<SearchRecord>, AppError> {
    let profile = get_profile(pool, user_id).await?;
    let mut history = profile.search_history.0;
    history.sort_by(|a, b| b.searched_at.cmp(&a.searched_at));
    Ok(history)
}

/// Appends a record, evicting the oldest entries past the bound.
pub fn push_search_record(history: &mut Vec<SearchRecord>, record: SearchRecord) {
    history.push(record);
    if history.len() > SEARCH_HISTORY_LIMIT {
        let excess = history.len() - SEARCH_HISTORY_LIMIT;
        history.drain(..excess);
    }
}

/// Upsert by candidate id: existing entries keep their `saved_at`.
pub fn upsert_saved_candidate(
    saved: &mut Vec<SavedCandidate>,
    candidate_id: Uuid,
    notes: String,
    tags: Vec<String>,
) {
    match saved.iter_mut().find(|c| c.candidate_id == candidate_id) {
        Some(existing) => {
            existing.notes = notes;
            existing.tags = tags;
        }
        None => saved.push(SavedCandidate {
            candidate_id,
            saved_at: Utc::now(),
            notes,
            tags,
        }),
    }
}

async fn persist_recruiter(pool: &PgPool, profile: &RecruiterRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE recruiters SET
            company_name = $2,
            company_website = $3,
            company_size = $4,
            industry = $5,
            designation = $6,
            saved_candidates = $7,
            search_history = $8,
            total_searches = $9
        WHERE id = $1
        "#,
    )
    .bind(profile.id)
    .bind(&profile.company_name)
    .bind(&profile.company_website)
    .bind(&profile.company_size)
    .bind(&profile.industry)
    .bind(&profile.designation)
    .bind(&profile.saved_candidates)
    .bind(&profile.search_history)
    .bind(profile.total_searches)
    .execute(pool)
    .await?;

    Ok(())
}
