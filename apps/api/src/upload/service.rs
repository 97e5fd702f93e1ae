//! CV upload and deletion.
//!
//! Upload always persists the CV metadata. For PDFs the text is extracted
//! and merged into the profile; a conversion or extraction failure only
//! skips the merge — it never fails the upload. The profile score is
//! recomputed from whatever is present afterwards.

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::CvExtractor;
use crate::profiles::merge::{merge_extracted, MergeSummary};
use crate::profiles::scoring::compute_profile_score;
use crate::profiles::service::{find_by_user, persist_profile};

const MAX_CV_BYTES: usize = 10 * 1024 * 1024;
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

#[derive(Debug, Serialize)]
pub struct CvUploadResponse {
    pub message: String,
    pub cv_url: String,
    pub file_name: String,
    pub profile_score: i32,
    /// What the extraction merge actually changed. All-zero for non-PDF
    /// uploads and when conversion fails.
    pub extracted: MergeSummary,
}

#[derive(Debug, Serialize)]
pub struct CvDeleteResponse {
    pub message: String,
    pub profile_score: i32,
}

pub async fn upload_cv(
    pool: &PgPool,
    s3: &S3Client,
    bucket: &str,
    extractor: &dyn CvExtractor,
    user_id: Uuid,
    file_name: &str,
    data: Bytes,
) -> Result<CvUploadResponse, AppError> {
    let mut profile = find_by_user(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job seeker profile not found".to_string()))?;

    let extension = file_extension(file_name).ok_or_else(|| {
        AppError::Validation("CV file name has no extension".to_string())
    })?;
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::Validation(
            "Only PDF, DOC, and DOCX files are accepted".to_string(),
        ));
    }
    if data.len() > MAX_CV_BYTES {
        return Err(AppError::Validation(
            "CV file exceeds the 10 MB limit".to_string(),
        ));
    }

    // Replace the previous object; a failed delete only leaks the old file.
    if let Some(old_key) = &profile.cv_url {
        if let Err(e) = s3.delete_object().bucket(bucket).key(old_key).send().await {
            warn!("Failed to delete previous CV object {old_key}: {e}");
        }
    }

    let key = format!("cvs/{}/{}.{}", user_id, Uuid::new_v4(), extension);
    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(data.to_vec()))
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("CV upload failed: {e}")))?;

    profile.cv_url = Some(key.clone());
    profile.cv_file_name = Some(file_name.to_string());

    // CV-driven extraction only runs for PDFs; other formats keep metadata only.
    let extracted = if extension == "pdf" {
        match extract_pdf_text(data.clone()).await {
            Ok(text) => {
                info!(
                    "Extracted {} chars of CV text for user {user_id} ({} backend)",
                    text.len(),
                    extractor.backend()
                );
                let payload = extractor.extract(&text).await;
                merge_extracted(&mut profile, &payload)
            }
            Err(e) => {
                warn!("CV text conversion failed, storing metadata only: {e}");
                MergeSummary::default()
            }
        }
    } else {
        MergeSummary::default()
    };

    profile.profile_score = compute_profile_score(&profile);
    profile.last_updated = Utc::now();
    persist_profile(pool, &profile).await?;

    Ok(CvUploadResponse {
        message: "CV uploaded successfully".to_string(),
        cv_url: key,
        file_name: file_name.to_string(),
        profile_score: profile.profile_score,
        extracted,
    })
}

pub async fn delete_cv(
    pool: &PgPool,
    s3: &S3Client,
    bucket: &str,
    user_id: Uuid,
) -> Result<CvDeleteResponse, AppError> {
    let mut profile = find_by_user(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job seeker profile not found".to_string()))?;

    if let Some(key) = &profile.cv_url {
        if let Err(e) = s3.delete_object().bucket(bucket).key(key).send().await {
            warn!("Failed to delete CV object {key}: {e}");
        }
    }

    // Set together, cleared together.
    profile.cv_url = None;
    profile.cv_file_name = None;
    profile.profile_score = compute_profile_score(&profile);
    profile.last_updated = Utc::now();
    persist_profile(pool, &profile).await?;

    Ok(CvDeleteResponse {
        message: "CV deleted successfully".to_string(),
        profile_score: profile.profile_score,
    })
}

/// PDF parsing is CPU-bound; run it off the async executor.
async fn extract_pdf_text(data: Bytes) -> anyhow::Result<String> {
    let text =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data)).await??;
    Ok(text)
}

fn file_extension(file_name: &str) -> Option<String> {
    let (stem, extension) = file_name.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension_lowercases() {
        assert_eq!(file_extension("Resume.PDF").as_deref(), Some("pdf"));
        assert_eq!(file_extension("cv.docx").as_deref(), Some("docx"));
    }

    #[test]
    fn test_file_extension_rejects_bare_names() {
        assert_eq!(file_extension("resume"), None);
        assert_eq!(file_extension(".pdf"), None);
        assert_eq!(file_extension("resume."), None);
    }

    #[test]
    fn test_allowed_extensions() {
        for ext in ["pdf", "doc", "docx"] {
            assert!(ALLOWED_EXTENSIONS.contains(&ext));
        }
        assert!(!ALLOWED_EXTENSIONS.contains(&"exe"));
    }
}
