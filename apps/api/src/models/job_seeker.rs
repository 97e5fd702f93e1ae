use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// One position in a candidate's work history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    /// Duration in years. Summed into `total_experience_years`.
    pub years: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub graduation_year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

/// AI-generated insight block, persisted alongside the profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiSummary {
    pub skill_extraction: Vec<String>,
    pub experience_summary: String,
    pub strengths: Vec<String>,
    pub weak_areas: Vec<String>,
    pub overall_summary: String,
    pub generated_at: DateTime<Utc>,
}

/// Job-seeker profile row.
///
/// Derived fields are never taken from client input:
/// `total_experience_years` is recomputed as the sum of `experience[].years`
/// on every experience mutation, and `profile_score` is recomputed by
/// `profiles::scoring::compute_profile_score` after any change to a scored
/// field.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobSeekerRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skills: Vec<String>,
    pub experience: Json<Vec<Experience>>,
    pub education: Json<Vec<Education>>,
    pub projects: Json<Vec<Project>>,
    pub certifications: Vec<String>,
    pub languages: Vec<String>,
    pub preferred_job_types: Vec<String>,
    pub expected_salary: Option<f64>,
    pub cv_url: Option<String>,
    pub cv_file_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub total_experience_years: f64,
    pub profile_score: i32,
    pub ai_summary: Option<Json<AiSummary>>,
    pub is_open_to_work: bool,
    pub profile_views: i32,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl JobSeekerRow {
    /// Sum of `experience[].years`. The only legal source for
    /// `total_experience_years` on experience updates.
    pub fn computed_experience_years(&self) -> f64 {
        self.experience.iter().map(|e| e.years.max(0.0)).sum()
    }
}

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Minimal profile for engine tests: empty collections, base score.
    pub fn empty_profile() -> JobSeekerRow {
        JobSeekerRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            skills: vec![],
            experience: Json(vec![]),
            education: Json(vec![]),
            projects: Json(vec![]),
            certifications: vec![],
            languages: vec![],
            preferred_job_types: vec![],
            expected_salary: None,
            cv_url: None,
            cv_file_name: None,
            bio: None,
            location: None,
            phone: None,
            linkedin_url: None,
            github_url: None,
            portfolio_url: None,
            total_experience_years: 0.0,
            profile_score: 10,
            ai_summary: None,
            is_open_to_work: true,
            profile_views: 0,
            last_updated: Utc::now(),
            created_at: Utc::now(),
        }
    }

    pub fn experience(role: &str, company: &str, years: f64) -> Experience {
        Experience {
            company: company.to_string(),
            role: role.to_string(),
            years,
            ..Experience::default()
        }
    }

    pub fn education(degree: &str, institution: &str) -> Education {
        Education {
            institution: institution.to_string(),
            degree: degree.to_string(),
            ..Education::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_computed_experience_years_sums_entries() {
        let mut profile = empty_profile();
        profile.experience = Json(vec![
            experience("Engineer", "Acme", 2.5),
            experience("Senior Engineer", "Initech", 3.0),
        ]);
        assert!((profile.computed_experience_years() - 5.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_computed_experience_years_ignores_negative() {
        let mut profile = empty_profile();
        profile.experience = Json(vec![experience("Engineer", "Acme", -1.0)]);
        assert_eq!(profile.computed_experience_years(), 0.0);
    }
}
