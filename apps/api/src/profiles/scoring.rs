//! Profile completeness scoring.
//!
//! `compute_profile_score` is the only legal source of `profile_score`. It is
//! pure and deterministic: every term is capped independently, the sum is
//! capped at 100, and it must be re-run after any mutation of a scored field.

use serde::{Deserialize, Serialize};

use crate::models::job_seeker::JobSeekerRow;

const BASE_SCORE: f64 = 10.0;
const CV_POINTS: f64 = 20.0;
const SKILL_POINTS: f64 = 2.0;
const SKILLS_CAP: f64 = 20.0;
const EXPERIENCE_POINTS: f64 = 10.0;
const EXPERIENCE_CAP: f64 = 20.0;
const EDUCATION_POINTS: f64 = 7.5;
const EDUCATION_CAP: f64 = 15.0;
const PROJECT_POINTS: f64 = 5.0;
const PROJECTS_CAP: f64 = 10.0;
const BIO_POINTS: f64 = 5.0;
const LINKEDIN_POINTS: f64 = 3.0;
const GITHUB_POINTS: f64 = 3.0;
const PORTFOLIO_POINTS: f64 = 2.0;
const AI_SUMMARY_POINTS: f64 = 2.0;
const MAX_SCORE: f64 = 100.0;

/// Completeness score in [0, 100].
pub fn compute_profile_score(profile: &JobSeekerRow) -> i32 {
    let mut score = BASE_SCORE;

    if profile.cv_url.is_some() {
        score += CV_POINTS;
    }
    score += (profile.skills.len() as f64 * SKILL_POINTS).min(SKILLS_CAP);
    score += (profile.experience.len() as f64 * EXPERIENCE_POINTS).min(EXPERIENCE_CAP);
    score += (profile.education.len() as f64 * EDUCATION_POINTS).min(EDUCATION_CAP);
    score += (profile.projects.len() as f64 * PROJECT_POINTS).min(PROJECTS_CAP);
    if present(&profile.bio) {
        score += BIO_POINTS;
    }
    if present(&profile.linkedin_url) {
        score += LINKEDIN_POINTS;
    }
    if present(&profile.github_url) {
        score += GITHUB_POINTS;
    }
    if present(&profile.portfolio_url) {
        score += PORTFOLIO_POINTS;
    }
    if profile.ai_summary.is_some() {
        score += AI_SUMMARY_POINTS;
    }

    score.min(MAX_SCORE).round() as i32
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionPriority {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub priority: SuggestionPriority,
    pub message: String,
    /// Score points gained by acting on the suggestion, matching the term
    /// weights above.
    pub impact: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovementReport {
    pub current_score: i32,
    pub potential_score: i32,
    pub suggestions: Vec<Suggestion>,
}

/// Derives improvement suggestions from missing profile fields.
/// `potential_score` is the current score plus all suggestion impacts,
/// capped at 100.
pub fn suggest_improvements(profile: &JobSeekerRow) -> ImprovementReport {
    let mut suggestions = Vec::new();

    if profile.cv_url.is_none() {
        suggestions.push(Suggestion {
            priority: SuggestionPriority::Critical,
            message: "Upload your CV to increase profile visibility".to_string(),
            impact: 20,
        });
    }

    if profile.skills.len() < 5 {
        suggestions.push(Suggestion {
            priority: SuggestionPriority::High,
            message: "Add more skills to your profile (target: 10+ skills)".to_string(),
            impact: 10,
        });
    }

    if profile.experience.is_empty() {
        suggestions.push(Suggestion {
            priority: SuggestionPriority::Critical,
            message: "Add your work experience".to_string(),
            impact: 20,
        });
    }

    if profile.projects.is_empty() {
        suggestions.push(Suggestion {
            priority: SuggestionPriority::Medium,
            message: "Add projects to showcase your work".to_string(),
            impact: 10,
        });
    }

    if !present(&profile.bio) {
        suggestions.push(Suggestion {
            priority: SuggestionPriority::Medium,
            message: "Write a professional bio/summary".to_string(),
            impact: 5,
        });
    }

    if !present(&profile.linkedin_url) && !present(&profile.github_url) {
        suggestions.push(Suggestion {
            priority: SuggestionPriority::Low,
            message: "Add your LinkedIn or GitHub profile".to_string(),
            impact: 3,
        });
    }

    let total_impact: i32 = suggestions.iter().map(|s| s.impact).sum();
    let potential_score = (profile.profile_score + total_impact).min(100);

    ImprovementReport {
        current_score: profile.profile_score,
        potential_score,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job_seeker::fixtures::{education, empty_profile, experience};
    use crate::models::job_seeker::{AiSummary, Project};
    use chrono::Utc;
    use sqlx::types::Json;

    #[test]
    fn test_empty_profile_scores_base_10() {
        assert_eq!(compute_profile_score(&empty_profile()), 10);
    }

    #[test]
    fn test_cv_then_skills_then_bio_scenario() {
        let mut profile = empty_profile();

        profile.cv_url = Some("cvs/abc.pdf".to_string());
        assert_eq!(compute_profile_score(&profile), 30);

        profile.skills = (0..6).map(|i| format!("skill-{i}")).collect();
        assert_eq!(compute_profile_score(&profile), 42);

        profile.bio = Some("Backend engineer.".to_string());
        assert_eq!(compute_profile_score(&profile), 47);
    }

    #[test]
    fn test_skills_term_caps_at_20() {
        let mut profile = empty_profile();
        profile.skills = (0..30).map(|i| format!("skill-{i}")).collect();
        assert_eq!(compute_profile_score(&profile), 30); // 10 + capped 20
    }

    #[test]
    fn test_experience_term_caps_at_20() {
        let mut profile = empty_profile();
        profile.experience = Json(
            (0..4)
                .map(|i| experience(&format!("Role {i}"), "Acme", 1.0))
                .collect(),
        );
        assert_eq!(compute_profile_score(&profile), 30);
    }

    #[test]
    fn test_education_fractional_term() {
        let mut profile = empty_profile();
        profile.education = Json(vec![education("BSc", "TU Berlin")]);
        // 10 + 7.5 rounds to 18
        assert_eq!(compute_profile_score(&profile), 18);

        profile.education = Json(vec![
            education("BSc", "TU Berlin"),
            education("MSc", "TU Berlin"),
            education("PhD", "TU Berlin"),
        ]);
        // 3 * 7.5 capped at 15
        assert_eq!(compute_profile_score(&profile), 25);
    }

    #[test]
    fn test_full_profile_caps_at_100() {
        let mut profile = empty_profile();
        profile.cv_url = Some("cvs/a.pdf".to_string());
        profile.skills = (0..15).map(|i| format!("skill-{i}")).collect();
        profile.experience = Json(
            (0..3)
                .map(|i| experience(&format!("Role {i}"), "Acme", 2.0))
                .collect(),
        );
        profile.education = Json(vec![
            education("BSc", "TU Berlin"),
            education("MSc", "TU Berlin"),
        ]);
        profile.projects = Json(
            (0..4)
                .map(|i| Project {
                    name: format!("Project {i}"),
                    ..Project::default()
                })
                .collect(),
        );
        profile.bio = Some("Bio".to_string());
        profile.linkedin_url = Some("https://linkedin.com/in/x".to_string());
        profile.github_url = Some("https://github.com/x".to_string());
        profile.portfolio_url = Some("https://x.dev".to_string());
        profile.ai_summary = Some(Json(AiSummary {
            generated_at: Utc::now(),
            ..AiSummary::default()
        }));

        assert_eq!(compute_profile_score(&profile), 100);
    }

    #[test]
    fn test_score_is_monotonic_in_skill_count() {
        let mut previous = 0;
        for n in 0..15 {
            let mut profile = empty_profile();
            profile.skills = (0..n).map(|i| format!("skill-{i}")).collect();
            let score = compute_profile_score(&profile);
            assert!(score >= previous, "score dropped at {n} skills");
            previous = score;
        }
    }

    #[test]
    fn test_blank_strings_do_not_count_as_present() {
        let mut profile = empty_profile();
        profile.bio = Some("   ".to_string());
        profile.linkedin_url = Some(String::new());
        assert_eq!(compute_profile_score(&profile), 10);
    }

    #[test]
    fn test_empty_profile_gets_all_six_suggestions() {
        let report = suggest_improvements(&empty_profile());
        assert_eq!(report.suggestions.len(), 6);
        assert_eq!(report.current_score, 10);
        // 10 + (20 + 10 + 20 + 10 + 5 + 3) = 78
        assert_eq!(report.potential_score, 78);
    }

    #[test]
    fn test_potential_score_capped_at_100() {
        let mut profile = empty_profile();
        profile.profile_score = 95;
        let report = suggest_improvements(&profile);
        assert_eq!(report.potential_score, 100);
    }

    #[test]
    fn test_complete_profile_yields_no_suggestions() {
        let mut profile = empty_profile();
        profile.cv_url = Some("cvs/a.pdf".to_string());
        profile.skills = (0..5).map(|i| format!("skill-{i}")).collect();
        profile.experience = Json(vec![experience("Engineer", "Acme", 2.0)]);
        profile.projects = Json(vec![Project {
            name: "Indexer".to_string(),
            ..Project::default()
        }]);
        profile.bio = Some("Bio".to_string());
        profile.github_url = Some("https://github.com/x".to_string());

        let report = suggest_improvements(&profile);
        assert!(report.suggestions.is_empty());
        assert_eq!(report.potential_score, report.current_score);
    }

    #[test]
    fn test_one_social_link_suppresses_link_suggestion() {
        let mut profile = empty_profile();
        profile.linkedin_url = Some("https://linkedin.com/in/x".to_string());
        let report = suggest_improvements(&profile);
        assert!(report
            .suggestions
            .iter()
            .all(|s| !s.message.contains("LinkedIn")));
    }
}
