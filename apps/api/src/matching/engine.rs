//! Pure match scoring against extracted job requirements.
//!
//! Weights: skills 40, experience 30, profile completeness 30. The total is
//! bounded to [0, 100] by construction.

use serde::{Deserialize, Serialize};

use crate::models::job_seeker::JobSeekerRow;

const SKILLS_WEIGHT: f64 = 40.0;
const EXPERIENCE_WEIGHT: f64 = 30.0;
const COMPLETENESS_WEIGHT: f64 = 30.0;

/// Structured requirements extracted from a free-text job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    pub skills: Vec<String>,
    pub min_experience: Option<f64>,
    pub location: Option<String>,
    pub must_have_skills: Vec<String>,
}

/// Candidate skills matching any requirement skill, substring and
/// case-insensitive in either direction of naming ("React" matches
/// "React.js").
fn matched_skill_count(candidate: &JobSeekerRow, requirements: &JobRequirements) -> usize {
    candidate
        .skills
        .iter()
        .filter(|skill| {
            requirements
                .skills
                .iter()
                .any(|wanted| contains_ci(skill, wanted))
        })
        .count()
}

/// Match score in [0, 100].
pub fn compute_match_score(candidate: &JobSeekerRow, requirements: &JobRequirements) -> i32 {
    let mut score = 0.0;

    if !requirements.skills.is_empty() {
        let matched = matched_skill_count(candidate, requirements) as f64;
        score += (matched / requirements.skills.len() as f64) * SKILLS_WEIGHT;
    }

    if let Some(min_experience) = requirements.min_experience.filter(|m| *m > 0.0) {
        if candidate.total_experience_years >= min_experience {
            score += EXPERIENCE_WEIGHT;
        } else {
            score += (candidate.total_experience_years / min_experience) * EXPERIENCE_WEIGHT;
        }
    }

    score += (candidate.profile_score as f64 / 100.0) * COMPLETENESS_WEIGHT;

    score.round() as i32
}

/// Human-readable list of satisfied conditions, comma-joined.
pub fn build_match_reason(candidate: &JobSeekerRow, requirements: &JobRequirements) -> String {
    let mut reasons = Vec::new();

    if !requirements.skills.is_empty() {
        let matched = matched_skill_count(candidate, requirements);
        if matched > 0 {
            reasons.push(format!("Matches {matched} required skills"));
        }
    }

    if candidate.total_experience_years >= requirements.min_experience.unwrap_or(0.0) {
        reasons.push(format!(
            "{} years experience",
            candidate.total_experience_years
        ));
    }

    if candidate.profile_score >= 80 {
        reasons.push("High profile score".to_string());
    }

    if reasons.is_empty() {
        "Good overall match".to_string()
    } else {
        reasons.join(", ")
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job_seeker::fixtures::empty_profile;

    fn candidate(skills: &[&str], years: f64, profile_score: i32) -> JobSeekerRow {
        let mut row = empty_profile();
        row.skills = skills.iter().map(|s| s.to_string()).collect();
        row.total_experience_years = years;
        row.profile_score = profile_score;
        row
    }

    fn requirements(skills: &[&str], min_experience: Option<f64>) -> JobRequirements {
        JobRequirements {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            min_experience,
            ..JobRequirements::default()
        }
    }

    #[test]
    fn test_perfect_match_scores_100() {
        let row = candidate(&["Rust", "PostgreSQL"], 8.0, 100);
        let req = requirements(&["rust", "postgresql"], Some(5.0));
        assert_eq!(compute_match_score(&row, &req), 100);
    }

    #[test]
    fn test_score_is_bounded() {
        let row = candidate(&["Rust"], 50.0, 100);
        let req = requirements(&["rust"], Some(1.0));
        let score = compute_match_score(&row, &req);
        assert!((0..=100).contains(&score));
    }

    #[test]
    fn test_partial_skill_match_scales_linearly() {
        // 1 of 2 required skills, no experience requirement, score 0 profile.
        let row = candidate(&["Rust"], 0.0, 0);
        let req = requirements(&["rust", "kubernetes"], None);
        assert_eq!(compute_match_score(&row, &req), 20);
    }

    #[test]
    fn test_skill_match_is_substring_case_insensitive() {
        let row = candidate(&["React.js"], 0.0, 0);
        let req = requirements(&["react"], None);
        assert_eq!(compute_match_score(&row, &req), 40);
    }

    #[test]
    fn test_underqualified_experience_scales_proportionally() {
        // 2 of 4 required years: 30 * 0.5 = 15.
        let row = candidate(&[], 2.0, 0);
        let req = requirements(&[], Some(4.0));
        assert_eq!(compute_match_score(&row, &req), 15);
    }

    #[test]
    fn test_no_requirement_skills_omits_skills_term() {
        let row = candidate(&["Rust"], 0.0, 50);
        let req = requirements(&[], None);
        // Only the completeness term: 50 / 100 * 30 = 15.
        assert_eq!(compute_match_score(&row, &req), 15);
    }

    #[test]
    fn test_completeness_term_only() {
        let row = candidate(&[], 0.0, 100);
        assert_eq!(compute_match_score(&row, &JobRequirements::default()), 30);
    }

    #[test]
    fn test_reason_lists_all_satisfied_conditions() {
        let row = candidate(&["Rust", "Go"], 6.0, 85);
        let req = requirements(&["rust", "go"], Some(5.0));
        let reason = build_match_reason(&row, &req);
        assert_eq!(
            reason,
            "Matches 2 required skills, 6 years experience, High profile score"
        );
    }

    #[test]
    fn test_reason_without_skill_matches_skips_skill_clause() {
        let row = candidate(&["Python"], 3.0, 40);
        let req = requirements(&["rust"], Some(2.0));
        assert_eq!(build_match_reason(&row, &req), "3 years experience");
    }

    #[test]
    fn test_reason_falls_back_to_generic_wording() {
        let row = candidate(&["Python"], 1.0, 40);
        let req = requirements(&["rust"], Some(5.0));
        assert_eq!(build_match_reason(&row, &req), "Good overall match");
    }
}
