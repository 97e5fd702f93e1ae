//! Non-destructive merge of extracted CV data into an existing profile.
//!
//! Additive only: populated fields are never overwritten, list entries are
//! deduplicated case-insensitively, and re-running the same extraction
//! produces no new entries. Callers recompute the profile score afterwards.

use serde::Serialize;

use crate::extraction::types::ExtractedProfile;
use crate::models::job_seeker::{Education, Experience, JobSeekerRow, Project};

/// Counts of what the merge actually changed, reported back to the uploader.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeSummary {
    pub skills_added: usize,
    pub experience_added: usize,
    pub education_added: usize,
    pub projects_added: usize,
    pub bio_set: bool,
    pub location_set: bool,
    pub phone_set: bool,
}

pub fn merge_extracted(profile: &mut JobSeekerRow, extracted: &ExtractedProfile) -> MergeSummary {
    let mut summary = MergeSummary::default();

    for skill in &extracted.skills {
        let known = profile
            .skills
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(skill));
        if !known && !skill.is_empty() {
            profile.skills.push(skill.clone());
            summary.skills_added += 1;
        }
    }

    for entry in &extracted.experience {
        if entry.role.is_empty() || entry.company.is_empty() {
            continue;
        }
        let known = profile.experience.iter().any(|existing| {
            existing.role.eq_ignore_ascii_case(&entry.role)
                && existing.company.eq_ignore_ascii_case(&entry.company)
        });
        if !known {
            profile.experience.push(Experience {
                company: entry.company.clone(),
                role: entry.role.clone(),
                years: entry.years,
                description: entry.description.clone(),
                start_date: None,
                end_date: None,
                is_current: false,
            });
            summary.experience_added += 1;
        }
    }

    for entry in &extracted.education {
        if entry.degree.is_empty() || entry.institution.is_empty() {
            continue;
        }
        let known = profile.education.iter().any(|existing| {
            existing.degree.eq_ignore_ascii_case(&entry.degree)
                && existing.institution.eq_ignore_ascii_case(&entry.institution)
        });
        if !known {
            profile.education.push(Education {
                institution: entry.institution.clone(),
                degree: entry.degree.clone(),
                field: entry.field.clone(),
                graduation_year: entry.graduation_year,
            });
            summary.education_added += 1;
        }
    }

    for entry in &extracted.projects {
        if entry.name.is_empty() {
            continue;
        }
        let known = profile
            .projects
            .iter()
            .any(|existing| existing.name.eq_ignore_ascii_case(&entry.name));
        if !known {
            profile.projects.push(Project {
                name: entry.name.clone(),
                description: entry.description.clone(),
                technologies: entry.technologies.clone(),
            });
            summary.projects_added += 1;
        }
    }

    summary.bio_set = fill_if_empty(&mut profile.bio, &extracted.bio);
    summary.location_set = fill_if_empty(&mut profile.location, &extracted.location);
    summary.phone_set = fill_if_empty(&mut profile.phone, &extracted.phone);

    // Never decreases: a re-upload of an older CV cannot shrink experience.
    if extracted.total_experience_years > profile.total_experience_years {
        profile.total_experience_years = extracted.total_experience_years;
    }

    summary
}

fn fill_if_empty(field: &mut Option<String>, value: &str) -> bool {
    let empty = field.as_deref().map_or(true, |s| s.trim().is_empty());
    if empty && !value.is_empty() {
        *field = Some(value.to_string());
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::types::{ExtractedEducation, ExtractedExperience, ExtractedProject};
    use crate::models::job_seeker::fixtures::{empty_profile, experience};
    use sqlx::types::Json;

    fn sample_extracted() -> ExtractedProfile {
        ExtractedProfile {
            skills: vec!["Rust".to_string(), "Python".to_string()],
            experience: vec![ExtractedExperience {
                role: "Engineer".to_string(),
                company: "Acme".to_string(),
                years: 2.0,
                description: "APIs".to_string(),
            }],
            education: vec![ExtractedEducation {
                degree: "BSc".to_string(),
                institution: "TU Berlin".to_string(),
                field: "CS".to_string(),
                graduation_year: Some(2017),
            }],
            projects: vec![ExtractedProject {
                name: "Indexer".to_string(),
                description: "Search index".to_string(),
                technologies: vec!["Rust".to_string()],
            }],
            bio: "Backend engineer.".to_string(),
            location: "Berlin".to_string(),
            phone: "+49 30 1234567".to_string(),
            total_experience_years: 4.5,
            ..ExtractedProfile::default()
        }
    }

    #[test]
    fn test_merge_into_empty_profile_adds_everything() {
        let mut profile = empty_profile();
        let summary = merge_extracted(&mut profile, &sample_extracted());

        assert_eq!(summary.skills_added, 2);
        assert_eq!(summary.experience_added, 1);
        assert_eq!(summary.education_added, 1);
        assert_eq!(summary.projects_added, 1);
        assert!(summary.bio_set && summary.location_set && summary.phone_set);
        assert_eq!(profile.total_experience_years, 4.5);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let extracted = sample_extracted();

        let mut once = empty_profile();
        merge_extracted(&mut once, &extracted);

        let mut twice = empty_profile();
        merge_extracted(&mut twice, &extracted);
        let second = merge_extracted(&mut twice, &extracted);

        assert_eq!(second, MergeSummary::default());
        assert_eq!(once.skills, twice.skills);
        assert_eq!(once.experience.0, twice.experience.0);
        assert_eq!(once.education.0, twice.education.0);
        assert_eq!(once.projects.0, twice.projects.0);
    }

    #[test]
    fn test_skill_dedup_is_case_insensitive() {
        let mut profile = empty_profile();
        profile.skills = vec!["rust".to_string()];

        let summary = merge_extracted(&mut profile, &sample_extracted());
        assert_eq!(summary.skills_added, 1); // only Python
        assert_eq!(profile.skills, vec!["rust", "Python"]);
    }

    #[test]
    fn test_experience_dedup_requires_both_role_and_company() {
        let mut profile = empty_profile();
        profile.experience = Json(vec![experience("ENGINEER", "ACME", 3.0)]);

        let summary = merge_extracted(&mut profile, &sample_extracted());
        assert_eq!(summary.experience_added, 0);
        assert_eq!(profile.experience.len(), 1);
        // The existing entry is untouched.
        assert_eq!(profile.experience[0].years, 3.0);
    }

    #[test]
    fn test_entries_missing_identity_fields_are_skipped() {
        let mut profile = empty_profile();
        let extracted = ExtractedProfile {
            experience: vec![ExtractedExperience {
                role: "Engineer".to_string(),
                company: String::new(),
                years: 1.0,
                description: String::new(),
            }],
            education: vec![ExtractedEducation {
                degree: String::new(),
                institution: "TU Berlin".to_string(),
                field: String::new(),
                graduation_year: Some(2020),
            }],
            projects: vec![ExtractedProject::default()],
            ..ExtractedProfile::default()
        };

        let summary = merge_extracted(&mut profile, &extracted);
        assert_eq!(summary, MergeSummary::default());
    }

    #[test]
    fn test_populated_contact_fields_are_not_overwritten() {
        let mut profile = empty_profile();
        profile.bio = Some("Existing bio".to_string());
        profile.location = Some("Munich".to_string());

        let summary = merge_extracted(&mut profile, &sample_extracted());
        assert!(!summary.bio_set);
        assert!(!summary.location_set);
        assert!(summary.phone_set);
        assert_eq!(profile.bio.as_deref(), Some("Existing bio"));
        assert_eq!(profile.location.as_deref(), Some("Munich"));
    }

    #[test]
    fn test_total_experience_never_decreases() {
        let mut profile = empty_profile();
        profile.total_experience_years = 8.0;

        merge_extracted(&mut profile, &sample_extracted());
        assert_eq!(profile.total_experience_years, 8.0);
    }

    #[test]
    fn test_empty_extraction_is_a_no_op() {
        let mut profile = empty_profile();
        profile.skills = vec!["Rust".to_string()];
        let before = profile.clone();

        let summary = merge_extracted(&mut profile, &ExtractedProfile::default());
        assert_eq!(summary, MergeSummary::default());
        assert_eq!(profile.skills, before.skills);
        assert_eq!(profile.total_experience_years, before.total_experience_years);
    }
}
