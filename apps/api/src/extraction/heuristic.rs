//! Heuristic CV extraction — regex-based section detection.
//!
//! The fallback strategy, and the only strategy when no LLM is configured.
//! It recognizes EXPERIENCE/EDUCATION sections by their headers, splits them
//! into blank-line-separated blocks, and infers role/company/degree per
//! block. Fields it has no basis to infer (bio, title, projects,
//! certifications, total years) stay at their empty defaults.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use regex::Regex;

use crate::extraction::types::{ExtractedEducation, ExtractedExperience, ExtractedProfile};
use crate::extraction::CvExtractor;

/// Reference list of common technology and skill names, matched as
/// case-insensitive substrings. Results keep reference-list order.
const SKILL_REFERENCE: &[&str] = &[
    "JavaScript",
    "Python",
    "Java",
    "React",
    "Node.js",
    "Angular",
    "Vue",
    "TypeScript",
    "MongoDB",
    "SQL",
    "AWS",
    "Docker",
    "Kubernetes",
    "Git",
    "REST API",
    "GraphQL",
    "HTML",
    "CSS",
    "Tailwind",
    "Rust",
    "C++",
    "C#",
    "PostgreSQL",
    "Redis",
    "Django",
    "Flask",
    "Spring",
    "Swift",
    "Kotlin",
    "Terraform",
    "Azure",
    "Linux",
];

const MAX_ENTRIES_PER_SECTION: usize = 5;
const MIN_EXPERIENCE_SECTION_LEN: usize = 20;
const MIN_EDUCATION_SECTION_LEN: usize = 10;

pub struct HeuristicExtractor {
    experience_header: Regex,
    experience_end: Regex,
    education_header: Regex,
    education_end: Regex,
    blank_line: Regex,
    date_line: Regex,
    degree_keywords: Regex,
    institution_keywords: Regex,
    year: Regex,
    email: Regex,
    phone: Regex,
}

impl Default for HeuristicExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicExtractor {
    pub fn new() -> Self {
        let experience_header = Regex::new(
            r"(?i)WORK\s+EXPERIENCE|PROFESSIONAL\s+EXPERIENCE|EMPLOYMENT\s+HISTORY|WORK\s+HISTORY|EXPERIENCE",
        )
        .expect("Invalid experience header regex");

        let experience_end = Regex::new(r"(?i)\b(?:EDUCATION|SKILLS|PROJECTS|CERTIFICATIONS)\b")
            .expect("Invalid experience terminator regex");

        let education_header =
            Regex::new(r"(?i)EDUCATION|ACADEMIC\s+BACKGROUND|EDUCATIONAL\s+QUALIFICATIONS?")
                .expect("Invalid education header regex");

        let education_end =
            Regex::new(r"(?i)\b(?:WORK|EXPERIENCE|SKILLS|PROJECTS|CERTIFICATIONS)\b")
                .expect("Invalid education terminator regex");

        let blank_line = Regex::new(r"\n\s*\n").expect("Invalid blank line regex");

        // Month-name + year, or a year range ending in a year/"present".
        let date_line = Regex::new(
            r"(?i)\b(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:tember)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)[\s,]*\d{4}|\b(?:19|20)\d{2}\s*[-–—]\s*(?:(?:19|20)\d{2}|Present|Current)\b",
        )
        .expect("Invalid date line regex");

        let degree_keywords = Regex::new(
            r"(?i)\b(?:Bachelor|Master|PhD|Doctorate|B\.?Sc?\.?|M\.?Sc?\.?|B\.?A\.?|M\.?A\.?|B\.?Tech|M\.?Tech|B\.?E\.?|M\.?E\.?|Diploma|Associate|Degree|High\s+School|Secondary)\b",
        )
        .expect("Invalid degree keyword regex");

        let institution_keywords =
            Regex::new(r"(?i)\b(?:University|College|School|Institute|Academy)\b")
                .expect("Invalid institution keyword regex");

        let year = Regex::new(r"\b(?:19|20)\d{2}\b").expect("Invalid year regex");

        let email = Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("Invalid email regex");

        let phone = Regex::new(r"[0-9\s()+-]{10,}").expect("Invalid phone regex");

        Self {
            experience_header,
            experience_end,
            education_header,
            education_end,
            blank_line,
            date_line,
            degree_keywords,
            institution_keywords,
            year,
            email,
            phone,
        }
    }

    /// Runs the full heuristic pipeline. Pure and synchronous.
    pub fn extract_profile(&self, cv_text: &str) -> ExtractedProfile {
        let name = cv_text
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(|l| truncate(l, 50))
            .unwrap_or_default();

        let email = self
            .email
            .find(cv_text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let phone = self
            .phone
            .find(cv_text)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        ExtractedProfile {
            name,
            email,
            phone,
            skills: self.extract_skills(cv_text),
            experience: self.extract_experience(cv_text),
            education: self.extract_education(cv_text),
            ..ExtractedProfile::default()
        }
    }

    /// Subset of the reference skill list found in the text, in list order.
    fn extract_skills(&self, cv_text: &str) -> Vec<String> {
        let haystack = cv_text.to_lowercase();
        SKILL_REFERENCE
            .iter()
            .filter(|skill| haystack.contains(&skill.to_lowercase()))
            .map(|skill| skill.to_string())
            .collect()
    }

    /// Captures the text between a section header and the next recognized
    /// section header (or end of document). Returns `None` when the header is
    /// missing or the captured span is shorter than `min_len`.
    fn capture_section<'t>(
        &self,
        text: &'t str,
        header: &Regex,
        end: &Regex,
        min_len: usize,
    ) -> Option<&'t str> {
        let header_match = header.find(text)?;
        let rest = &text[header_match.end()..];
        let section = match end.find(rest) {
            Some(m) => &rest[..m.start()],
            None => rest,
        };
        if section.trim().len() > min_len {
            Some(section)
        } else {
            None
        }
    }

    fn extract_experience(&self, cv_text: &str) -> Vec<ExtractedExperience> {
        let Some(section) = self.capture_section(
            cv_text,
            &self.experience_header,
            &self.experience_end,
            MIN_EXPERIENCE_SECTION_LEN,
        ) else {
            return vec![];
        };

        let mut entries = Vec::new();

        for block in self
            .blank_line
            .split(section)
            .filter(|b| b.trim().len() > 10)
        {
            if entries.len() >= MAX_ENTRIES_PER_SECTION {
                break;
            }

            let lines: Vec<&str> = block
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect();
            if lines.len() < 2 {
                continue;
            }

            // Prefer the layout "company / role / date range": the line just
            // above a date line is the role, the one above that the company.
            let mut role = String::new();
            let mut company = String::new();
            for (i, line) in lines.iter().enumerate() {
                if self.date_line.is_match(line) {
                    if i > 0 {
                        role = lines[i - 1].to_string();
                    }
                    if i > 1 {
                        company = lines[i - 2].to_string();
                    } else if i == 1 {
                        company = lines[0].to_string();
                    }
                }
            }

            // No date line: first line is the role, second the company.
            if role.is_empty() {
                role = lines[0].to_string();
                let stripped = self.date_line.replace(lines[1], "").trim().to_string();
                company = if stripped.is_empty() {
                    lines[1].to_string()
                } else {
                    stripped
                };
            }

            if role.chars().count() > 3 && role.chars().count() < 150 {
                let description = lines
                    .iter()
                    .skip(2)
                    .take(3)
                    .copied()
                    .collect::<Vec<_>>()
                    .join(" ");
                entries.push(ExtractedExperience {
                    role: truncate(&role, 100),
                    company: if company.is_empty() {
                        "Company".to_string()
                    } else {
                        truncate(&company, 100)
                    },
                    // Placeholder: the heuristic cannot reliably infer duration.
                    years: 1.0,
                    description: truncate(&description, 200),
                });
            }
        }

        entries
    }

    fn extract_education(&self, cv_text: &str) -> Vec<ExtractedEducation> {
        let Some(section) = self.capture_section(
            cv_text,
            &self.education_header,
            &self.education_end,
            MIN_EDUCATION_SECTION_LEN,
        ) else {
            return vec![];
        };

        let mut entries = Vec::new();

        for block in self
            .blank_line
            .split(section)
            .filter(|b| b.trim().len() > 5)
        {
            if entries.len() >= MAX_ENTRIES_PER_SECTION {
                break;
            }

            let lines: Vec<&str> = block
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect();
            if lines.is_empty() {
                continue;
            }

            let degree_line = lines
                .iter()
                .find(|l| self.degree_keywords.is_match(l))
                .copied();

            let mut institution = lines
                .iter()
                .find(|l| self.institution_keywords.is_match(l) && Some(**l) != degree_line)
                .map(|l| l.to_string());
            if institution.is_none() && lines.len() > 1 {
                institution = Some(lines[1].to_string());
            }

            let graduation_year = Some(
                self.year
                    .find_iter(block)
                    .last()
                    .and_then(|m| m.as_str().parse::<i32>().ok())
                    .unwrap_or_else(|| Utc::now().year()),
            );

            let degree = degree_line.unwrap_or(lines[0]);

            if degree.chars().count() > 2 {
                entries.push(ExtractedEducation {
                    degree: truncate(degree, 100),
                    institution: truncate(
                        institution.as_deref().unwrap_or("University"),
                        100,
                    ),
                    field: String::new(),
                    graduation_year,
                });
            }
        }

        entries
    }
}

#[async_trait]
impl CvExtractor for HeuristicExtractor {
    async fn extract(&self, cv_text: &str) -> ExtractedProfile {
        self.extract_profile(cv_text)
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CV: &str = "\
Jane Smith
jane.smith@example.com
+1 (555) 123-4567
San Francisco, CA

WORK EXPERIENCE

Acme Corp
Senior Backend Engineer
Jan 2020 - Present
Built payment services handling 2M transactions daily
Scaled the API platform to 40 regions

Initech
Software Engineer
2016 - 2019
Maintained the billing pipeline

EDUCATION

Bachelor of Science in Computer Science
Stanford University
2012 - 2016

SKILLS
Python, JavaScript, React, Docker, AWS
";

    fn extractor() -> HeuristicExtractor {
        HeuristicExtractor::new()
    }

    #[test]
    fn test_skills_found_in_reference_order() {
        let profile = extractor().extract_profile(SAMPLE_CV);
        // "Java" is reported too: substring match against "JavaScript".
        assert_eq!(
            profile.skills,
            vec!["JavaScript", "Python", "Java", "React", "AWS", "Docker"]
        );
    }

    #[test]
    fn test_experience_role_above_date_line() {
        let profile = extractor().extract_profile(SAMPLE_CV);
        assert_eq!(profile.experience.len(), 2);
        assert_eq!(profile.experience[0].role, "Senior Backend Engineer");
        assert_eq!(profile.experience[0].company, "Acme Corp");
        assert_eq!(profile.experience[1].role, "Software Engineer");
        assert_eq!(profile.experience[1].company, "Initech");
    }

    #[test]
    fn test_experience_years_is_placeholder_one() {
        let profile = extractor().extract_profile(SAMPLE_CV);
        assert!(profile.experience.iter().all(|e| e.years == 1.0));
    }

    #[test]
    fn test_experience_without_date_line_uses_first_two_lines() {
        let cv = "\
John Doe

EXPERIENCE

Staff Engineer
Globex Corporation
Led the data platform team
";
        let profile = extractor().extract_profile(cv);
        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.experience[0].role, "Staff Engineer");
        assert_eq!(profile.experience[0].company, "Globex Corporation");
    }

    #[test]
    fn test_education_degree_and_institution() {
        let profile = extractor().extract_profile(SAMPLE_CV);
        assert_eq!(profile.education.len(), 1);
        assert_eq!(
            profile.education[0].degree,
            "Bachelor of Science in Computer Science"
        );
        assert_eq!(profile.education[0].institution, "Stanford University");
        assert_eq!(profile.education[0].graduation_year, Some(2016));
    }

    #[test]
    fn test_missing_education_header_yields_empty_list() {
        let cv = "Jane Smith\n\nWORK EXPERIENCE\n\nAcme Corp\nEngineer\nJan 2020 - Present\n";
        let profile = extractor().extract_profile(cv);
        assert!(profile.education.is_empty());
    }

    #[test]
    fn test_too_short_experience_section_yields_empty_list() {
        let cv = "Jane Smith\n\nEXPERIENCE\nshort\n\nEDUCATION\n\nBachelor of Arts\nState College\n2010\n";
        let profile = extractor().extract_profile(cv);
        assert!(profile.experience.is_empty());
        assert_eq!(profile.education.len(), 1);
    }

    #[test]
    fn test_contact_fields() {
        let profile = extractor().extract_profile(SAMPLE_CV);
        assert_eq!(profile.name, "Jane Smith");
        assert_eq!(profile.email, "jane.smith@example.com");
        assert_eq!(profile.phone, "+1 (555) 123-4567");
    }

    #[test]
    fn test_name_truncated_to_50_chars() {
        let long_name = "X".repeat(80);
        let profile = extractor().extract_profile(&long_name);
        assert_eq!(profile.name.chars().count(), 50);
    }

    #[test]
    fn test_uninferable_fields_stay_empty() {
        let profile = extractor().extract_profile(SAMPLE_CV);
        assert!(profile.bio.is_empty());
        assert!(profile.title.is_empty());
        assert!(profile.projects.is_empty());
        assert!(profile.certifications.is_empty());
        assert_eq!(profile.total_experience_years, 0.0);
    }

    #[test]
    fn test_graduation_year_defaults_to_current_year() {
        let cv = "Jane\n\nEDUCATION\n\nBachelor of Engineering\nTech Institute\n";
        let profile = extractor().extract_profile(cv);
        assert_eq!(profile.education.len(), 1);
        assert_eq!(profile.education[0].graduation_year, Some(Utc::now().year()));
    }

    #[test]
    fn test_role_length_gate_rejects_short_roles() {
        let cv = "Jane\n\nEXPERIENCE\n\nDev\nAcme Corporation International\n";
        let profile = extractor().extract_profile(cv);
        // "Dev" has length 3, which is not > 3.
        assert!(profile.experience.is_empty());
    }

    #[test]
    fn test_empty_text_yields_all_defaults() {
        let profile = extractor().extract_profile("");
        assert_eq!(profile, ExtractedProfile::default());
    }
}
