//! Pure candidate search engine: composite filter, sort, pagination.
//!
//! Operates on rows already fetched from the store. All supplied criteria
//! are AND-ed together; the base predicate `is_open_to_work` always applies.
//! Removing a criterion can only grow the result set.

use serde::Serialize;

use crate::models::job_seeker::JobSeekerRow;
use crate::search::criteria::{SearchCriteria, SortBy, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchOutcome {
    pub candidates: Vec<JobSeekerRow>,
    pub pagination: Pagination,
}

/// Filters, sorts, and paginates candidates. `total` counts the full
/// filtered set, not the returned page.
pub fn run_search(rows: Vec<JobSeekerRow>, criteria: &SearchCriteria) -> SearchOutcome {
    let mut matched: Vec<JobSeekerRow> = rows
        .into_iter()
        .filter(|row| matches_criteria(row, criteria))
        .collect();

    sort_candidates(&mut matched, criteria.sort_by, criteria.sort_order);

    let total = matched.len();
    let page = criteria.page();
    let limit = criteria.limit();
    let total_pages = (total as u32).div_ceil(limit);

    let skip = ((page as u64 - 1) * limit as u64) as usize;
    let candidates: Vec<JobSeekerRow> = matched
        .into_iter()
        .skip(skip)
        .take(limit as usize)
        .collect();

    SearchOutcome {
        candidates,
        pagination: Pagination {
            total,
            page,
            limit,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        },
    }
}

/// True iff the candidate satisfies every supplied criterion.
pub fn matches_criteria(row: &JobSeekerRow, criteria: &SearchCriteria) -> bool {
    if !row.is_open_to_work {
        return false;
    }

    if let Some(query) = non_empty(&criteria.query) {
        if !matches_free_text(row, query) {
            return false;
        }
    }

    if let Some(skills) = &criteria.skills {
        if !skills.is_empty() {
            let any_match = skills.iter().any(|wanted| {
                row.skills
                    .iter()
                    .any(|skill| contains_ci(skill, wanted))
            });
            if !any_match {
                return false;
            }
        }
    }

    if let Some(location) = non_empty(&criteria.location) {
        match &row.location {
            Some(candidate_location) if contains_ci(candidate_location, location) => {}
            _ => return false,
        }
    }

    if let Some(min) = criteria.min_experience {
        if row.total_experience_years < min {
            return false;
        }
    }
    if let Some(max) = criteria.max_experience {
        if row.total_experience_years > max {
            return false;
        }
    }

    // Salary bounds only match candidates that state an expectation.
    if criteria.min_salary.is_some() || criteria.max_salary.is_some() {
        let Some(salary) = row.expected_salary else {
            return false;
        };
        if criteria.min_salary.is_some_and(|min| salary < min) {
            return false;
        }
        if criteria.max_salary.is_some_and(|max| salary > max) {
            return false;
        }
    }

    if let Some(keyword) = non_empty(&criteria.education) {
        let any_match = row
            .education
            .iter()
            .any(|e| contains_ci(&e.degree, keyword));
        if !any_match {
            return false;
        }
    }

    if let Some(min_score) = criteria.min_profile_score {
        if row.profile_score < min_score {
            return false;
        }
    }

    if let Some(job_types) = &criteria.job_types {
        if !job_types.is_empty() {
            let intersects = job_types
                .iter()
                .any(|t| row.preferred_job_types.iter().any(|p| p == t));
            if !intersects {
                return false;
            }
        }
    }

    true
}

/// Free text is OR-matched across skills, experience roles and companies,
/// education degrees and fields, and the bio.
fn matches_free_text(row: &JobSeekerRow, query: &str) -> bool {
    row.skills.iter().any(|s| contains_ci(s, query))
        || row
            .experience
            .iter()
            .any(|e| contains_ci(&e.role, query) || contains_ci(&e.company, query))
        || row
            .education
            .iter()
            .any(|e| contains_ci(&e.degree, query) || contains_ci(&e.field, query))
        || row
            .bio
            .as_deref()
            .is_some_and(|bio| contains_ci(bio, query))
}

fn sort_candidates(rows: &mut [JobSeekerRow], sort_by: SortBy, order: SortOrder) {
    rows.sort_by(|a, b| {
        let ordering = match sort_by {
            SortBy::ProfileScore => a.profile_score.cmp(&b.profile_score),
            SortBy::Experience => a
                .total_experience_years
                .partial_cmp(&b.total_experience_years)
                .unwrap_or(std::cmp::Ordering::Equal),
            SortBy::Recent => a.last_updated.cmp(&b.last_updated),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}
