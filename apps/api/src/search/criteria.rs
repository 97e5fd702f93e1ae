use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    ProfileScore,
    Experience,
    Recent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Multi-criteria candidate search request. All criteria are optional and
/// AND-ed together on top of the implicit `is_open_to_work` predicate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Free text, OR-matched across skills, roles, companies, degrees,
    /// fields, and bio.
    pub query: Option<String>,
    /// Matches when ANY listed skill is a substring of ANY candidate skill.
    pub skills: Option<Vec<String>>,
    pub location: Option<String>,
    pub min_experience: Option<f64>,
    pub max_experience: Option<f64>,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    /// Keyword matched against education degrees.
    pub education: Option<String>,
    pub min_profile_score: Option<i32>,
    pub job_types: Option<Vec<String>>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl SearchCriteria {
    /// 1-based page, defaulting to 1.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, defaulting to 20 and clamped to 1..=100.
    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT)
    }
}
