use serde::{Deserialize, Serialize};

/// Uniform payload produced by every extraction strategy.
///
/// Every key is always present (empty defaults), so the merge engine never
/// branches on which strategy produced the data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub title: String,
    pub bio: String,
    pub total_experience_years: f64,
    pub skills: Vec<String>,
    pub experience: Vec<ExtractedExperience>,
    pub education: Vec<ExtractedEducation>,
    pub projects: Vec<ExtractedProject>,
    pub certifications: Vec<ExtractedCertification>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedExperience {
    pub role: String,
    pub company: String,
    pub years: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEducation {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub graduation_year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedProject {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedCertification {
    pub name: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub year: Option<i32>,
}
