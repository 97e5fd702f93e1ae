// AI candidate matching: requirement extraction from free-text job
// descriptions, per-candidate scoring, and score-based fallback ranking.

pub mod engine;
pub mod handlers;
pub mod prompts;
pub mod service;
