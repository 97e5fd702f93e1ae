// Recruiter domain: profile, saved candidates, bounded search history.

pub mod handlers;
pub mod service;
