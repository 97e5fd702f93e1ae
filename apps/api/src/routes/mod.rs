pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::matching::handlers as matching;
use crate::profiles::handlers as profiles;
use crate::recruiters::handlers as recruiters;
use crate::search::handlers as search;
use crate::state::AppState;
use crate::upload::handlers as upload;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job-seeker profiles
        .route("/api/v1/job-seekers/me", get(profiles::handle_get_own_profile))
        .route(
            "/api/v1/job-seekers/me",
            patch(profiles::handle_update_own_profile),
        )
        .route("/api/v1/job-seekers/me/cv", post(upload::handle_upload_cv))
        .route(
            "/api/v1/job-seekers/me/cv",
            delete(upload::handle_delete_cv),
        )
        .route("/api/v1/job-seekers/:id", get(profiles::handle_get_profile))
        .route(
            "/api/v1/job-seekers/:id/suggestions",
            get(profiles::handle_suggestions),
        )
        .route(
            "/api/v1/job-seekers/:id/summary",
            post(profiles::handle_generate_summary),
        )
        // Recruiters
        .route("/api/v1/recruiters", post(recruiters::handle_create_profile))
        .route("/api/v1/recruiters/me", get(recruiters::handle_get_profile))
        .route(
            "/api/v1/recruiters/me",
            patch(recruiters::handle_update_profile),
        )
        .route(
            "/api/v1/recruiters/me/saved-candidates",
            get(recruiters::handle_get_saved_candidates),
        )
        .route(
            "/api/v1/recruiters/me/saved-candidates",
            post(recruiters::handle_save_candidate),
        )
        .route(
            "/api/v1/recruiters/me/saved-candidates/:candidate_id",
            delete(recruiters::handle_remove_saved_candidate),
        )
        .route(
            "/api/v1/recruiters/me/search-history",
            get(recruiters::handle_get_search_history),
        )
        // Candidate search
        .route("/api/v1/search/candidates", post(search::handle_search))
        .route("/api/v1/search/top", get(search::handle_top_candidates))
        .route(
            "/api/v1/search/by-skills",
            get(search::handle_candidates_by_skills),
        )
        .route("/api/v1/search/statistics", get(search::handle_statistics))
        // AI matching
        .route("/api/v1/match", post(matching::handle_match))
        .with_state(state)
}
