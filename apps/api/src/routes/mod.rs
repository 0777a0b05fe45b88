pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::state::AppState;

/// Query parameter shared by the per-user read endpoints.
#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Aptitude intake
        .route(
            "/api/v1/aptitude/questions",
            get(crate::intake::handlers::handle_get_questions),
        )
        .route(
            "/api/v1/aptitude/validate",
            post(crate::intake::handlers::handle_validate_step),
        )
        // Career profile (singleton-replace)
        .route(
            "/api/v1/profile",
            post(crate::profile::handlers::handle_synthesize_profile)
                .get(crate::profile::handlers::handle_get_profile),
        )
        // Career matches (append per generation batch)
        .route(
            "/api/v1/matches",
            post(crate::matching::handlers::handle_generate_matches)
                .get(crate::matching::handlers::handle_list_matches),
        )
        // Roadmaps and milestones
        .route(
            "/api/v1/roadmaps",
            post(crate::roadmap::handlers::handle_build_roadmap)
                .get(crate::roadmap::handlers::handle_list_roadmaps),
        )
        .route(
            "/api/v1/roadmaps/:id",
            get(crate::roadmap::handlers::handle_get_roadmap),
        )
        .route(
            "/api/v1/milestones/:id/completion",
            patch(crate::roadmap::handlers::handle_set_milestone_completion),
        )
        // Progress updates (append-only history)
        .route(
            "/api/v1/roadmaps/:id/progress",
            post(crate::progress::handlers::handle_adapt_progress)
                .get(crate::progress::handlers::handle_progress_history),
        )
        .route(
            "/api/v1/roadmaps/:id/progress/latest",
            get(crate::progress::handlers::handle_latest_progress),
        )
        // Course recommendations
        .route(
            "/api/v1/roadmaps/:id/recommendations",
            post(crate::recommend::handlers::handle_recommend_courses),
        )
        .route(
            "/api/v1/roadmaps/:id/recommendations/latest",
            get(crate::recommend::handlers::handle_latest_recommendation),
        )
        // Advisor chat
        .route(
            "/api/v1/chat",
            post(crate::chat::handlers::handle_chat).get(crate::chat::handlers::handle_chat_history),
        )
        .with_state(state)
}
