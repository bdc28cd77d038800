pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::auth::handle_me;
use crate::export::handle_export;
use crate::public::handle_public_resume;
use crate::render::handlers::{handle_list_templates, handle_preview};
use crate::resumes::handlers as resumes;
use crate::sections::handlers as sections;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/me", get(handle_me))
        .route("/api/v1/templates", get(handle_list_templates))
        // Resumes
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/duplicate",
            post(resumes::handle_duplicate_resume),
        )
        .route(
            "/api/v1/resumes/:id/sections/order",
            put(resumes::handle_reorder_sections),
        )
        .route("/api/v1/resumes/:id/preview", get(handle_preview))
        .route("/api/v1/resumes/:id/export", post(handle_export))
        // Sections
        .route(
            "/api/v1/resumes/:id/sections",
            post(sections::handle_create_section),
        )
        .route(
            "/api/v1/sections/:id",
            get(sections::handle_get_section)
                .put(sections::handle_update_section)
                .delete(sections::handle_delete_section),
        )
        // Published resumes
        .route("/api/v1/public/:slug", get(handle_public_resume))
        .with_state(state)
}
