//! Unauthenticated access to resumes their owners have published.

use axum::extract::{Path, State};
use tracing::info;

use crate::errors::AppError;
use crate::render::templates::Template;
use crate::render::{render, RenderFormat, Rendered};
use crate::state::AppState;

/// GET /api/v1/public/:slug
///
/// Counts the view and renders the resume with its stored template. Private
/// and unknown slugs are both reported as not found.
pub async fn handle_public_resume(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Rendered, AppError> {
    let resume = state
        .store
        .view_public_resume(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Public resume '{slug}' not found")))?;

    info!(
        "Public view of resume {} (views: {})",
        resume.resume.id, resume.resume.view_count
    );
    render(
        &resume,
        Template::resolve(&resume.resume.template),
        RenderFormat::Html,
    )
}
