use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::{ResumePatch, ResumeRow, ResumeSummary, ResumeWithSections};
use crate::models::section::SectionRow;
use crate::render::templates::DEFAULT_TEMPLATE;
use crate::resumes::builder::{duplicate_of, new_resume, DEFAULT_TITLE};
use crate::sections::ordering::move_section;
use crate::state::AppState;
use crate::validation::{validate_template, validate_title};

#[derive(Debug, Default, Deserialize)]
pub struct CreateResumeRequest {
    pub title: Option<String>,
    pub template: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub from: i64,
    pub to: i64,
}

/// Treats a missing, empty or whitespace-only field as absent.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    Ok(Json(state.store.list_resumes(user.id).await?))
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateResumeRequest>,
) -> Result<Json<ResumeWithSections>, AppError> {
    let title = match non_blank(req.title.as_deref()) {
        Some(title) => validate_title("title", title)?,
        None => DEFAULT_TITLE.to_string(),
    };
    let template = match non_blank(req.template.as_deref()) {
        Some(template) => validate_template(template)?,
        None => DEFAULT_TEMPLATE,
    };

    let created = state
        .store
        .create_resume(new_resume(user.id, title, template))
        .await?;
    Ok(Json(created))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeWithSections>, AppError> {
    let resume = state
        .store
        .get_resume(user.id, id)
        .await?
        .ok_or_else(|| AppError::resume_not_found(id))?;
    Ok(Json(resume))
}

/// PUT /api/v1/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(mut patch): Json<ResumePatch>,
) -> Result<Json<ResumeRow>, AppError> {
    if let Some(title) = &patch.title {
        patch.title = Some(validate_title("title", title)?);
    }
    if let Some(template) = &patch.template {
        validate_template(template)?;
    }

    let resume = state
        .store
        .update_resume(user.id, id, &patch)
        .await?
        .ok_or_else(|| AppError::resume_not_found(id))?;
    Ok(Json(resume))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if !state.store.delete_resume(user.id, id).await? {
        return Err(AppError::resume_not_found(id));
    }
    info!("Deleted resume {id}");
    Ok(Json(json!({ "success": true })))
}

/// POST /api/v1/resumes/:id/duplicate
pub async fn handle_duplicate_resume(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeWithSections>, AppError> {
    let original = state
        .store
        .get_resume(user.id, id)
        .await?
        .ok_or_else(|| AppError::resume_not_found(id))?;

    let copy = state
        .store
        .create_resume(duplicate_of(user.id, &original))
        .await?;
    info!("Duplicated resume {id} into {}", copy.resume.id);
    Ok(Json(copy))
}

/// PUT /api/v1/resumes/:id/sections/order
pub async fn handle_reorder_sections(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<Vec<SectionRow>>, AppError> {
    let resume = state
        .store
        .get_resume(user.id, id)
        .await?
        .ok_or_else(|| AppError::resume_not_found(id))?;

    let ordered_ids: Vec<Uuid> = resume.sections.iter().map(|s| s.id).collect();
    let positions = move_section(&ordered_ids, req.from, req.to)?;

    let sections = state
        .store
        .set_section_positions(user.id, id, &positions)
        .await?
        .ok_or_else(|| AppError::resume_not_found(id))?;
    Ok(Json(sections))
}
