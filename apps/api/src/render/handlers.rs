use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::render::templates::{catalogue, Template, TemplateInfo};
use crate::render::{render, RenderFormat, Rendered};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    pub template: Option<String>,
    #[serde(default)]
    pub format: RenderFormat,
}

impl IntoResponse for Rendered {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, self.format.content_type())], self.body).into_response()
    }
}

/// GET /api/v1/resumes/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<PreviewQuery>,
) -> Result<Rendered, AppError> {
    let resume = state
        .store
        .get_resume(user.id, id)
        .await?
        .ok_or_else(|| AppError::resume_not_found(id))?;

    // JSON is the full data export and would include hidden sections.
    if query.format == RenderFormat::Json {
        return Err(AppError::Validation(
            "Preview format must be 'html' or 'text'".to_string(),
        ));
    }

    let template = Template::resolve(
        query
            .template
            .as_deref()
            .unwrap_or(&resume.resume.template),
    );
    render(&resume, template, query.format)
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateInfo>> {
    Json(catalogue())
}
