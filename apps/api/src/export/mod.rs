//! Rendered resume exports written to object storage.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use axum::{
    extract::{Path, State},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::render::templates::Template;
use crate::render::{render, RenderFormat};
use crate::state::AppState;

/// Destination for exported documents. Carried in `AppState` as
/// `Arc<dyn ExportSink>`.
#[async_trait]
pub trait ExportSink: Send + Sync {
    async fn put(&self, key: &str, content_type: &str, body: Bytes) -> Result<(), AppError>;
}

pub struct S3ExportSink {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ExportSink {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ExportSink for S3ExportSink {
    async fn put(&self, key: &str, content_type: &str, body: Bytes) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded export to s3://{}/{}", self.bucket, key);
        Ok(())
    }
}

/// `exports/<user_id>/<resume_id>/<timestamp>.<ext>`
pub fn export_key(user_id: Uuid, resume_id: Uuid, format: RenderFormat) -> String {
    format!(
        "exports/{}/{}/{}.{}",
        user_id,
        resume_id,
        Utc::now().format("%Y%m%dT%H%M%S%.3fZ"),
        format.extension()
    )
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub format: RenderFormat,
    pub template: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportResponse {
    pub key: String,
    pub format: RenderFormat,
    pub bytes: usize,
}

/// POST /api/v1/resumes/:id/export
pub async fn handle_export(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(resume_id): Path<Uuid>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, AppError> {
    let resume = state
        .store
        .get_resume(user.id, resume_id)
        .await?
        .ok_or_else(|| AppError::resume_not_found(resume_id))?;

    let template = Template::resolve(
        request
            .template
            .as_deref()
            .unwrap_or(&resume.resume.template),
    );
    let rendered = render(&resume, template, request.format)?;

    let key = export_key(user.id, resume_id, request.format);
    let body = Bytes::from(rendered.body);
    let size = body.len();
    state
        .exports
        .put(&key, request.format.content_type(), body)
        .await?;

    info!("Exported resume {resume_id} as {:?} ({size} bytes)", request.format);
    Ok(Json(ExportResponse {
        key,
        format: request.format,
        bytes: size,
    }))
}
