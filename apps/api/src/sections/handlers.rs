use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::section::{NewSection, SectionKind, SectionPatch, SectionRow};
use crate::sections::defaults::{default_content, default_title};
use crate::sections::ordering::next_position;
use crate::state::AppState;
use crate::validation::{validate_content, validate_section_type, validate_title};

/// Body of `POST /api/v1/resumes/:id/sections`. Everything but the type is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSectionRequest {
    #[serde(rename = "type")]
    pub section_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl CreateSectionRequest {
    /// Validates the request and fills in defaults against the resume's
    /// current sections.
    pub fn into_new_section(self, existing: &[SectionRow]) -> Result<NewSection, AppError> {
        validate_section_type(&self.section_type)?;
        let title = match self.title.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(title) => validate_title("title", title)?,
            None => default_title(&self.section_type),
        };
        let content = match self.content {
            Some(content) => {
                validate_content(&content)?;
                content
            }
            None => default_content(&SectionKind::from_type(&self.section_type)),
        };
        Ok(NewSection {
            title,
            content,
            position: self.position.unwrap_or_else(|| next_position(existing)),
            is_visible: self.is_visible.unwrap_or(true),
            section_type: self.section_type,
        })
    }
}

fn validate_patch(mut patch: SectionPatch) -> Result<SectionPatch, AppError> {
    if let Some(section_type) = &patch.section_type {
        validate_section_type(section_type)?;
    }
    if let Some(title) = &patch.title {
        patch.title = Some(validate_title("title", title)?);
    }
    if let Some(content) = &patch.content {
        validate_content(content)?;
    }
    Ok(patch)
}

/// POST /api/v1/resumes/:id/sections
pub async fn handle_create_section(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(resume_id): Path<Uuid>,
    Json(req): Json<CreateSectionRequest>,
) -> Result<Json<SectionRow>, AppError> {
    let resume = state
        .store
        .get_resume(user.id, resume_id)
        .await?
        .ok_or_else(|| AppError::resume_not_found(resume_id))?;
    let new_section = req.into_new_section(&resume.sections)?;

    let section = state
        .store
        .create_section(user.id, resume_id, new_section)
        .await?
        .ok_or_else(|| AppError::resume_not_found(resume_id))?;
    info!(
        "Added {} section {} to resume {resume_id}",
        section.section_type, section.id
    );
    Ok(Json(section))
}

/// GET /api/v1/sections/:id
pub async fn handle_get_section(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SectionRow>, AppError> {
    let section = state
        .store
        .get_section(user.id, id)
        .await?
        .ok_or_else(|| AppError::section_not_found(id))?;
    Ok(Json(section))
}

/// PUT /api/v1/sections/:id
pub async fn handle_update_section(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<SectionPatch>,
) -> Result<Json<SectionRow>, AppError> {
    let patch = validate_patch(patch)?;
    let section = state
        .store
        .update_section(user.id, id, &patch)
        .await?
        .ok_or_else(|| AppError::section_not_found(id))?;
    Ok(Json(section))
}

/// DELETE /api/v1/sections/:id
pub async fn handle_delete_section(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if !state.store.delete_section(user.id, id).await? {
        return Err(AppError::section_not_found(id));
    }
    info!("Deleted section {id}");
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    use crate::test_support::TestApp;

    fn request(section_type: &str) -> CreateSectionRequest {
        CreateSectionRequest {
            section_type: section_type.to_string(),
            title: None,
            content: None,
            position: None,
            is_visible: None,
        }
    }

    #[test]
    fn test_defaults_filled_in() {
        let section = request("projects").into_new_section(&[]).unwrap();
        assert_eq!(section.title, "Projects");
        assert_eq!(section.position, 0);
        assert!(section.is_visible);
        assert!(section.content["items"][0]["id"]
            .as_str()
            .unwrap()
            .starts_with("proj-"));

        let awards = request("awards").into_new_section(&[]).unwrap();
        assert_eq!(awards.title, "Awards");
        assert_eq!(awards.content, json!({}));
    }

    #[test]
    fn test_explicit_fields_win() {
        let mut req = request("languages");
        req.title = Some("  Spoken Languages ".to_string());
        req.content = Some(json!({"items": [{"name": "French"}]}));
        req.position = Some(9);
        req.is_visible = Some(false);
        let section = req.into_new_section(&[]).unwrap();
        assert_eq!(section.title, "Spoken Languages");
        assert_eq!(section.content["items"][0]["name"], "French");
        assert_eq!(section.position, 9);
        assert!(!section.is_visible);
    }

    #[test]
    fn test_blank_title_falls_back_to_default() {
        let mut req = request("volunteer");
        req.title = Some("  ".to_string());
        let section = req.into_new_section(&[]).unwrap();
        assert_eq!(section.title, "Volunteer");
    }

    #[test]
    fn test_invalid_requests_rejected() {
        assert!(request("Not Valid").into_new_section(&[]).is_err());
        assert!(request("").into_new_section(&[]).is_err());

        let mut req = request("skills");
        req.content = Some(json!(["not", "an", "object"]));
        assert!(req.into_new_section(&[]).is_err());
    }

    async fn resume_with_sections(app: &TestApp, token: &str) -> Value {
        let (_, created) = app.post("/api/v1/resumes", token, json!({})).await;
        created
    }

    #[tokio::test]
    async fn test_create_section_appends() {
        let app = TestApp::new();
        let token = app.token("alice");
        let resume = resume_with_sections(&app, &token).await;
        let id = resume["id"].as_str().unwrap();

        let (status, section) = app
            .post(
                &format!("/api/v1/resumes/{id}/sections"),
                &token,
                json!({"type": "certifications"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(section["type"], "certifications");
        assert_eq!(section["title"], "Certifications");
        assert_eq!(section["position"], 4);
        assert_eq!(section["is_visible"], true);
        assert_eq!(section["resume_id"], resume["id"]);

        let (_, fetched) = app.get(&format!("/api/v1/resumes/{id}"), &token).await;
        assert_eq!(fetched["sections"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_create_section_on_foreign_resume() {
        let app = TestApp::new();
        let alice = app.token("alice");
        let bob = app.token("bob");
        let resume = resume_with_sections(&app, &alice).await;
        let id = resume["id"].as_str().unwrap();

        let (status, _) = app
            .post(
                &format!("/api/v1/resumes/{id}/sections"),
                &bob,
                json!({"type": "skills"}),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(app.store.section_count(), 4);
    }

    #[tokio::test]
    async fn test_update_and_delete_section() {
        let app = TestApp::new();
        let token = app.token("alice");
        let resume = resume_with_sections(&app, &token).await;
        let section_id = resume["sections"][1]["id"].as_str().unwrap();
        let uri = format!("/api/v1/sections/{section_id}");

        let (status, updated) = app
            .put(
                &uri,
                &token,
                json!({"title": "Experience", "is_visible": false}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "Experience");
        assert_eq!(updated["is_visible"], false);
        assert_eq!(updated["type"], "experience");
        assert_eq!(updated["content"], resume["sections"][1]["content"]);

        let (status, _) = app.put(&uri, &token, json!({"content": 5})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, fetched) = app.get(&uri, &token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["title"], "Experience");

        let (status, body) = app.delete(&uri, &token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (status, _) = app.get(&uri, &token).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Remaining positions keep their gaps.
        let id = resume["id"].as_str().unwrap();
        let (_, fetched) = app.get(&format!("/api/v1/resumes/{id}"), &token).await;
        let positions: Vec<i64> = fetched["sections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["position"].as_i64().unwrap())
            .collect();
        assert_eq!(positions, [1, 3, 4]);
    }

    #[tokio::test]
    async fn test_foreign_section_is_not_found() {
        let app = TestApp::new();
        let alice = app.token("alice");
        let bob = app.token("bob");
        let resume = resume_with_sections(&app, &alice).await;
        let uri = format!(
            "/api/v1/sections/{}",
            resume["sections"][0]["id"].as_str().unwrap()
        );

        let (status, _) = app.get(&uri, &bob).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = app.put(&uri, &bob, json!({"title": "x"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = app.delete(&uri, &bob).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(app.store.section_count(), 4);
    }
}
