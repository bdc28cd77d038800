use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SectionRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    #[serde(rename = "type")]
    pub section_type: String,
    pub title: String,
    pub content: Value,
    pub position: i32,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSection {
    pub section_type: String,
    pub title: String,
    pub content: Value,
    pub position: i32,
    pub is_visible: bool,
}

impl From<&SectionRow> for NewSection {
    fn from(row: &SectionRow) -> Self {
        Self {
            section_type: row.section_type.clone(),
            title: row.title.clone(),
            content: row.content.clone(),
            position: row.position,
            is_visible: row.is_visible,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionPatch {
    #[serde(rename = "type")]
    pub section_type: Option<String>,
    pub title: Option<String>,
    pub content: Option<Value>,
    pub position: Option<i32>,
    pub is_visible: Option<bool>,
}

impl SectionPatch {
    pub fn position(position: i32) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Applies the patch to an in-memory row, leaving timestamps alone.
    pub fn apply_to(&self, row: &mut SectionRow) {
        if let Some(section_type) = &self.section_type {
            row.section_type = section_type.clone();
        }
        if let Some(title) = &self.title {
            row.title = title.clone();
        }
        if let Some(content) = &self.content {
            row.content = content.clone();
        }
        if let Some(position) = self.position {
            row.position = position;
        }
        if let Some(is_visible) = self.is_visible {
            row.is_visible = is_visible;
        }
    }
}

/// Section discriminant as understood by the renderer and the default-content table.
/// Unknown types are kept verbatim so user-defined sections still render.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Profile,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Publications,
    Volunteer,
    Other(String),
}

impl SectionKind {
    pub fn from_type(section_type: &str) -> Self {
        match section_type {
            "profile" => SectionKind::Profile,
            "experience" => SectionKind::Experience,
            "education" => SectionKind::Education,
            "skills" => SectionKind::Skills,
            "projects" => SectionKind::Projects,
            "certifications" => SectionKind::Certifications,
            "languages" => SectionKind::Languages,
            "publications" => SectionKind::Publications,
            "volunteer" => SectionKind::Volunteer,
            other => SectionKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SectionKind::Profile => "profile",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
            SectionKind::Languages => "languages",
            SectionKind::Publications => "publications",
            SectionKind::Volunteer => "volunteer",
            SectionKind::Other(s) => s,
        }
    }
}
