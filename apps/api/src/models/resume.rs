use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::section::{NewSection, SectionRow};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub slug: String,
    pub template: String,
    pub is_public: bool,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dashboard listing row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub template: String,
    pub is_public: bool,
    pub view_count: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<&ResumeRow> for ResumeSummary {
    fn from(row: &ResumeRow) -> Self {
        Self {
            id: row.id,
            title: row.title.clone(),
            slug: row.slug.clone(),
            template: row.template.clone(),
            is_public: row.is_public,
            view_count: row.view_count,
            updated_at: row.updated_at,
        }
    }
}

/// A resume together with its sections in render order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeWithSections {
    #[serde(flatten)]
    pub resume: ResumeRow,
    pub sections: Vec<SectionRow>,
}

/// Insert payload for a resume and its initial sections.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub user_id: Uuid,
    pub title: String,
    pub slug: String,
    pub template: String,
    pub is_public: bool,
    pub sections: Vec<NewSection>,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumePatch {
    pub title: Option<String>,
    pub template: Option<String>,
    pub is_public: Option<bool>,
}
