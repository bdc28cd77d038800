//! Persistence seam for users, resumes and sections.
//!
//! Every resume and section query is scoped by the owning user's id, so a
//! record that belongs to someone else is indistinguishable from a missing
//! one (`Ok(None)` / `Ok(false)`). Handlers turn that into a 404.
//!
//! `AppState` holds an `Arc<dyn ResumeStore>`; production uses
//! [`PgResumeStore`], tests use the in-memory store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumePatch, ResumeRow, ResumeSummary, ResumeWithSections};
use crate::models::section::{NewSection, SectionPatch, SectionRow};
use crate::models::user::User;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgResumeStore;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Inserts the user on first sight, refreshing email and name afterwards.
    async fn upsert_user(
        &self,
        external_id: &str,
        email: &str,
        name: Option<&str>,
    ) -> Result<User, AppError>;

    /// Summaries of the user's resumes, most recently updated first.
    async fn list_resumes(&self, user_id: Uuid) -> Result<Vec<ResumeSummary>, AppError>;

    /// Inserts a resume and all of its sections atomically.
    async fn create_resume(&self, new_resume: NewResume) -> Result<ResumeWithSections, AppError>;

    async fn get_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<ResumeWithSections>, AppError>;

    async fn update_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        patch: &ResumePatch,
    ) -> Result<Option<ResumeRow>, AppError>;

    /// Deletes the resume and its sections atomically.
    async fn delete_resume(&self, user_id: Uuid, resume_id: Uuid) -> Result<bool, AppError>;

    async fn create_section(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        new_section: NewSection,
    ) -> Result<Option<SectionRow>, AppError>;

    async fn get_section(
        &self,
        user_id: Uuid,
        section_id: Uuid,
    ) -> Result<Option<SectionRow>, AppError>;

    async fn update_section(
        &self,
        user_id: Uuid,
        section_id: Uuid,
        patch: &SectionPatch,
    ) -> Result<Option<SectionRow>, AppError>;

    async fn delete_section(&self, user_id: Uuid, section_id: Uuid) -> Result<bool, AppError>;

    /// Writes a batch of `(section_id, position)` assignments atomically and
    /// returns the resume's sections in their new order.
    async fn set_section_positions(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        positions: &[(Uuid, i32)],
    ) -> Result<Option<Vec<SectionRow>>, AppError>;

    /// Looks up a public resume by slug and counts the view.
    async fn view_public_resume(&self, slug: &str)
        -> Result<Option<ResumeWithSections>, AppError>;
}
