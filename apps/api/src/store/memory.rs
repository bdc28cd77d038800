//! In-memory `ResumeStore` used by handler tests. Mirrors the ownership and
//! ordering rules of the Postgres store.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumePatch, ResumeRow, ResumeSummary, ResumeWithSections};
use crate::models::section::{NewSection, SectionPatch, SectionRow};
use crate::models::user::User;
use crate::sections::ordering::sort_sections;
use crate::store::ResumeStore;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    resumes: Vec<ResumeRow>,
    sections: Vec<SectionRow>,
}

impl Tables {
    fn owned_resume_mut(&mut self, user_id: Uuid, resume_id: Uuid) -> Option<&mut ResumeRow> {
        self.resumes
            .iter_mut()
            .find(|r| r.id == resume_id && r.user_id == user_id)
    }

    fn owns_section(&self, user_id: Uuid, section_id: Uuid) -> Option<usize> {
        let index = self.sections.iter().position(|s| s.id == section_id)?;
        let resume_id = self.sections[index].resume_id;
        self.resumes
            .iter()
            .any(|r| r.id == resume_id && r.user_id == user_id)
            .then_some(index)
    }

    fn touch(&mut self, user_id: Uuid, resume_id: Uuid) -> bool {
        match self.owned_resume_mut(user_id, resume_id) {
            Some(resume) => {
                resume.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    fn sections_for(&self, resume_id: Uuid) -> Vec<SectionRow> {
        let mut sections: Vec<SectionRow> = self
            .sections
            .iter()
            .filter(|s| s.resume_id == resume_id)
            .cloned()
            .collect();
        sort_sections(&mut sections);
        sections
    }

    fn insert_section(&mut self, resume_id: Uuid, section: &NewSection) -> SectionRow {
        let now = Utc::now();
        let row = SectionRow {
            id: Uuid::new_v4(),
            resume_id,
            section_type: section.section_type.clone(),
            title: section.title.clone(),
            content: section.content.clone(),
            position: section.position,
            is_visible: section.is_visible,
            created_at: now,
            updated_at: now,
        };
        self.sections.push(row.clone());
        row
    }
}

#[derive(Default)]
pub struct MemoryResumeStore {
    tables: Mutex<Tables>,
}

impl MemoryResumeStore {
    fn lock(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        self.tables
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("memory store poisoned")))
    }

    /// Number of stored sections across all resumes.
    pub fn section_count(&self) -> usize {
        self.lock().map(|t| t.sections.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn upsert_user(
        &self,
        external_id: &str,
        email: &str,
        name: Option<&str>,
    ) -> Result<User, AppError> {
        let mut tables = self.lock()?;
        if let Some(user) = tables.users.iter_mut().find(|u| u.external_id == external_id) {
            user.email = email.to_string();
            if let Some(name) = name {
                user.name = Some(name.to_string());
            }
            return Ok(user.clone());
        }
        let user = User {
            id: Uuid::new_v4(),
            external_id: external_id.to_string(),
            email: email.to_string(),
            name: name.map(str::to_string),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn list_resumes(&self, user_id: Uuid) -> Result<Vec<ResumeSummary>, AppError> {
        let tables = self.lock()?;
        let mut rows: Vec<&ResumeRow> =
            tables.resumes.iter().filter(|r| r.user_id == user_id).collect();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(rows.into_iter().map(ResumeSummary::from).collect())
    }

    async fn create_resume(&self, new_resume: NewResume) -> Result<ResumeWithSections, AppError> {
        let mut tables = self.lock()?;
        if tables.resumes.iter().any(|r| r.slug == new_resume.slug) {
            return Err(AppError::Validation(format!(
                "Slug '{}' is already taken",
                new_resume.slug
            )));
        }
        let now = Utc::now();
        let resume = ResumeRow {
            id: Uuid::new_v4(),
            user_id: new_resume.user_id,
            title: new_resume.title,
            slug: new_resume.slug,
            template: new_resume.template,
            is_public: new_resume.is_public,
            view_count: 0,
            created_at: now,
            updated_at: now,
        };
        tables.resumes.push(resume.clone());
        for section in &new_resume.sections {
            tables.insert_section(resume.id, section);
        }
        let sections = tables.sections_for(resume.id);
        Ok(ResumeWithSections { resume, sections })
    }

    async fn get_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<ResumeWithSections>, AppError> {
        let tables = self.lock()?;
        let Some(resume) = tables
            .resumes
            .iter()
            .find(|r| r.id == resume_id && r.user_id == user_id)
            .cloned()
        else {
            return Ok(None);
        };
        let sections = tables.sections_for(resume.id);
        Ok(Some(ResumeWithSections { resume, sections }))
    }

    async fn update_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        patch: &ResumePatch,
    ) -> Result<Option<ResumeRow>, AppError> {
        let mut tables = self.lock()?;
        let Some(resume) = tables.owned_resume_mut(user_id, resume_id) else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            resume.title = title.clone();
        }
        if let Some(template) = &patch.template {
            resume.template = template.clone();
        }
        if let Some(is_public) = patch.is_public {
            resume.is_public = is_public;
        }
        resume.updated_at = Utc::now();
        Ok(Some(resume.clone()))
    }

    async fn delete_resume(&self, user_id: Uuid, resume_id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.lock()?;
        if tables.owned_resume_mut(user_id, resume_id).is_none() {
            return Ok(false);
        }
        tables.sections.retain(|s| s.resume_id != resume_id);
        tables.resumes.retain(|r| r.id != resume_id);
        Ok(true)
    }

    async fn create_section(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        new_section: NewSection,
    ) -> Result<Option<SectionRow>, AppError> {
        let mut tables = self.lock()?;
        if !tables.touch(user_id, resume_id) {
            return Ok(None);
        }
        Ok(Some(tables.insert_section(resume_id, &new_section)))
    }

    async fn get_section(
        &self,
        user_id: Uuid,
        section_id: Uuid,
    ) -> Result<Option<SectionRow>, AppError> {
        let tables = self.lock()?;
        Ok(tables
            .owns_section(user_id, section_id)
            .map(|i| tables.sections[i].clone()))
    }

    async fn update_section(
        &self,
        user_id: Uuid,
        section_id: Uuid,
        patch: &SectionPatch,
    ) -> Result<Option<SectionRow>, AppError> {
        let mut tables = self.lock()?;
        let Some(index) = tables.owns_section(user_id, section_id) else {
            return Ok(None);
        };
        let section = &mut tables.sections[index];
        patch.apply_to(section);
        section.updated_at = Utc::now();
        let section = section.clone();
        tables.touch(user_id, section.resume_id);
        Ok(Some(section))
    }

    async fn delete_section(&self, user_id: Uuid, section_id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.lock()?;
        let Some(index) = tables.owns_section(user_id, section_id) else {
            return Ok(false);
        };
        let removed = tables.sections.remove(index);
        tables.touch(user_id, removed.resume_id);
        Ok(true)
    }

    async fn set_section_positions(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        positions: &[(Uuid, i32)],
    ) -> Result<Option<Vec<SectionRow>>, AppError> {
        let mut tables = self.lock()?;
        if !tables.touch(user_id, resume_id) {
            return Ok(None);
        }
        let now = Utc::now();
        for (section_id, position) in positions {
            if let Some(section) = tables
                .sections
                .iter_mut()
                .find(|s| s.id == *section_id && s.resume_id == resume_id)
            {
                section.position = *position;
                section.updated_at = now;
            }
        }
        Ok(Some(tables.sections_for(resume_id)))
    }

    async fn view_public_resume(
        &self,
        slug: &str,
    ) -> Result<Option<ResumeWithSections>, AppError> {
        let mut tables = self.lock()?;
        let Some(resume) = tables
            .resumes
            .iter_mut()
            .find(|r| r.slug == slug && r.is_public)
        else {
            return Ok(None);
        };
        resume.view_count += 1;
        let resume = resume.clone();
        let sections = tables.sections_for(resume.id);
        Ok(Some(ResumeWithSections { resume, sections }))
    }
}
