#![allow(dead_code)]
//! Editor session state.
//!
//! Edits are applied locally first and queued as [`PendingWrite`]s for the
//! client to flush against the section endpoints. Section creation and
//! deletion are confirmed by the server before they touch local state.

use thiserror::Error;
use uuid::Uuid;

use crate::models::resume::{ResumePatch, ResumeWithSections};
use crate::models::section::{SectionKind, SectionPatch, SectionRow};
use crate::sections::defaults::{default_content, default_title};
use crate::sections::handlers::CreateSectionRequest;
use crate::sections::ordering::{next_position, sort_sections, splice_move, OrderingError};

#[derive(Debug, Error, PartialEq)]
pub enum EditorError {
    #[error("section {0} is not part of this resume")]
    UnknownSection(Uuid),
    #[error(transparent)]
    Ordering(#[from] OrderingError),
}

#[derive(Debug, Clone)]
pub enum PendingWrite {
    UpdateResume(ResumePatch),
    UpdateSection { id: Uuid, patch: SectionPatch },
}

#[derive(Debug, Clone)]
pub struct EditorState {
    resume: ResumeWithSections,
    active_section: Option<Uuid>,
    pending: Vec<PendingWrite>,
}

impl EditorState {
    pub fn new(mut resume: ResumeWithSections) -> Self {
        sort_sections(&mut resume.sections);
        let active_section = resume.sections.first().map(|s| s.id);
        Self {
            resume,
            active_section,
            pending: Vec::new(),
        }
    }

    pub fn resume(&self) -> &ResumeWithSections {
        &self.resume
    }

    pub fn sections(&self) -> &[SectionRow] {
        &self.resume.sections
    }

    pub fn active_section(&self) -> Option<Uuid> {
        self.active_section
    }

    fn index_of(&self, id: Uuid) -> Result<usize, EditorError> {
        self.resume
            .sections
            .iter()
            .position(|s| s.id == id)
            .ok_or(EditorError::UnknownSection(id))
    }

    pub fn select(&mut self, id: Uuid) -> Result<(), EditorError> {
        self.index_of(id)?;
        self.active_section = Some(id);
        Ok(())
    }

    pub fn update_resume(&mut self, patch: ResumePatch) {
        if let Some(title) = &patch.title {
            self.resume.resume.title = title.clone();
        }
        if let Some(template) = &patch.template {
            self.resume.resume.template = template.clone();
        }
        if let Some(is_public) = patch.is_public {
            self.resume.resume.is_public = is_public;
        }
        self.pending.push(PendingWrite::UpdateResume(patch));
    }

    pub fn update_section(&mut self, id: Uuid, patch: SectionPatch) -> Result<(), EditorError> {
        let index = self.index_of(id)?;
        patch.apply_to(&mut self.resume.sections[index]);
        self.pending.push(PendingWrite::UpdateSection { id, patch });
        Ok(())
    }

    /// Splice-and-renumber. Only sections whose position actually changed
    /// get a queued write.
    pub fn move_section(&mut self, from: usize, to: usize) -> Result<(), EditorError> {
        splice_move(&mut self.resume.sections, from, to)?;
        for (index, section) in self.resume.sections.iter_mut().enumerate() {
            let position = index as i32;
            if section.position != position {
                section.position = position;
                self.pending.push(PendingWrite::UpdateSection {
                    id: section.id,
                    patch: SectionPatch::position(position),
                });
            }
        }
        Ok(())
    }

    /// Request body for adding a section of `section_type` at the end.
    pub fn draft_section(&self, section_type: &str) -> CreateSectionRequest {
        CreateSectionRequest {
            section_type: section_type.to_string(),
            title: Some(default_title(section_type)),
            content: Some(default_content(&SectionKind::from_type(section_type))),
            position: Some(next_position(&self.resume.sections)),
            is_visible: Some(true),
        }
    }

    /// Appends a section the server has created and makes it active.
    pub fn add_section(&mut self, section: SectionRow) {
        self.active_section = Some(section.id);
        self.resume.sections.push(section);
    }

    /// Drops a section the server has deleted. If it was active, the first
    /// remaining section becomes active.
    pub fn remove_section(&mut self, id: Uuid) -> Result<SectionRow, EditorError> {
        let index = self.index_of(id)?;
        let removed = self.resume.sections.remove(index);
        if self.active_section == Some(id) {
            self.active_section = self.resume.sections.first().map(|s| s.id);
        }
        Ok(removed)
    }

    pub fn take_pending(&mut self) -> Vec<PendingWrite> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }
}
