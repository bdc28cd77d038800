//! Construction of insert payloads for new and duplicated resumes.

use uuid::Uuid;

use crate::models::resume::{NewResume, ResumeWithSections};
use crate::models::section::NewSection;
use crate::render::templates::Template;
use crate::resumes::slug::unique_slug;
use crate::sections::defaults::default_resume_sections;

pub const DEFAULT_TITLE: &str = "Untitled Resume";

/// A fresh private resume pre-populated with the default sections.
pub fn new_resume(user_id: Uuid, title: String, template: Template) -> NewResume {
    NewResume {
        user_id,
        slug: unique_slug(&title),
        title,
        template: template.id().to_string(),
        is_public: false,
        sections: default_resume_sections(),
    }
}

/// Deep copy of `original` for `user_id`. The copy is private, gets a new
/// slug and `" (Copy)"` title, and every section is carried over with the
/// same type, title, content, position and visibility. Fresh ids are
/// assigned on insert.
pub fn duplicate_of(user_id: Uuid, original: &ResumeWithSections) -> NewResume {
    let title = format!("{} (Copy)", original.resume.title);
    NewResume {
        user_id,
        slug: unique_slug(&title),
        title,
        template: original.resume.template.clone(),
        is_public: false,
        sections: original.sections.iter().map(NewSection::from).collect(),
    }
}
