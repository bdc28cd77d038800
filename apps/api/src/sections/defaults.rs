//! Starter content for new sections and the section set every new resume gets.

use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::section::{NewSection, SectionKind};

/// Client-side item id, e.g. `exp-1a2b3c4d`.
fn item_id(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &id[..8])
}

/// Title used when a section is created without one: the type with its first
/// character uppercased.
pub fn default_title(section_type: &str) -> String {
    let mut chars = section_type.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

pub fn default_content(kind: &SectionKind) -> Value {
    match kind {
        SectionKind::Profile => json!({
            "fullName": "",
            "email": "",
            "phone": "",
            "location": "",
            "website": "",
            "summary": "",
        }),
        SectionKind::Experience => json!({
            "items": [{
                "id": item_id("exp"),
                "jobTitle": "",
                "employer": "",
                "location": "",
                "startDate": "",
                "endDate": "",
                "current": false,
                "description": "",
            }]
        }),
        SectionKind::Education => json!({
            "items": [{
                "id": item_id("edu"),
                "degree": "",
                "school": "",
                "location": "",
                "startDate": "",
                "endDate": "",
                "current": false,
                "description": "",
            }]
        }),
        SectionKind::Skills => json!({
            "items": [{
                "id": item_id("skill"),
                "name": "",
                "level": 3,
            }]
        }),
        SectionKind::Projects => json!({
            "items": [{
                "id": item_id("proj"),
                "name": "",
                "description": "",
                "url": "",
            }]
        }),
        _ => json!({}),
    }
}

/// The four sections a freshly created resume starts with.
pub fn default_resume_sections() -> Vec<NewSection> {
    [
        (SectionKind::Profile, "Personal Information"),
        (SectionKind::Experience, "Work Experience"),
        (SectionKind::Education, "Education"),
        (SectionKind::Skills, "Skills"),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (kind, title))| NewSection {
        section_type: kind.as_str().to_string(),
        title: title.to_string(),
        content: default_content(&kind),
        position: index as i32 + 1,
        is_visible: true,
    })
    .collect()
}
