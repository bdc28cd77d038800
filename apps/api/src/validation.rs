//! Request field validation shared by the resume and section handlers.

use serde_json::Value;

use crate::errors::AppError;
use crate::render::templates::Template;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_SECTION_TYPE_LEN: usize = 40;

/// Trims a title and rejects blank or overlong values.
pub fn validate_title(field: &str, title: &str) -> Result<String, AppError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::Validation(format!(
            "{field} must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_template(template: &str) -> Result<Template, AppError> {
    Template::from_id(template)
        .ok_or_else(|| AppError::Validation(format!("Unknown template '{template}'")))
}

/// Section types are lowercase identifiers: `[a-z0-9_]{1,40}`.
pub fn validate_section_type(section_type: &str) -> Result<(), AppError> {
    let valid_chars = section_type
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if section_type.is_empty() || section_type.len() > MAX_SECTION_TYPE_LEN || !valid_chars {
        return Err(AppError::Validation(format!(
            "Invalid section type '{section_type}': use 1-{MAX_SECTION_TYPE_LEN} lowercase letters, digits or underscores"
        )));
    }
    Ok(())
}

pub fn validate_content(content: &Value) -> Result<(), AppError> {
    if !content.is_object() {
        return Err(AppError::Validation(
            "Section content must be a JSON object".to_string(),
        ));
    }
    Ok(())
}
