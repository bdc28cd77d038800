// Template rendering: pure functions from a resume's sections to a document.
// Grouping and ordering live here; handlers only pick the template and format.

pub mod content;
pub mod dates;
pub mod grouping;
pub mod handlers;
pub mod html;
pub mod templates;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::resume::ResumeWithSections;
use templates::Template;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderFormat {
    #[default]
    Html,
    Text,
    Json,
}

impl RenderFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            RenderFormat::Html => "text/html; charset=utf-8",
            RenderFormat::Text => "text/plain; charset=utf-8",
            RenderFormat::Json => "application/json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            RenderFormat::Html => "html",
            RenderFormat::Text => "txt",
            RenderFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rendered {
    pub format: RenderFormat,
    pub body: String,
}

/// Renders a resume. HTML and text drop hidden sections; JSON is a full data
/// export including hidden sections.
pub fn render(
    resume: &ResumeWithSections,
    template: Template,
    format: RenderFormat,
) -> Result<Rendered, AppError> {
    let body = match format {
        RenderFormat::Html => html::render_html(resume, template),
        RenderFormat::Text => text::render_text(resume, template),
        RenderFormat::Json => serde_json::to_string_pretty(resume)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize resume: {e}")))?,
    };
    Ok(Rendered { format, body })
}
