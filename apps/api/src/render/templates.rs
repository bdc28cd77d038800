use serde::{Deserialize, Serialize};

/// Visual templates a resume can be rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    Modern,
    Professional,
    Minimal,
    Creative,
}

/// Column arrangement of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Experience and projects in a wide column; skills, education and the
    /// rest in a side column.
    TwoColumn,
    /// Everything stacked: profile, experience, education, skills, projects, rest.
    SingleColumn,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
}

pub const DEFAULT_TEMPLATE: Template = Template::Modern;

impl Template {
    pub const ALL: [Template; 4] = [
        Template::Modern,
        Template::Professional,
        Template::Minimal,
        Template::Creative,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Template::Modern => "modern",
            Template::Professional => "professional",
            Template::Minimal => "minimal",
            Template::Creative => "creative",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Template to render with; unknown ids fall back to the default.
    pub fn resolve(id: &str) -> Self {
        Self::from_id(id).unwrap_or(DEFAULT_TEMPLATE)
    }

    pub fn layout(&self) -> Layout {
        match self {
            Template::Modern => Layout::TwoColumn,
            _ => Layout::SingleColumn,
        }
    }

    pub fn info(&self) -> TemplateInfo {
        let (name, description) = match self {
            Template::Modern => (
                "Modern",
                "Clean and contemporary design with a two-column layout",
            ),
            Template::Professional => (
                "Professional",
                "Classic and formal design for traditional industries",
            ),
            Template::Minimal => (
                "Minimal",
                "Simple and clean design with maximum readability",
            ),
            Template::Creative => ("Creative", "Modern design with creative elements"),
        };
        TemplateInfo {
            id: self.id(),
            name,
            description,
            category: self.id(),
        }
    }

    pub fn stylesheet(&self) -> &'static str {
        match self {
            Template::Modern => {
                "body{font-family:Inter,sans-serif;color:#1f2937}\
                 .resume-header{text-align:center}\
                 .columns{display:grid;grid-template-columns:2fr 1fr;gap:2rem}\
                 h2{border-bottom:2px solid #e0e7ff}\
                 .tag{background:#e0e7ff;color:#3730a3;border-radius:9999px;padding:0 .5rem}"
            }
            Template::Professional => {
                "body{font-family:Georgia,serif;color:#111827}\
                 h2{text-transform:uppercase;letter-spacing:.05em;border-bottom:1px solid #111827}"
            }
            Template::Minimal => {
                "body{font-family:Helvetica,Arial,sans-serif;color:#374151;max-width:48rem;margin:auto}\
                 h2{font-weight:500}"
            }
            Template::Creative => {
                "body{font-family:Poppins,sans-serif;color:#1e1b4b}\
                 .resume-header{background:#4f46e5;color:#fff;padding:2rem}\
                 h2{color:#db2777}"
            }
        }
    }
}

pub fn catalogue() -> Vec<TemplateInfo> {
    Template::ALL.iter().map(Template::info).collect()
}
