//! Lenient read-only views over free-form section content.
//!
//! Section content is whatever JSON object the editor saved, so every field
//! is optional: missing or mistyped values read as empty. Numbers are
//! accepted where text is expected (a GPA typed as `3.8` still renders).

use serde_json::Value;

pub fn text(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

pub fn flag(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

pub fn list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// The `items` array of list-style sections, if the content has one.
pub fn items(content: &Value) -> Option<&Vec<Value>> {
    content.get("items").and_then(Value::as_array)
}

/// First non-empty text among `keys`.
pub fn first_text(value: &Value, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| text(value, key))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub full_name: String,
    pub headline: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub summary: String,
}

impl Profile {
    pub fn from_content(content: &Value) -> Self {
        Self {
            full_name: text(content, "fullName"),
            headline: text(content, "title"),
            email: text(content, "email"),
            phone: text(content, "phone"),
            location: text(content, "location"),
            website: text(content, "website"),
            summary: text(content, "summary"),
        }
    }

    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            "Your Name"
        } else {
            &self.full_name
        }
    }

    /// Website as shown on the page, without its scheme.
    pub fn website_label(&self) -> &str {
        self.website
            .strip_prefix("https://")
            .or_else(|| self.website.strip_prefix("http://"))
            .unwrap_or(&self.website)
    }

    pub fn website_href(&self) -> String {
        if self.website.starts_with("http") {
            self.website.clone()
        } else {
            format!("https://{}", self.website)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExperienceItem {
    pub job_title: String,
    pub employer: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    pub highlights: Vec<String>,
}

impl ExperienceItem {
    pub fn from_value(v: &Value) -> Self {
        Self {
            job_title: text(v, "jobTitle"),
            employer: text(v, "employer"),
            location: text(v, "location"),
            start_date: text(v, "startDate"),
            end_date: text(v, "endDate"),
            current: flag(v, "current"),
            description: text(v, "description"),
            highlights: list(v, "highlights"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EducationItem {
    pub degree: String,
    pub school: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    pub gpa: String,
}

impl EducationItem {
    pub fn from_value(v: &Value) -> Self {
        Self {
            degree: text(v, "degree"),
            school: text(v, "school"),
            location: text(v, "location"),
            start_date: text(v, "startDate"),
            end_date: text(v, "endDate"),
            current: flag(v, "current"),
            description: text(v, "description"),
            gpa: text(v, "gpa"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectItem {
    pub name: String,
    pub description: String,
    pub url: String,
    pub technologies: Vec<String>,
    pub start_date: String,
    pub end_date: String,
}

impl ProjectItem {
    pub fn from_value(v: &Value) -> Self {
        Self {
            name: text(v, "name"),
            description: text(v, "description"),
            url: text(v, "url"),
            technologies: list(v, "technologies"),
            start_date: text(v, "startDate"),
            end_date: text(v, "endDate"),
        }
    }
}

/// Entry of a section without a dedicated renderer (certifications,
/// publications, volunteer work, languages, custom types).
#[derive(Debug, Clone, Default)]
pub struct GenericItem {
    pub heading: String,
    pub date: String,
    pub source: String,
    pub description: String,
}

impl GenericItem {
    pub fn from_value(v: &Value) -> Self {
        Self {
            heading: first_text(v, &["name", "title", "position"]),
            date: text(v, "date"),
            source: first_text(v, &["issuer", "organization", "publisher", "proficiency"]),
            description: text(v, "description"),
        }
    }
}

/// Skills grouped by category, categories in first-seen order.
/// Uncategorised skills land in "Other"; blank names are skipped.
pub fn skills_by_category(content: &Value) -> Vec<(String, Vec<String>)> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for skill in items(content).into_iter().flatten() {
        let name = text(skill, "name");
        if name.is_empty() {
            continue;
        }
        let mut category = text(skill, "category");
        if category.is_empty() {
            category = "Other".to_string();
        }
        match grouped.iter_mut().find(|(c, _)| *c == category) {
            Some((_, names)) => names.push(name),
            None => grouped.push((category, vec![name])),
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_accepts_numbers_and_missing() {
        let v = json!({"gpa": 3.8, "school": " MIT "});
        assert_eq!(text(&v, "gpa"), "3.8");
        assert_eq!(text(&v, "school"), "MIT");
        assert_eq!(text(&v, "degree"), "");
    }

    #[test]
    fn test_profile_defaults() {
        let profile = Profile::from_content(&json!({"fullName": ""}));
        assert_eq!(profile.display_name(), "Your Name");
    }

    #[test]
    fn test_website_label_and_href() {
        let profile = Profile::from_content(&json!({"website": "https://jane.dev"}));
        assert_eq!(profile.website_label(), "jane.dev");
        assert_eq!(profile.website_href(), "https://jane.dev");

        let bare = Profile::from_content(&json!({"website": "jane.dev"}));
        assert_eq!(bare.website_href(), "https://jane.dev");
    }

    #[test]
    fn test_skills_grouped_with_other_fallback() {
        let content = json!({"items": [
            {"name": "Rust", "category": "Languages"},
            {"name": "Docker"},
            {"name": "Go", "category": "Languages"},
            {"name": ""}
        ]});
        let grouped = skills_by_category(&content);
        assert_eq!(
            grouped,
            vec![
                ("Languages".to_string(), vec!["Rust".to_string(), "Go".to_string()]),
                ("Other".to_string(), vec!["Docker".to_string()]),
            ]
        );
    }

    #[test]
    fn test_generic_item_fallbacks() {
        let item = GenericItem::from_value(&json!({"title": "Paper", "publisher": "ACM"}));
        assert_eq!(item.heading, "Paper");
        assert_eq!(item.source, "ACM");
    }

    #[test]
    fn test_highlights_skip_blank_entries() {
        let item = ExperienceItem::from_value(&json!({"highlights": ["Shipped v2", " ", 4]}));
        assert_eq!(item.highlights, vec!["Shipped v2".to_string()]);
    }
}
