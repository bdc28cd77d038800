use crate::models::resume::ResumeWithSections;
use crate::models::section::{SectionKind, SectionRow};
use crate::render::content::{
    items, skills_by_category, EducationItem, ExperienceItem, GenericItem, Profile, ProjectItem,
};
use crate::render::dates::{format_date_range, format_month};
use crate::render::grouping::group_sections;
use crate::render::templates::{Layout, Template};

/// Plain-text rendering. Uses the template's section order but ignores styling.
pub fn render_text(resume: &ResumeWithSections, template: Template) -> String {
    let groups = group_sections(&resume.sections);
    let mut out = String::new();

    let profile = groups
        .profile()
        .map(|s| Profile::from_content(&s.content))
        .unwrap_or_default();
    out.push_str(&format!("{}\n", profile.display_name().to_uppercase()));
    if !profile.headline.is_empty() {
        out.push_str(&format!("{}\n", profile.headline));
    }
    let contact: Vec<&str> = [
        profile.email.as_str(),
        profile.phone.as_str(),
        profile.location.as_str(),
        profile.website_label(),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect();
    if !contact.is_empty() {
        out.push_str(&format!("{}\n", contact.join(" | ")));
    }
    if !profile.summary.is_empty() {
        out.push_str(&format!("\n{}\n", profile.summary));
    }

    let order = match template.layout() {
        Layout::TwoColumn => [
            SectionKind::Experience,
            SectionKind::Projects,
            SectionKind::Skills,
            SectionKind::Education,
        ],
        Layout::SingleColumn => [
            SectionKind::Experience,
            SectionKind::Education,
            SectionKind::Skills,
            SectionKind::Projects,
        ],
    };
    for kind in &order {
        for section in groups.get(kind) {
            render_section(&mut out, kind, section);
        }
    }
    for (kind, sections) in groups.others() {
        for section in sections {
            render_section(&mut out, kind, section);
        }
    }
    out
}

fn heading(out: &mut String, section: &SectionRow, fallback: &str) {
    let title = section.title.trim();
    let title = if title.is_empty() { fallback } else { title };
    out.push_str(&format!("\n{}\n{}\n", title.to_uppercase(), "-".repeat(title.chars().count())));
}

fn render_section(out: &mut String, kind: &SectionKind, section: &SectionRow) {
    match kind {
        SectionKind::Experience => {
            heading(out, section, "Professional Experience");
            for value in items(&section.content).into_iter().flatten() {
                let item = ExperienceItem::from_value(value);
                let mut line = item.job_title.clone();
                if !item.employer.is_empty() {
                    line.push_str(&format!(", {}", item.employer));
                }
                if !item.location.is_empty() {
                    line.push_str(&format!(" ({})", item.location));
                }
                out.push_str(&format!(
                    "{line}\n{}\n",
                    format_date_range(&item.start_date, &item.end_date, item.current)
                ));
                if !item.description.is_empty() {
                    out.push_str(&format!("{}\n", item.description));
                }
                for highlight in &item.highlights {
                    out.push_str(&format!("  * {highlight}\n"));
                }
            }
        }
        SectionKind::Education => {
            heading(out, section, "Education");
            for value in items(&section.content).into_iter().flatten() {
                let item = EducationItem::from_value(value);
                let mut line = format!("{}, {}", item.degree, item.school);
                if !item.location.is_empty() {
                    line.push_str(&format!(" ({})", item.location));
                }
                out.push_str(&format!(
                    "{line}\n{}\n",
                    format_date_range(&item.start_date, &item.end_date, item.current)
                ));
                if !item.gpa.is_empty() {
                    out.push_str(&format!("GPA: {}\n", item.gpa));
                }
            }
        }
        SectionKind::Skills => {
            heading(out, section, "Skills");
            for (category, names) in skills_by_category(&section.content) {
                out.push_str(&format!("{category}: {}\n", names.join(", ")));
            }
        }
        SectionKind::Projects => {
            heading(out, section, "Projects");
            for value in items(&section.content).into_iter().flatten() {
                let item = ProjectItem::from_value(value);
                out.push_str(&format!("{}\n", item.name));
                if !item.technologies.is_empty() {
                    out.push_str(&format!("{}\n", item.technologies.join(", ")));
                }
                if !item.url.is_empty() {
                    out.push_str(&format!("{}\n", item.url));
                }
                if !item.description.is_empty() {
                    out.push_str(&format!("{}\n", item.description));
                }
            }
        }
        _ => {
            heading(out, section, "Section");
            for value in items(&section.content).into_iter().flatten() {
                let item = GenericItem::from_value(value);
                let mut line = item.heading.clone();
                if !item.date.is_empty() {
                    line.push_str(&format!(" ({})", format_month(&item.date)));
                }
                if !item.source.is_empty() {
                    line.push_str(&format!(" - {}", item.source));
                }
                out.push_str(&format!("{line}\n"));
                if !item.description.is_empty() {
                    out.push_str(&format!("{}\n", item.description));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeRow;
    use chrono::Utc;
    use serde_json::{json, Value};
    use uuid::Uuid;

    fn section(section_type: &str, title: &str, position: i32, content: Value) -> SectionRow {
        SectionRow {
            id: Uuid::new_v4(),
            resume_id: Uuid::nil(),
            section_type: section_type.to_string(),
            title: title.to_string(),
            content,
            position,
            is_visible: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn resume(sections: Vec<SectionRow>) -> ResumeWithSections {
        ResumeWithSections {
            resume: ResumeRow {
                id: Uuid::nil(),
                user_id: Uuid::nil(),
                title: "CV".to_string(),
                slug: "cv-0000".to_string(),
                template: "minimal".to_string(),
                is_public: false,
                view_count: 0,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            sections,
        }
    }

    #[test]
    fn test_text_output() {
        let text = render_text(
            &resume(vec![
                section(
                    "profile",
                    "Personal Information",
                    1,
                    json!({"fullName": "Jane Doe", "email": "jane@example.com", "phone": "555"}),
                ),
                section(
                    "experience",
                    "Work Experience",
                    2,
                    json!({"items": [{"jobTitle": "Engineer", "employer": "Acme", "startDate": "2019-05-01", "endDate": "2021-02-01", "highlights": ["Cut costs 20%"]}]}),
                ),
                section(
                    "skills",
                    "Skills",
                    3,
                    json!({"items": [{"name": "Rust", "category": "Languages"}, {"name": "SQL", "category": "Languages"}]}),
                ),
            ]),
            Template::Minimal,
        );
        assert!(text.starts_with("JANE DOE\njane@example.com | 555\n"));
        assert!(text.contains("WORK EXPERIENCE\n---------------\n"));
        assert!(text.contains("Engineer, Acme\nMay 2019 - Feb 2021\n"));
        assert!(text.contains("  * Cut costs 20%\n"));
        assert!(text.contains("Languages: Rust, SQL\n"));
    }

    #[test]
    fn test_education_location_in_text() {
        let text = render_text(
            &resume(vec![section(
                "education",
                "Education",
                1,
                json!({"items": [{"degree": "BSc", "school": "MIT", "location": "Cambridge", "startDate": "2015-09-01", "endDate": "2019-06-01"}]}),
            )]),
            Template::Minimal,
        );
        assert!(text.contains("BSc, MIT (Cambridge)\nSep 2015 - Jun 2019\n"));
    }

    #[test]
    fn test_generic_items_in_text() {
        let text = render_text(
            &resume(vec![section(
                "languages",
                "Languages",
                1,
                json!({"items": [{"name": "French", "proficiency": "Fluent"}]}),
            )]),
            Template::Modern,
        );
        assert!(text.contains("French - Fluent\n"));
    }
}
