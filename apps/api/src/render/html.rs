//! HTML layouts. Every interpolated value goes through [`escape`].

use crate::models::resume::ResumeWithSections;
use crate::models::section::{SectionKind, SectionRow};
use crate::render::content::{
    items, skills_by_category, EducationItem, ExperienceItem, GenericItem, Profile, ProjectItem,
};
use crate::render::dates::{format_date_range, format_month};
use crate::render::grouping::{group_sections, SectionGroups};
use crate::render::templates::{Layout, Template};

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a complete standalone HTML document.
pub fn render_html(resume: &ResumeWithSections, template: Template) -> String {
    let groups = group_sections(&resume.sections);

    let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(&resume.resume.title)));
    html.push_str(&format!("<style>{}</style>\n", template.stylesheet()));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<div class=\"resume-template template-{}\">\n",
        template.id()
    ));

    render_header(&mut html, &groups);

    match template.layout() {
        Layout::TwoColumn => {
            html.push_str("<div class=\"resume-body columns\">\n<main class=\"resume-main\">\n");
            render_group(&mut html, &groups, &SectionKind::Experience);
            render_group(&mut html, &groups, &SectionKind::Projects);
            html.push_str("</main>\n<aside class=\"resume-side\">\n");
            render_group(&mut html, &groups, &SectionKind::Skills);
            render_group(&mut html, &groups, &SectionKind::Education);
            render_others(&mut html, &groups);
            html.push_str("</aside>\n</div>\n");
        }
        Layout::SingleColumn => {
            html.push_str("<div class=\"resume-body\">\n<main class=\"resume-main\">\n");
            for kind in [
                SectionKind::Experience,
                SectionKind::Education,
                SectionKind::Skills,
                SectionKind::Projects,
            ] {
                render_group(&mut html, &groups, &kind);
            }
            render_others(&mut html, &groups);
            html.push_str("</main>\n</div>\n");
        }
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_header(html: &mut String, groups: &SectionGroups) {
    let profile = groups
        .profile()
        .map(|s| Profile::from_content(&s.content))
        .unwrap_or_default();

    html.push_str("<header class=\"resume-header\">\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape(profile.display_name())));
    if !profile.headline.is_empty() {
        html.push_str(&format!(
            "<p class=\"headline\">{}</p>\n",
            escape(&profile.headline)
        ));
    }

    let mut contact = Vec::new();
    if !profile.email.is_empty() {
        contact.push(format!(
            "<a href=\"mailto:{0}\">{0}</a>",
            escape(&profile.email)
        ));
    }
    if !profile.phone.is_empty() {
        contact.push(format!("<span>{}</span>", escape(&profile.phone)));
    }
    if !profile.location.is_empty() {
        contact.push(format!("<span>{}</span>", escape(&profile.location)));
    }
    if !profile.website.is_empty() {
        contact.push(format!(
            "<a href=\"{}\" rel=\"noopener noreferrer\">{}</a>",
            escape(&profile.website_href()),
            escape(profile.website_label())
        ));
    }
    if !contact.is_empty() {
        html.push_str(&format!(
            "<div class=\"contact\">{}</div>\n",
            contact.join(" ")
        ));
    }
    if !profile.summary.is_empty() {
        html.push_str(&format!(
            "<p class=\"summary\">{}</p>\n",
            escape(&profile.summary)
        ));
    }
    html.push_str("</header>\n");
}

fn render_group(html: &mut String, groups: &SectionGroups, kind: &SectionKind) {
    for section in groups.get(kind) {
        render_section(html, kind, section);
    }
}

fn render_others(html: &mut String, groups: &SectionGroups) {
    for (kind, sections) in groups.others() {
        for section in sections {
            render_section(html, kind, section);
        }
    }
}

fn section_heading(section: &SectionRow, fallback: &str) -> String {
    let title = section.title.trim();
    escape(if title.is_empty() { fallback } else { title })
}

fn render_section(html: &mut String, kind: &SectionKind, section: &SectionRow) {
    html.push_str(&format!(
        "<section class=\"resume-section section-{}\">\n",
        escape(kind.as_str())
    ));
    match kind {
        SectionKind::Experience => render_experience(html, section),
        SectionKind::Education => render_education(html, section),
        SectionKind::Skills => render_skills(html, section),
        SectionKind::Projects => render_projects(html, section),
        _ => render_generic(html, section),
    }
    html.push_str("</section>\n");
}

fn render_experience(html: &mut String, section: &SectionRow) {
    html.push_str(&format!(
        "<h2>{}</h2>\n",
        section_heading(section, "Professional Experience")
    ));
    for value in items(&section.content).into_iter().flatten() {
        let item = ExperienceItem::from_value(value);
        let title = if item.job_title.is_empty() {
            "Job Title"
        } else {
            item.job_title.as_str()
        };
        html.push_str("<div class=\"resume-item\">\n");
        html.push_str(&format!("<h3>{}</h3>\n", escape(title)));
        let mut employer = escape(&item.employer);
        if !item.location.is_empty() {
            employer.push_str(&format!(" &bull; {}", escape(&item.location)));
        }
        html.push_str(&format!("<div class=\"employer\">{employer}</div>\n"));
        html.push_str(&format!(
            "<div class=\"dates\">{}</div>\n",
            escape(&format_date_range(
                &item.start_date,
                &item.end_date,
                item.current
            ))
        ));
        if !item.description.is_empty() {
            html.push_str(&format!("<p>{}</p>\n", escape(&item.description)));
        }
        if !item.highlights.is_empty() {
            html.push_str("<ul>\n");
            for highlight in &item.highlights {
                html.push_str(&format!("<li>{}</li>\n", escape(highlight)));
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</div>\n");
    }
}

fn render_education(html: &mut String, section: &SectionRow) {
    html.push_str(&format!("<h2>{}</h2>\n", section_heading(section, "Education")));
    for value in items(&section.content).into_iter().flatten() {
        let item = EducationItem::from_value(value);
        html.push_str("<div class=\"resume-item\">\n");
        html.push_str(&format!("<h3>{}</h3>\n", escape(&item.degree)));
        let mut school = escape(&item.school);
        if !item.location.is_empty() {
            school.push_str(&format!(" &bull; {}", escape(&item.location)));
        }
        html.push_str(&format!("<div class=\"school\">{school}</div>\n"));
        html.push_str(&format!(
            "<div class=\"dates\">{}</div>\n",
            escape(&format_date_range(
                &item.start_date,
                &item.end_date,
                item.current
            ))
        ));
        if !item.gpa.is_empty() {
            html.push_str(&format!("<div class=\"gpa\">GPA: {}</div>\n", escape(&item.gpa)));
        }
        if !item.description.is_empty() {
            html.push_str(&format!("<p>{}</p>\n", escape(&item.description)));
        }
        html.push_str("</div>\n");
    }
}

fn render_skills(html: &mut String, section: &SectionRow) {
    html.push_str(&format!("<h2>{}</h2>\n", section_heading(section, "Skills")));
    for (category, names) in skills_by_category(&section.content) {
        html.push_str("<div class=\"skill-group\">\n");
        html.push_str(&format!("<h3>{}</h3>\n", escape(&category)));
        for name in names {
            html.push_str(&format!("<span class=\"tag\">{}</span>\n", escape(&name)));
        }
        html.push_str("</div>\n");
    }
}

fn render_projects(html: &mut String, section: &SectionRow) {
    html.push_str(&format!("<h2>{}</h2>\n", section_heading(section, "Projects")));
    for value in items(&section.content).into_iter().flatten() {
        let item = ProjectItem::from_value(value);
        let name = if item.name.is_empty() {
            "Project Name"
        } else {
            item.name.as_str()
        };
        html.push_str("<div class=\"resume-item\">\n");
        html.push_str(&format!("<h3>{}", escape(name)));
        if !item.url.is_empty() {
            html.push_str(&format!(
                " <a href=\"{}\" rel=\"noopener noreferrer\">(View Project)</a>",
                escape(&item.url)
            ));
        }
        html.push_str("</h3>\n");
        if !item.technologies.is_empty() {
            html.push_str("<div class=\"technologies\">");
            for tech in &item.technologies {
                html.push_str(&format!("<span class=\"tag\">{}</span>", escape(tech)));
            }
            html.push_str("</div>\n");
        }
        if !item.start_date.is_empty() {
            html.push_str(&format!(
                "<div class=\"dates\">{}</div>\n",
                escape(&format_date_range(&item.start_date, &item.end_date, false))
            ));
        }
        if !item.description.is_empty() {
            html.push_str(&format!("<p>{}</p>\n", escape(&item.description)));
        }
        html.push_str("</div>\n");
    }
}

fn render_generic(html: &mut String, section: &SectionRow) {
    html.push_str(&format!("<h2>{}</h2>\n", section_heading(section, "Section")));
    match items(&section.content) {
        Some(values) => {
            for value in values {
                let item = GenericItem::from_value(value);
                let heading = if item.heading.is_empty() {
                    "Item"
                } else {
                    item.heading.as_str()
                };
                html.push_str("<div class=\"resume-item\">\n");
                html.push_str(&format!("<h3>{}", escape(heading)));
                if !item.date.is_empty() {
                    html.push_str(&format!(
                        " <span class=\"date\">{}</span>",
                        escape(&format_month(&item.date))
                    ));
                }
                html.push_str("</h3>\n");
                if !item.source.is_empty() {
                    html.push_str(&format!("<div class=\"source\">{}</div>\n", escape(&item.source)));
                }
                if !item.description.is_empty() {
                    html.push_str(&format!("<p>{}</p>\n", escape(&item.description)));
                }
                html.push_str("</div>\n");
            }
        }
        None => {
            let raw = serde_json::to_string_pretty(&section.content).unwrap_or_default();
            html.push_str(&format!("<pre>{}</pre>\n", escape(&raw)));
        }
    }
}
