use uuid::Uuid;

/// URL-friendly form of a title: `"My Resume 2023"` → `"my-resume-2023"`.
/// Whitespace runs become a dash, anything outside `[a-z0-9_-]` is dropped,
/// repeated dashes collapse and edge dashes are trimmed.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            slug.push(c);
        }
    }

    let mut collapsed = String::with_capacity(slug.len());
    for c in slug.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed.trim_matches('-').to_string()
}

/// Slug for a new resume: the slugified title plus a short random suffix.
pub fn unique_slug(title: &str) -> String {
    let mut base = slugify(title);
    if base.is_empty() {
        base = "resume".to_string();
    }
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{base}-{}", &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("My Resume 2023"), "my-resume-2023");
    }

    #[test]
    fn test_slugify_strips_punctuation_and_collapses() {
        assert_eq!(slugify("  Senior -- Engineer (Backend)!  "), "senior-engineer-backend");
        assert_eq!(slugify("Jane's CV"), "janes-cv");
    }

    #[test]
    fn test_slugify_non_ascii_removed() {
        assert_eq!(slugify("Résumé"), "rsum");
        assert_eq!(slugify("履歴書"), "");
    }

    #[test]
    fn test_unique_slug_has_suffix() {
        let slug = unique_slug("My Resume");
        assert!(slug.starts_with("my-resume-"));
        assert_eq!(slug.len(), "my-resume-".len() + 8);
        assert_ne!(unique_slug("My Resume"), slug);
    }

    #[test]
    fn test_unique_slug_for_empty_title() {
        assert!(unique_slug("!!!").starts_with("resume-"));
    }
}
