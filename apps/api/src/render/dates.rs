use chrono::NaiveDate;

/// Formats an editor date (`2023-01-15` or `2023-01`) as `Jan 2023`.
/// Empty input means an open end date and reads `Present`; anything that
/// does not parse is shown as typed.
pub fn format_month(date: &str) -> String {
    let date = date.trim();
    if date.is_empty() {
        return "Present".to_string();
    }
    parse_date(date)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| date.to_string())
}

pub fn format_date_range(start: &str, end: &str, current: bool) -> String {
    let start = format_month(start);
    let end = if current {
        "Present".to_string()
    } else {
        format_month(end)
    };
    format!("{start} - {end}")
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    // Full ISO timestamps carry the date in their first ten characters.
    let date_part = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{date}-01"), "%Y-%m-%d"))
        .ok()
}
