#[cfg(test)]
#[path = "checklist_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use regex::Regex;

const MAX_BULLET_ITEMS: usize = 10;

static CHECKBOX_RE: Lazy<Regex> = Lazy::new(|| return Regex::new(r"- \[ \] (.+)").unwrap());
static BULLET_RE: Lazy<Regex> = Lazy::new(|| return Regex::new(r"(?m)^[ \t]*[-•] (.+)").unwrap());

fn captures(re: &Regex, text: &str) -> Vec<String> {
    return re
        .captures_iter(text)
        .map(|c| return c[1].to_string())
        .collect();
}

/// Pulls actionable steps out of a response. Unchecked markdown checkboxes
/// win; without any, the first bullet points are used instead.
pub fn extract_checklist(text: &str) -> Option<Vec<String>> {
    let checkboxes = captures(&CHECKBOX_RE, text);
    if !checkboxes.is_empty() {
        return Some(checkboxes);
    }

    let bullets = captures(&BULLET_RE, text)
        .into_iter()
        .take(MAX_BULLET_ITEMS)
        .collect::<Vec<String>>();
    if bullets.is_empty() {
        return None;
    }

    return Some(bullets);
}
