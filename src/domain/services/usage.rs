#[cfg(test)]
#[path = "usage_test.rs"]
mod tests;

/// Rough token count: one and a half tokens per whitespace separated word.
/// Not a tokenizer, only used for the usage counter.
pub fn estimate_tokens(text: &str) -> u64 {
    let words = text.split_whitespace().count() as f64;
    return (words * 1.5).round() as u64;
}

/// Formats counters with thousands separators, e.g. `12,345`.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut res = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, char) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            res.push(',');
        }
        res.push(char);
    }

    return res;
}
