use super::estimate_tokens;
use super::format_count;

#[test]
fn it_estimates_one_and_a_half_tokens_per_word() {
    assert_eq!(estimate_tokens(""), 0);
    assert_eq!(estimate_tokens("water"), 2);
    assert_eq!(estimate_tokens("water the field"), 5);
    assert_eq!(estimate_tokens("water the  field\nevery\tmorning"), 8);
}

#[test]
fn it_counts_words_across_prompt_and_response_boundaries() {
    let prompt = "Question: How much water?";
    let response = "About 25mm.";
    assert_eq!(estimate_tokens(&format!("{prompt}{response}")), 8);
}

#[test]
fn it_formats_counts_with_separators() {
    assert_eq!(format_count(0), "0");
    assert_eq!(format_count(999), "999");
    assert_eq!(format_count(1000), "1,000");
    assert_eq!(format_count(1234567), "1,234,567");
}
