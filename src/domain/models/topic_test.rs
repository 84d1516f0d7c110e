use strum::IntoEnumIterator;

use super::Topic;

#[test]
fn it_parses_every_topic_key() {
    for topic in Topic::iter() {
        assert_eq!(Topic::parse(&topic.to_string()), topic);
    }
}

#[test]
fn it_parses_keys_with_surrounding_whitespace() {
    assert_eq!(Topic::parse(" irrigation\n"), Topic::Irrigation);
}

#[test]
fn it_falls_back_to_general_for_unknown_keys() {
    assert_eq!(Topic::parse("livestock"), Topic::General);
    assert_eq!(Topic::parse(""), Topic::General);
    assert_eq!(Topic::parse("Crops"), Topic::General);
}

#[test]
fn it_resolves_labels() {
    assert_eq!(Topic::from_label("🐛 Pest Diagnosis"), Some(Topic::Pests));
    assert_eq!(Topic::from_label("Pest Diagnosis"), None);
}

#[test]
fn it_lists_eight_labels_in_menu_order() {
    let labels = Topic::labels();
    assert_eq!(labels.len(), 8);
    assert_eq!(labels[0], "🌱 Crop Guidance");
    assert_eq!(labels[7], "📚 General Advice");
}

#[test]
fn it_has_two_examples_per_topic() {
    for topic in Topic::iter() {
        let examples = topic.examples();
        assert!(examples.iter().all(|e| return !e.is_empty()));
        assert_ne!(examples[0], examples[1]);
    }
}
