use strum::IntoEnumIterator;

use super::compose;
use super::template;
use crate::domain::models::AdviceKind;
use crate::domain::models::FarmerProfile;
use crate::domain::models::SoilType;
use crate::domain::models::Topic;

fn profile() -> FarmerProfile {
    return FarmerProfile {
        location: "Nashik".to_string(),
        farm_size: "2 acres".to_string(),
        crop_type: "Onion".to_string(),
        soil_type: SoilType::Black,
        updated: "2024-03-09 07:05".to_string(),
    };
}

#[test]
fn it_embeds_the_question_exactly_once_for_every_topic() {
    let question = "How do I keep my onions from rotting after harvest?";
    for topic in Topic::iter() {
        let prompt = compose(topic, question, None, None);
        assert_eq!(prompt.matches(question).count(), 1, "topic {topic}");
        assert!(!prompt.contains("{query}"), "topic {topic}");
    }
}

#[test]
fn it_selects_the_topic_template() {
    for topic in Topic::iter() {
        let prompt = compose(topic, "Q", None, None);
        assert_eq!(prompt, template(topic).replace("{query}", "Q"));
    }

    let market = compose(Topic::Market, "Q", None, None);
    assert!(market.starts_with("You are an agricultural economist."));
    let soil = compose(Topic::Soil, "Q", None, None);
    assert!(soil.starts_with("You are a soil scientist."));
}

#[test]
fn it_uses_a_distinct_template_per_topic() {
    let mut templates = Topic::iter().map(template).collect::<Vec<&str>>();
    templates.sort();
    templates.dedup();
    assert_eq!(templates.len(), 8);
}

#[test]
fn it_falls_back_to_general_for_unknown_keys() {
    let prompt = compose(Topic::parse("aquaculture"), "Q", None, None);
    assert_eq!(prompt, compose(Topic::General, "Q", None, None));
}

#[test]
fn it_keeps_braces_in_questions_verbatim() {
    let prompt = compose(Topic::General, "What does {query} mean?", None, None);
    assert!(prompt.contains("Question: What does {query} mean?"));
}

#[test]
fn it_composes_general_advice() {
    let question = "How to start integrated farming?";
    let prompt = compose(Topic::General, question, None, None);

    insta::assert_snapshot!(prompt.trim(), @r###"
    You are an agriculture expert. Give practical step-by-step farming advice.

    Question: How to start integrated farming?
    "###);
}

#[test]
fn it_appends_the_profile_block() {
    let question = "Which crop suits my land?";
    let prompt = compose(Topic::General, question, Some(&profile()), None);

    let block = [
        "Farmer Profile:",
        "- Location: Nashik",
        "- Farm Size: 2 acres",
        "- Crop: Onion",
        "- Soil Type: Black",
    ]
    .join("\n");
    assert!(prompt.ends_with(&format!("\n\n{block}\n")));
}

#[test]
fn it_appends_the_modifier_after_the_profile() {
    let prompt = compose(
        Topic::Weather,
        "Is it safe to spray pesticide before rain?",
        Some(&profile()),
        AdviceKind::Simplify.modifier(),
    );

    let profile_at = prompt.find("Farmer Profile:").unwrap();
    let modifier_at = prompt.find("Simplify the previous response").unwrap();
    assert!(profile_at < modifier_at);
    let modifier = AdviceKind::Simplify.modifier().unwrap();
    let expected = format!("- Soil Type: Black\n{modifier}");
    assert!(prompt.ends_with(&expected));
    assert!(modifier.ends_with("for a farmer with limited technical knowledge."));
}

#[test]
fn it_appends_the_expand_modifier_verbatim() {
    let prompt = compose(Topic::Yield, "Q", None, AdviceKind::Expand.modifier());
    assert!(prompt.ends_with(
        "\n\nExpand the previous response with more scientific explanation and case studies."
    ));
    assert_eq!(AdviceKind::Ask.modifier(), None);
}
