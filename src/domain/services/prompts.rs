#[cfg(test)]
#[path = "prompts_test.rs"]
mod tests;

use crate::domain::models::FarmerProfile;
use crate::domain::models::Topic;

const QUERY_PLACEHOLDER: &str = "{query}";

const CROP_GUIDE: &str = r#"You are an expert agronomist. Provide clear, practical crop-specific guidance.

Question: {query}

Give structured advice including:
1. Ideal climate & soil
2. Seed selection
3. Fertilizer schedule
4. Irrigation planning
5. Pest & disease prevention
6. Expected yield improvements
"#;

const SOIL_GUIDE: &str = r#"You are a soil scientist. Give detailed soil improvement recommendations.

Question: {query}

Include:
- Soil tests needed
- NPK improvement steps
- Organic matter improvement
- pH correction methods
"#;

const PEST_GUIDE: &str = r#"You are an agricultural pest diagnosis expert.

Question: {query}

Provide:
- Pest/disease identification
- Symptoms analysis
- Organic and chemical control
- Preventive measures
"#;

const IRRIGATION_GUIDE: &str = r#"You are an irrigation expert.

Question: {query}

Include:
- Water requirement
- Irrigation frequency
- Drip layout or flood method
- Seasonal adjustments
"#;

const WEATHER_GUIDE: &str = r#"You are a crop-weather scientist.

Question: {query}

Explain:
- Weather impact
- Risk analysis
- What actions to take in next 7 days
"#;

const YIELD_GUIDE: &str = r#"You are a yield optimization agronomist.

Question: {query}

Include:
- Best practices
- Fertilizer plan
- Crop rotation
- Technology integration
"#;

const MARKET_GUIDE: &str = r#"You are an agricultural economist.

Question: {query}

Give insights on:
- Market price trend
- Demand-supply analysis
- What to sell
- Best time to sell
"#;

const GENERAL_GUIDE: &str = r#"You are an agriculture expert. Give practical step-by-step farming advice.

Question: {query}
"#;

pub fn template(topic: Topic) -> &'static str {
    match topic {
        Topic::Crops => return CROP_GUIDE,
        Topic::Soil => return SOIL_GUIDE,
        Topic::Pests => return PEST_GUIDE,
        Topic::Irrigation => return IRRIGATION_GUIDE,
        Topic::Weather => return WEATHER_GUIDE,
        Topic::Yield => return YIELD_GUIDE,
        Topic::Market => return MARKET_GUIDE,
        Topic::General => return GENERAL_GUIDE,
    }
}

pub fn profile_block(profile: &FarmerProfile) -> String {
    return format!(
        "\n\nFarmer Profile:\n- Location: {}\n- Farm Size: {}\n- Crop: {}\n- Soil Type: {}\n",
        profile.location, profile.farm_size, profile.crop_type, profile.soil_type
    );
}

/// Builds the user prompt: the topic template with the question filled in,
/// followed by the farmer profile and the modifier instruction when given.
pub fn compose(
    topic: Topic,
    question: &str,
    profile: Option<&FarmerProfile>,
    modifier: Option<&str>,
) -> String {
    let mut prompt = template(topic).replacen(QUERY_PLACEHOLDER, question, 1);

    if let Some(profile) = profile {
        prompt += &profile_block(profile);
    }

    if let Some(modifier) = modifier {
        prompt += modifier;
    }

    return prompt;
}
