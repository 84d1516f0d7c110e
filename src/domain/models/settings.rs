#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

use std::ops::RangeInclusive;

use strum::EnumIter;
use strum::IntoEnumIterator;
use strum::IntoStaticStr;

pub const MAX_TOKENS_RANGE: RangeInclusive<u32> = 500..=3000;
pub const MAX_TOKENS_STEP: u32 = 100;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, IntoStaticStr, strum::Display)]
pub enum ModelName {
    #[default]
    #[strum(to_string = "openai/gpt-4o-mini")]
    Gpt4oMini,
    #[strum(to_string = "openai/gpt-4o")]
    Gpt4o,
    #[strum(to_string = "anthropic/claude-3-5-sonnet")]
    Claude35Sonnet,
    #[strum(to_string = "google/gemini-pro")]
    GeminiPro,
}

impl ModelName {
    pub fn parse(text: &str) -> Option<ModelName> {
        return ModelName::iter().find(|e| return e.to_string() == text);
    }

    pub fn identifiers() -> Vec<&'static str> {
        return ModelName::iter().map(|e| return e.into()).collect();
    }
}

/// Settings snapshot taken when an advice action is triggered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub model: ModelName,
    pub max_tokens: u32,
    pub streaming: bool,
    pub include_context: bool,
}

impl Default for Settings {
    fn default() -> Settings {
        return Settings {
            api_key: "".to_string(),
            model: ModelName::default(),
            max_tokens: DEFAULT_MAX_TOKENS,
            streaming: true,
            include_context: true,
        };
    }
}

/// Format heuristic only, not a credential check.
pub fn validate_api_key_format(key: &str) -> bool {
    return key.chars().count() > 20 && !key.chars().any(|c| return c.is_whitespace());
}

/// Accepts the slider values: 500 to 3000 in steps of 100.
pub fn parse_max_tokens(text: &str) -> Result<u32, String> {
    let value = text
        .trim()
        .parse::<u32>()
        .map_err(|err| return format!("'{text}' is not a number: {err}"))?;

    if !MAX_TOKENS_RANGE.contains(&value) || value % MAX_TOKENS_STEP != 0 {
        return Err(format!(
            "max tokens must be between {} and {} in steps of {MAX_TOKENS_STEP}, got {value}",
            MAX_TOKENS_RANGE.start(),
            MAX_TOKENS_RANGE.end()
        ));
    }

    return Ok(value);
}
