#[cfg(test)]
#[path = "topic_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// Farming advice categories. Each routes to its own prompt template.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumVariantNames,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Topic {
    Crops,
    Soil,
    Pests,
    Irrigation,
    Weather,
    Yield,
    Market,
    #[default]
    General,
}

impl Topic {
    /// Resolves a topic key. Anything unrecognised is general advice.
    pub fn parse(key: &str) -> Topic {
        return Topic::iter()
            .find(|e| return e.to_string() == key.trim())
            .unwrap_or_default();
    }

    pub fn from_label(label: &str) -> Option<Topic> {
        return Topic::iter().find(|e| return e.label() == label);
    }

    pub fn label(&self) -> &'static str {
        match self {
            Topic::Crops => return "🌱 Crop Guidance",
            Topic::Soil => return "🌾 Soil & Fertility",
            Topic::Pests => return "🐛 Pest Diagnosis",
            Topic::Irrigation => return "💧 Irrigation Planning",
            Topic::Weather => return "🌦 Weather & Climate Impact",
            Topic::Yield => return "📈 Yield Optimization",
            Topic::Market => return "📦 Market Prices",
            Topic::General => return "📚 General Advice",
        }
    }

    /// Quick queries offered next to the question box.
    pub fn examples(&self) -> [&'static str; 2] {
        match self {
            Topic::Crops => {
                return [
                    "How to increase wheat yield in winter?",
                    "Best practices for organic tomato farming?",
                ]
            }
            Topic::Soil => {
                return [
                    "How to improve soil fertility in black soil?",
                    "How to measure soil pH at home?",
                ]
            }
            Topic::Pests => {
                return [
                    "Why are my chili plants getting curled leaves?",
                    "Diagnosis for cotton bollworm attack?",
                ]
            }
            Topic::Irrigation => {
                return [
                    "How much water does sugarcane need weekly?",
                    "Best drip irrigation layout for 1 acre?",
                ]
            }
            Topic::Weather => {
                return [
                    "How will heavy rainfall affect maize crop?",
                    "Is it safe to spray pesticide before rain?",
                ]
            }
            Topic::Yield => {
                return [
                    "How to increase onion yield?",
                    "Techniques to improve rice productivity.",
                ]
            }
            Topic::Market => {
                return [
                    "What is the current soybean price trend?",
                    "Which crops give best profit this season?",
                ]
            }
            Topic::General => {
                return [
                    "How to start integrated farming?",
                    "Which crop is suitable for my land?",
                ]
            }
        }
    }

    pub fn labels() -> Vec<&'static str> {
        return Topic::iter().map(|e| return e.label()).collect();
    }
}
