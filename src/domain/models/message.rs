#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One conversation history entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: &str) -> Message {
        return Message {
            role: Role::User,
            content: content.to_string(),
        };
    }

    pub fn assistant(content: &str) -> Message {
        return Message {
            role: Role::Assistant,
            content: content.to_string(),
        };
    }

    /// First line of the message, shortened for menus.
    pub fn preview(&self, max_len: usize) -> String {
        let line = self.content.trim().split('\n').next().unwrap_or("").trim();
        if line.chars().count() <= max_len {
            return line.to_string();
        }

        let cut = line
            .chars()
            .take(max_len.saturating_sub(3))
            .collect::<String>();
        return format!("{cut}...");
    }
}
