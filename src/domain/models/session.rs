#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::collections::BTreeMap;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::FarmerProfile;
use super::Message;
use super::Topic;
use super::ValidationError;

/// Number of most recent history entries sent along with a prompt.
pub const HISTORY_CONTEXT_LEN: usize = 6;

/// Everything remembered between user actions. Lives only as long as the
/// process and is owned by the shell, which hands it to every action.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub conversation_history: Vec<Message>,
    pub farmer_profile: Option<FarmerProfile>,
    pub checklists: BTreeMap<String, Vec<bool>>,
    pub api_calls_count: u64,
    pub total_tokens_used: u64,
}

/// Checklist keys embed the history length at creation. Clearing the history
/// and rebuilding it can produce the same key twice for one topic.
pub fn checklist_key(topic: Topic, history_len: usize) -> String {
    return format!("{topic}_{history_len}");
}

impl SessionState {
    pub fn history_context(&self) -> Vec<Message> {
        let start = self
            .conversation_history
            .len()
            .saturating_sub(HISTORY_CONTEXT_LEN);
        return self.conversation_history[start..].to_vec();
    }

    /// Creates an all-unchecked list for `key` unless one exists already, so
    /// re-deriving a checklist never loses toggled items.
    pub fn ensure_checklist(&mut self, key: &str, len: usize) {
        self.checklists
            .entry(key.to_string())
            .or_insert_with(|| return vec![false; len]);
    }

    pub fn toggle_checklist_item(
        &mut self,
        key: &str,
        index: usize,
    ) -> Result<bool, ValidationError> {
        let item = self
            .checklists
            .get_mut(key)
            .and_then(|items| return items.get_mut(index))
            .ok_or_else(|| {
                return ValidationError::UnknownChecklistItem {
                    key: key.to_string(),
                    index,
                };
            })?;

        *item = !*item;
        return Ok(*item);
    }

    /// Completed and total items for a checklist.
    pub fn checklist_progress(&self, key: &str) -> Option<(usize, usize)> {
        return self.checklists.get(key).map(|items| {
            let completed = items.iter().filter(|done| return **done).count();
            return (completed, items.len());
        });
    }

    pub fn clear_history(&mut self) {
        self.conversation_history.clear();
        self.checklists.clear();
    }
}
