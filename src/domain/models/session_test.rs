use super::checklist_key;
use super::SessionState;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::Topic;
use crate::domain::models::ValidationError;

fn state_with_history(len: usize) -> SessionState {
    let mut state = SessionState::default();
    for idx in 0..len {
        if idx % 2 == 0 {
            state
                .conversation_history
                .push(Message::user(&format!("q{idx}")));
        } else {
            state
                .conversation_history
                .push(Message::assistant(&format!("a{idx}")));
        }
    }

    return state;
}

#[test]
fn it_starts_empty() {
    let state = SessionState::default();
    assert!(state.conversation_history.is_empty());
    assert!(state.farmer_profile.is_none());
    assert!(state.checklists.is_empty());
    assert_eq!(state.api_calls_count, 0);
    assert_eq!(state.total_tokens_used, 0);
}

#[test]
fn it_builds_checklist_keys_from_topic_and_history_length() {
    assert_eq!(checklist_key(Topic::Crops, 2), "crops_2");
    assert_eq!(checklist_key(Topic::General, 10), "general_10");
}

#[test]
fn it_returns_whole_history_when_short() {
    let state = state_with_history(4);
    let context = state.history_context();
    assert_eq!(context.len(), 4);
    assert_eq!(context[0].content, "q0");
}

#[test]
fn it_returns_the_last_six_entries() {
    let state = state_with_history(9);
    let context = state.history_context();

    assert_eq!(context.len(), 6);
    assert_eq!(context[0].content, "a3");
    assert_eq!(context[0].role, Role::Assistant);
    assert_eq!(context[5].content, "q8");
}

#[test]
fn it_keeps_toggled_items_when_checklist_is_derived_again() {
    let mut state = SessionState::default();
    state.ensure_checklist("soil_2", 3);
    state.toggle_checklist_item("soil_2", 1).unwrap();

    state.ensure_checklist("soil_2", 3);

    assert_eq!(state.checklists["soil_2"], vec![false, true, false]);
}

#[test]
fn it_toggles_items_back_and_forth() {
    let mut state = SessionState::default();
    state.ensure_checklist("pests_4", 2);

    assert_eq!(state.toggle_checklist_item("pests_4", 0), Ok(true));
    assert_eq!(state.checklist_progress("pests_4"), Some((1, 2)));
    assert_eq!(state.toggle_checklist_item("pests_4", 0), Ok(false));
    assert_eq!(state.checklist_progress("pests_4"), Some((0, 2)));
}

#[test]
fn it_rejects_unknown_checklist_items() {
    let mut state = SessionState::default();
    state.ensure_checklist("pests_4", 2);

    assert_eq!(
        state.toggle_checklist_item("pests_4", 2),
        Err(ValidationError::UnknownChecklistItem {
            key: "pests_4".to_string(),
            index: 2,
        })
    );
    assert!(state.toggle_checklist_item("crops_2", 0).is_err());
    assert_eq!(state.checklist_progress("crops_2"), None);
}

#[test]
fn it_clears_history_and_checklists_only() {
    let mut state = state_with_history(2);
    state.ensure_checklist("crops_2", 1);
    state.api_calls_count = 1;
    state.total_tokens_used = 42;

    state.clear_history();

    assert!(state.conversation_history.is_empty());
    assert!(state.checklists.is_empty());
    assert_eq!(state.api_calls_count, 1);
    assert_eq!(state.total_tokens_used, 42);
}
