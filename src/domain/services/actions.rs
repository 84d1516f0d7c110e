#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use tokio::sync::mpsc;

use super::checklist::extract_checklist;
use super::export::export_document;
use super::export::ExportDocument;
use super::prompts;
use super::usage::estimate_tokens;
use crate::domain::models::checklist_key;
use crate::domain::models::Action;
use crate::domain::models::AdviceError;
use crate::domain::models::AdviceKind;
use crate::domain::models::AdviceRequest;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendPrompt;
use crate::domain::models::CompletionError;
use crate::domain::models::Event;
use crate::domain::models::FarmerProfile;
use crate::domain::models::Message;
use crate::domain::models::SessionState;
use crate::domain::models::Topic;
use crate::domain::models::ValidationError;

/// A completed answer and everything derived from it.
#[derive(Clone, Debug)]
pub struct Advice {
    pub kind: AdviceKind,
    pub topic: Topic,
    pub question: String,
    pub answer: String,
    pub checklist: Option<Vec<String>>,
    pub checklist_key: Option<String>,
    pub export: ExportDocument,
}

#[derive(Clone, Debug)]
pub enum Outcome {
    Advice(Advice),
    HistoryCleared(),
    ProfileSaved(FarmerProfile),
    ChecklistItemToggled(String, usize, bool),
}

pub type Transition = (SessionState, Result<Outcome, AdviceError>);

pub struct ActionsService {
    backend: BackendBox,
}

impl ActionsService {
    pub fn new(backend: BackendBox) -> ActionsService {
        return ActionsService { backend };
    }

    /// Applies one user action to the session. Failed actions hand back the
    /// state exactly as it was received.
    pub async fn handle_action(
        &self,
        action: Action,
        state: SessionState,
        tx: &mpsc::UnboundedSender<Event>,
    ) -> Transition {
        match action {
            Action::RequestAdvice(req) => {
                return self.request_advice(req, state, tx).await;
            }
            Action::ClearHistory() => {
                let mut next = state;
                next.clear_history();
                tracing::debug!("Cleared conversation history");
                return (next, Ok(Outcome::HistoryCleared()));
            }
            Action::SaveProfile(form) => {
                let mut next = state;
                let profile = FarmerProfile::from_form(form);
                next.farmer_profile = Some(profile.clone());
                tracing::debug!(updated = profile.updated.as_str(), "Saved farmer profile");
                return (next, Ok(Outcome::ProfileSaved(profile)));
            }
            Action::ToggleChecklistItem(key, index) => {
                let mut next = state;
                match next.toggle_checklist_item(&key, index) {
                    Ok(checked) => {
                        return (next, Ok(Outcome::ChecklistItemToggled(key, index, checked)));
                    }
                    Err(err) => return (next, Err(err.into())),
                }
            }
        }
    }

    async fn request_advice(
        &self,
        req: AdviceRequest,
        state: SessionState,
        tx: &mpsc::UnboundedSender<Event>,
    ) -> Transition {
        if req.query.trim().is_empty() {
            return (state, Err(ValidationError::EmptyQuery.into()));
        }
        let api_key = req.settings.api_key.trim();
        if api_key.is_empty() {
            return (state, Err(ValidationError::MissingApiKey.into()));
        }

        let prompt_text = prompts::compose(
            req.topic,
            &req.query,
            state.farmer_profile.as_ref(),
            req.kind.modifier(),
        );

        let history = if req.settings.include_context {
            Some(state.history_context())
        } else {
            None
        };

        let prompt = BackendPrompt {
            text: prompt_text.to_string(),
            api_key: api_key.to_string(),
            model: req.settings.model,
            max_tokens: req.settings.max_tokens,
            stream: req.settings.streaming,
            history,
        };

        tracing::debug!(
            kind = %req.kind,
            topic = %req.topic,
            model = %req.settings.model,
            "Requesting advice"
        );

        let answer = match self.backend.get_completion(prompt, tx).await {
            Ok(answer) if !answer.is_empty() => answer,
            Ok(_) => return (state, Err(CompletionError::EmptyResponse.into())),
            Err(err) => {
                tracing::error!(error = %err, "Completion failed");
                return (state, Err(err.into()));
            }
        };

        let mut next = state;
        next.api_calls_count += 1;
        next.total_tokens_used += estimate_tokens(&format!("{prompt_text}{answer}"));
        next.conversation_history.push(Message::user(&req.query));
        next.conversation_history.push(Message::assistant(&answer));

        let checklist = extract_checklist(&answer);
        let key = checklist.as_ref().map(|items| {
            let key = checklist_key(req.topic, next.conversation_history.len());
            next.ensure_checklist(&key, items.len());
            return key;
        });

        let export = ExportDocument::new(export_document(
            &req.query,
            &answer,
            req.topic.label(),
            checklist.as_deref(),
        ));

        let advice = Advice {
            kind: req.kind,
            topic: req.topic,
            question: req.query,
            answer,
            checklist,
            checklist_key: key,
            export,
        };

        return (next, Ok(Outcome::Advice(advice)));
    }
}
