use super::ProfileForm;
use super::Settings;
use super::Topic;

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum AdviceKind {
    Ask,
    Simplify,
    Expand,
}

impl AdviceKind {
    /// Instruction appended to the composed prompt.
    pub fn modifier(&self) -> Option<&'static str> {
        match self {
            AdviceKind::Ask => return None,
            AdviceKind::Simplify => {
                return Some(
                    "\n\nSimplify the previous response for a farmer with limited technical knowledge.",
                )
            }
            AdviceKind::Expand => {
                return Some(
                    "\n\nExpand the previous response with more scientific explanation and case studies.",
                )
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct AdviceRequest {
    pub kind: AdviceKind,
    pub query: String,
    pub topic: Topic,
    pub settings: Settings,
}

/// One user-triggered event from the shell.
#[derive(Clone, Debug)]
pub enum Action {
    RequestAdvice(AdviceRequest),
    ClearHistory(),
    SaveProfile(ProfileForm),
    ToggleChecklistItem(String, usize),
}
