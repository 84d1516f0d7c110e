/// Progress of an in-flight completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionChunk {
    /// Text added by this event.
    pub delta: String,
    /// Everything received so far, including `delta`.
    pub text: String,
}

pub enum Event {
    CompletionProgress(CompletionChunk),
}
