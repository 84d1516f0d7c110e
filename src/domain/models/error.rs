use thiserror::Error;

/// Input problems caught before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a question.")]
    EmptyQuery,

    #[error("Please enter your API key.")]
    MissingApiKey,

    #[error("No checklist item {index} for {key}.")]
    UnknownChecklistItem { key: String, index: usize },
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Error communicating with API: {0}")]
    Transport(String),

    #[error("API Error: {status} - {body}")]
    Upstream { status: u16, body: String },

    #[error("Unexpected response from API: {0}")]
    ResponseShape(String),

    /// A single streamed event that could not be decoded. Skipped by the
    /// stream reader, never returned from a completion.
    #[error("Malformed stream event: {0}")]
    MalformedEvent(String),

    #[error("The model returned an empty response.")]
    EmptyResponse,
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> CompletionError {
        return CompletionError::Transport(err.to_string());
    }
}

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}
