#[cfg(test)]
#[path = "openrouter_test.rs"]
mod tests;

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::CompletionChunk;
use crate::domain::models::CompletionError;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::HISTORY_CONTEXT_LEN;
use crate::domain::models::SYSTEM_INSTRUCTIONS;

const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 0.9;
const EVENT_PREFIX: &str = "data: ";
const DONE_MARKER: &str = "[DONE]";

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<MessageRequest>,
    temperature: f64,
    top_p: f64,
    max_tokens: u32,
    stream: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionDeltaResponse {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    #[serde(default)]
    delta: Option<CompletionDeltaResponse>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoiceResponse>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionMessageChoiceResponse {
    #[serde(default)]
    message: Option<CompletionMessageResponse>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionMessageListResponse {
    #[serde(default)]
    choices: Vec<CompletionMessageChoiceResponse>,
}

#[derive(Debug, PartialEq, Eq)]
enum StreamLine {
    Delta(String),
    Done,
    Skip,
}

/// Decodes one line of the server-sent event body.
fn parse_stream_line(line: &str) -> Result<StreamLine, CompletionError> {
    let payload = match line.strip_prefix(EVENT_PREFIX) {
        Some(payload) => payload,
        None => return Ok(StreamLine::Skip),
    };

    if payload.trim() == DONE_MARKER {
        return Ok(StreamLine::Done);
    }

    let ores: CompletionResponse = serde_json::from_str(payload)
        .map_err(|err| return CompletionError::MalformedEvent(err.to_string()))?;
    tracing::debug!(body = ?ores, "Completion response");

    let text = ores
        .choices
        .into_iter()
        .next()
        .and_then(|choice| return choice.delta)
        .and_then(|delta| return delta.content)
        .unwrap_or_default();

    if text.is_empty() {
        return Ok(StreamLine::Skip);
    }

    return Ok(StreamLine::Delta(text));
}

fn build_messages(text: &str, history: Option<&[Message]>) -> Vec<MessageRequest> {
    let mut messages = vec![MessageRequest {
        role: "system".to_string(),
        content: SYSTEM_INSTRUCTIONS.to_string(),
    }];

    if let Some(history) = history {
        let start = history.len().saturating_sub(HISTORY_CONTEXT_LEN);
        messages.extend(history[start..].iter().map(|msg| {
            return MessageRequest {
                role: msg.role.to_string(),
                content: msg.content.to_string(),
            };
        }));
    }

    messages.push(MessageRequest {
        role: "user".to_string(),
        content: text.to_string(),
    });

    return messages;
}

fn send_progress(tx: &mpsc::UnboundedSender<Event>, delta: &str, text: &str) {
    let chunk = CompletionChunk {
        delta: delta.to_string(),
        text: text.to_string(),
    };

    if tx.send(Event::CompletionProgress(chunk)).is_err() {
        tracing::debug!("Progress receiver is gone, continuing without updates");
    }
}

pub struct OpenRouter {
    url: String,
    timeout: Option<Duration>,
}

impl Default for OpenRouter {
    fn default() -> OpenRouter {
        let timeout = Config::get(ConfigKey::RequestTimeout)
            .parse::<u64>()
            .ok()
            .filter(|ms| return *ms > 0)
            .map(Duration::from_millis);

        return OpenRouter::new(&Config::get(ConfigKey::ApiURL), timeout);
    }
}

impl OpenRouter {
    pub fn new(url: &str, timeout: Option<Duration>) -> OpenRouter {
        return OpenRouter {
            url: url.trim_end_matches('/').to_string(),
            timeout,
        };
    }

    fn client(&self) -> Result<reqwest::Client, CompletionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        return Ok(builder.build()?);
    }

    async fn read_stream(
        &self,
        res: reqwest::Response,
        tx: &mpsc::UnboundedSender<Event>,
    ) -> Result<String, CompletionError> {
        let stream = res.bytes_stream().map_err(convert_err);
        let mut lines_reader = StreamReader::new(stream).lines();

        let mut full_response = "".to_string();
        loop {
            let line = match lines_reader.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) => {
                    tracing::error!(error = ?err, "Completion stream from OpenRouter was interrupted");
                    return Err(CompletionError::Transport(err.to_string()));
                }
            };

            match parse_stream_line(&line) {
                Ok(StreamLine::Delta(text)) => {
                    full_response += &text;
                    send_progress(tx, &text, &full_response);
                }
                Ok(StreamLine::Done) => break,
                Ok(StreamLine::Skip) => continue,
                Err(err) => {
                    tracing::debug!(error = %err, line = line.as_str(), "Skipping stream line");
                    continue;
                }
            }
        }

        return Ok(full_response);
    }

    async fn read_buffered(
        &self,
        res: reqwest::Response,
        tx: &mpsc::UnboundedSender<Event>,
    ) -> Result<String, CompletionError> {
        let body = res.text().await?;
        let ores: CompletionMessageListResponse = serde_json::from_str(&body)
            .map_err(|err| return CompletionError::ResponseShape(err.to_string()))?;
        tracing::debug!(body = ?ores, "Completion response");

        let text = ores
            .choices
            .into_iter()
            .next()
            .and_then(|choice| return choice.message)
            .and_then(|message| return message.content)
            .ok_or_else(|| {
                return CompletionError::ResponseShape(
                    "choices[0].message.content is missing".to_string(),
                );
            })?;

        send_progress(tx, &text, &text);
        return Ok(text);
    }
}

#[async_trait]
impl Backend for OpenRouter {
    #[allow(clippy::implicit_return)]
    async fn get_completion<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<String, CompletionError> {
        let req = CompletionRequest {
            model: prompt.model.to_string(),
            messages: build_messages(&prompt.text, prompt.history.as_deref()),
            temperature: TEMPERATURE,
            top_p: TOP_P,
            max_tokens: prompt.max_tokens,
            stream: prompt.stream,
        };

        tracing::debug!(
            model = req.model.as_str(),
            messages = req.messages.len(),
            max_tokens = req.max_tokens,
            stream = req.stream,
            "Completion request"
        );

        let res = self
            .client()?
            .post(format!("{url}/api/v1/chat/completions", url = self.url))
            .header("Authorization", format!("Bearer {}", prompt.api_key))
            .header("Content-Type", "application/json")
            .json(&req)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, "OpenRouter is not reachable");
                return CompletionError::from(err);
            })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = body.as_str(),
                "Failed to make completion request to OpenRouter"
            );
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        if prompt.stream {
            return self.read_stream(res, tx).await;
        }

        return self.read_buffered(res, tx).await;
    }
}
