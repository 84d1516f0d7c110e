#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;

use std::io::Write;
use std::path;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use dialoguer::Input;
use dialoguer::Password;
use dialoguer::Select;
use owo_colors::OwoColorize;
use strum::IntoEnumIterator;
use tokio::fs;
use tokio::sync::mpsc;
use tokio::task;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::parse_max_tokens;
use crate::domain::models::validate_api_key_format;
use crate::domain::models::Action;
use crate::domain::models::AdviceError;
use crate::domain::models::AdviceKind;
use crate::domain::models::AdviceRequest;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::ModelName;
use crate::domain::models::ProfileForm;
use crate::domain::models::Role;
use crate::domain::models::SessionState;
use crate::domain::models::Settings;
use crate::domain::models::SoilType;
use crate::domain::models::Topic;
use crate::domain::models::ValidationError;
use crate::domain::services::usage::format_count;
use crate::domain::services::ActionsService;
use crate::domain::services::Advice;
use crate::domain::services::Outcome;

const HISTORY_PREVIEW_LEN: usize = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter)]
enum MenuItem {
    #[strum(to_string = "Get Advice")]
    GetAdvice,
    #[strum(to_string = "Simplify last answer")]
    Simplify,
    #[strum(to_string = "Expand last answer")]
    Expand,
    #[strum(to_string = "Change topic")]
    ChangeTopic,
    #[strum(to_string = "Toggle checklist item")]
    ToggleChecklist,
    #[strum(to_string = "Farmer profile")]
    Profile,
    #[strum(to_string = "Conversation history")]
    History,
    #[strum(to_string = "Clear history")]
    ClearHistory,
    #[strum(to_string = "Download markdown")]
    Download,
    #[strum(to_string = "Settings")]
    Settings,
    #[strum(to_string = "Quit")]
    Quit,
}

pub fn format_usage(state: &SessionState) -> String {
    return format!(
        "API Calls: {} | Tokens Used: {}",
        format_count(state.api_calls_count),
        format_count(state.total_tokens_used)
    );
}

fn checklist_lines(items: &[String], state: &SessionState, key: &str) -> Vec<String> {
    let checked = state.checklists.get(key).cloned().unwrap_or_default();
    return items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let mark = if checked.get(idx).copied().unwrap_or(false) {
                "x"
            } else {
                " "
            };
            return format!("[{mark}] {item}");
        })
        .collect();
}

/// Renders a checklist with its toggle states from the session and a
/// progress line.
pub fn format_checklist(items: &[String], state: &SessionState, key: &str) -> String {
    let mut lines = checklist_lines(items, state, key);

    let (completed, total) = state.checklist_progress(key).unwrap_or((0, items.len()));
    lines.push(format!("Progress: {completed}/{total} completed"));

    return lines.join("\n");
}

pub fn format_history(history: &[Message]) -> String {
    if history.is_empty() {
        return "No conversation yet.".to_string();
    }

    return history
        .iter()
        .map(|msg| {
            let who = match msg.role {
                Role::User => "You",
                Role::Assistant => "AgriSmart",
            };
            return format!("{who}: {}", msg.preview(HISTORY_PREVIEW_LEN));
        })
        .collect::<Vec<String>>()
        .join("\n");
}

async fn print_progress(mut rx: mpsc::UnboundedReceiver<Event>) {
    let mut stdout = std::io::stdout();
    while let Some(event) = rx.recv().await {
        match event {
            Event::CompletionProgress(chunk) => {
                let _ = write!(stdout, "{}", chunk.delta);
                let _ = stdout.flush();
            }
        }
    }
}

pub struct Shell {
    service: ActionsService,
    state: SessionState,
    settings: Settings,
    topic: Topic,
    last_advice: Option<Advice>,
    theme: ColorfulTheme,
}

impl Shell {
    pub fn new(service: ActionsService) -> Shell {
        return Shell {
            service,
            state: SessionState::default(),
            settings: Config::settings(),
            topic: Topic::parse(&Config::get(ConfigKey::Topic)),
            last_advice: None,
            theme: ColorfulTheme::default(),
        };
    }

    /// Runs the interactive loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let title = "🌾 AgriSmart: AI-Powered Farming Advisor";
        println!("{}", title.green().bold());
        println!("Ask about crops, soil, pests, irrigation and more.\n");

        if self.settings.api_key.is_empty() {
            self.prompt_api_key()?;
        }

        loop {
            println!("\n{} {}", "Topic:".bold(), self.topic.label());
            println!("{}", format_usage(&self.state).dimmed());

            let items = MenuItem::iter().collect::<Vec<MenuItem>>();
            let idx = match Select::with_theme(&self.theme)
                .with_prompt("What would you like to do?")
                .default(0)
                .items(&items)
                .interact_opt()?
            {
                Some(idx) => idx,
                None => break,
            };

            match items[idx] {
                MenuItem::GetAdvice => self.get_advice().await?,
                MenuItem::Simplify => self.follow_up(AdviceKind::Simplify).await?,
                MenuItem::Expand => self.follow_up(AdviceKind::Expand).await?,
                MenuItem::ChangeTopic => self.change_topic()?,
                MenuItem::ToggleChecklist => self.toggle_checklist().await?,
                MenuItem::Profile => self.edit_profile().await?,
                MenuItem::History => self.show_history(),
                MenuItem::ClearHistory => self.dispatch(Action::ClearHistory()).await?,
                MenuItem::Download => self.download().await?,
                MenuItem::Settings => self.edit_settings()?,
                MenuItem::Quit => break,
            }
        }

        return Ok(());
    }

    /// Hands one action to the orchestrator, printing streamed text while it
    /// runs, then renders the outcome.
    async fn dispatch(&mut self, action: Action) -> Result<()> {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        let printer = task::spawn(print_progress(rx));

        let state = std::mem::take(&mut self.state);
        let (next, outcome) = self.service.handle_action(action, state, &tx).await;
        self.state = next;

        drop(tx);
        printer.await?;

        match outcome {
            Ok(Outcome::Advice(advice)) => {
                println!();
                self.render_advice(&advice);
                self.last_advice = Some(advice);
            }
            Ok(Outcome::HistoryCleared()) => {
                self.last_advice = None;
                println!("{}", "Conversation history cleared.".green());
            }
            Ok(Outcome::ProfileSaved(profile)) => {
                let saved = format!("Profile saved ({}).", profile.updated);
                println!("{}", saved.green());
            }
            Ok(Outcome::ChecklistItemToggled(key, _, _)) => {
                if let Some(items) = self
                    .last_advice
                    .as_ref()
                    .and_then(|advice| return advice.checklist.as_ref())
                {
                    println!("{}", format_checklist(items, &self.state, &key));
                }
            }
            Err(AdviceError::Validation(err)) => {
                println!("{}", format!("⚠ {err}").yellow());
            }
            Err(AdviceError::Completion(err)) => {
                println!();
                println!("{}", format!("❌ {err}").red());
            }
        }

        return Ok(());
    }

    fn show_history(&self) {
        println!("{}", format_history(&self.state.conversation_history));
    }

    fn render_advice(&self, advice: &Advice) {
        let headline = match advice.kind {
            AdviceKind::Ask => "✅ Advice ready",
            AdviceKind::Simplify => "✅ Simplified",
            AdviceKind::Expand => "✅ Expanded",
        };
        println!("\n{}", headline.green());

        if let (Some(items), Some(key)) = (&advice.checklist, &advice.checklist_key) {
            println!("\n{}", "Action Checklist".bold());
            println!("{}", format_checklist(items, &self.state, key));
        }
    }

    async fn get_advice(&mut self) -> Result<()> {
        let examples = self.topic.examples();
        let choices = vec!["Type my own question", examples[0], examples[1]];
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Question")
            .default(0)
            .items(&choices)
            .interact()?;

        let query = if choice == 0 {
            Input::<String>::with_theme(&self.theme)
                .with_prompt("Ask your farming question")
                .allow_empty(true)
                .interact_text()?
        } else {
            choices[choice].to_string()
        };

        return self.request(AdviceKind::Ask, query).await;
    }

    async fn follow_up(&mut self, kind: AdviceKind) -> Result<()> {
        let query = match &self.last_advice {
            Some(advice) => advice.question.to_string(),
            None => "".to_string(),
        };

        return self.request(kind, query).await;
    }

    async fn request(&mut self, kind: AdviceKind, query: String) -> Result<()> {
        if !query.trim().is_empty() {
            println!("{}", "🌱 Generating farming advice...".dimmed());
        }

        let action = Action::RequestAdvice(AdviceRequest {
            kind,
            query,
            topic: self.topic,
            settings: self.settings.clone(),
        });

        return self.dispatch(action).await;
    }

    fn change_topic(&mut self) -> Result<()> {
        let labels = Topic::labels();
        let current = Topic::iter()
            .position(|e| return e == self.topic)
            .unwrap_or_default();

        if let Some(idx) = Select::with_theme(&self.theme)
            .with_prompt("Select Farming Topic")
            .default(current)
            .items(&labels)
            .interact_opt()?
        {
            self.topic = Topic::from_label(labels[idx]).unwrap_or_default();
        }

        return Ok(());
    }

    async fn toggle_checklist(&mut self) -> Result<()> {
        let (items, key) = match &self.last_advice {
            Some(Advice {
                checklist: Some(items),
                checklist_key: Some(key),
                ..
            }) => (items.clone(), key.to_string()),
            _ => {
                println!("{}", "The last answer has no checklist.".yellow());
                return Ok(());
            }
        };

        let labels = checklist_lines(&items, &self.state, &key);

        if let Some(idx) = Select::with_theme(&self.theme)
            .with_prompt("Toggle which item?")
            .items(&labels)
            .interact_opt()?
        {
            self.dispatch(Action::ToggleChecklistItem(key, idx)).await?;
        }

        return Ok(());
    }

    async fn edit_profile(&mut self) -> Result<()> {
        let current = match &self.state.farmer_profile {
            Some(profile) => {
                println!(
                    "Location: {}\nFarm Size: {}\nCrop: {}\nSoil Type: {}\nUpdated: {}",
                    profile.location,
                    profile.farm_size,
                    profile.crop_type,
                    profile.soil_type,
                    profile.updated
                );
                ProfileForm {
                    location: profile.location.to_string(),
                    farm_size: profile.farm_size.to_string(),
                    crop_type: profile.crop_type.to_string(),
                    soil_type: profile.soil_type,
                }
            }
            None => ProfileForm::default(),
        };

        let location = Input::<String>::with_theme(&self.theme)
            .with_prompt("Location")
            .with_initial_text(&current.location)
            .allow_empty(true)
            .interact_text()?;
        let farm_size = Input::<String>::with_theme(&self.theme)
            .with_prompt("Farm Size (acres)")
            .with_initial_text(&current.farm_size)
            .allow_empty(true)
            .interact_text()?;
        let crop_type = Input::<String>::with_theme(&self.theme)
            .with_prompt("Main Crop")
            .with_initial_text(&current.crop_type)
            .allow_empty(true)
            .interact_text()?;

        let soil_types = SoilType::iter().collect::<Vec<SoilType>>();
        let soil_default = soil_types
            .iter()
            .position(|e| return *e == current.soil_type)
            .unwrap_or_default();
        let soil_idx = Select::with_theme(&self.theme)
            .with_prompt("Soil Type")
            .default(soil_default)
            .items(&soil_types)
            .interact()?;

        let form = ProfileForm {
            location,
            farm_size,
            crop_type,
            soil_type: soil_types[soil_idx],
        };

        return self.dispatch(Action::SaveProfile(form)).await;
    }

    async fn download(&self) -> Result<()> {
        let advice = match &self.last_advice {
            Some(advice) => advice,
            None => {
                println!("{}", "There is no answer to download yet.".yellow());
                return Ok(());
            }
        };

        let export_path = path::PathBuf::from(&advice.export.file_name);
        fs::write(&export_path, advice.export.body.as_bytes()).await?;
        tracing::debug!(
            path = export_path.to_string_lossy().as_ref(),
            mime_type = advice.export.mime_type.as_str(),
            "Wrote export"
        );

        let saved = format!("📥 Saved {}", export_path.to_string_lossy());
        println!("{}", saved.green());

        return Ok(());
    }

    fn prompt_api_key(&mut self) -> Result<()> {
        let api_key = Password::with_theme(&self.theme)
            .with_prompt("OpenRouter API Key")
            .allow_empty_password(true)
            .interact()?;

        let api_key = api_key.trim();
        if !api_key.is_empty() {
            self.settings.api_key = api_key.to_string();
        }

        if self.settings.api_key.is_empty() {
            let warning = format!("⚠ {}", ValidationError::MissingApiKey);
            println!("{}", warning.yellow());
        } else if !validate_api_key_format(&self.settings.api_key) {
            let warning = "⚠ That doesn't look like a valid OpenRouter key.";
            println!("{}", warning.yellow());
        }

        return Ok(());
    }

    fn edit_settings(&mut self) -> Result<()> {
        self.prompt_api_key()?;

        let models = ModelName::identifiers();
        let current = ModelName::iter()
            .position(|e| return e == self.settings.model)
            .unwrap_or_default();
        let model_idx = Select::with_theme(&self.theme)
            .with_prompt("Select AI Model")
            .default(current)
            .items(&models)
            .interact()?;
        self.settings.model = ModelName::parse(models[model_idx]).unwrap_or_default();

        let max_tokens = Input::<String>::with_theme(&self.theme)
            .with_prompt("Max Response Length")
            .with_initial_text(self.settings.max_tokens.to_string())
            .validate_with(|input: &String| {
                return parse_max_tokens(input).map(|_| return ());
            })
            .interact_text()?;
        if let Ok(max_tokens) = parse_max_tokens(&max_tokens) {
            self.settings.max_tokens = max_tokens;
        }

        self.settings.streaming = Confirm::with_theme(&self.theme)
            .with_prompt("Enable Streaming?")
            .default(self.settings.streaming)
            .interact()?;
        self.settings.include_context = Confirm::with_theme(&self.theme)
            .with_prompt("Include Conversation Context?")
            .default(self.settings.include_context)
            .interact()?;

        return Ok(());
    }
}
