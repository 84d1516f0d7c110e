#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

#[cfg(target_os = "macos")]
use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::parse_max_tokens;
use crate::domain::models::ModelName;
use crate::domain::models::Settings;
use crate::domain::models::Topic;
use crate::domain::models::DEFAULT_MAX_TOKENS;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiKey,
    ApiURL,
    ConfigFile,
    IncludeContext,
    MaxTokens,
    Model,
    RequestTimeout,
    Streaming,
    Topic,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn get_bool(key: ConfigKey) -> bool {
        return Config::get(key) == "true";
    }

    pub fn default(key: ConfigKey) -> String {
        #[cfg(not(target_os = "macos"))]
        let config_path = dirs::config_dir()
            .unwrap_or_default()
            .join("agrismart/config.toml");
        #[cfg(target_os = "macos")]
        let config_path = path::PathBuf::from(env::var("HOME").unwrap_or_default())
            .join(".config/agrismart/config.toml");

        let res = match key {
            ConfigKey::ApiKey => "".to_string(),
            ConfigKey::ApiURL => "https://openrouter.ai".to_string(),
            ConfigKey::IncludeContext => "true".to_string(),
            ConfigKey::MaxTokens => DEFAULT_MAX_TOKENS.to_string(),
            ConfigKey::Model => ModelName::default().to_string(),
            ConfigKey::RequestTimeout => "0".to_string(),
            ConfigKey::Streaming => "true".to_string(),
            ConfigKey::Topic => Topic::default().to_string(),

            // Special
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
        };

        return res;
    }

    /// Settings snapshot as configured at startup.
    pub fn settings() -> Settings {
        let max_tokens = Config::get(ConfigKey::MaxTokens);
        let max_tokens = parse_max_tokens(&max_tokens).unwrap_or(DEFAULT_MAX_TOKENS);
        let model = Config::get(ConfigKey::Model);

        return Settings {
            api_key: Config::get(ConfigKey::ApiKey).trim().to_string(),
            model: ModelName::parse(&model).unwrap_or_default(),
            max_tokens,
            streaming: Config::get_bool(ConfigKey::Streaming),
            include_context: Config::get_bool(ConfigKey::IncludeContext),
        };
    }

    fn validate() -> Result<()> {
        if let Err(err) = parse_max_tokens(&Config::get(ConfigKey::MaxTokens)) {
            bail!(format!(
                "Invalid value for '{}': {err}",
                ConfigKey::MaxTokens
            ));
        }

        let timeout = Config::get(ConfigKey::RequestTimeout);
        if timeout.parse::<u64>().is_err() {
            bail!(format!(
                "Invalid value for '{}': '{timeout}' is not a number of milliseconds",
                ConfigKey::RequestTimeout
            ));
        }

        return Ok(());
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let mut possible_values = vec![];
                    if let Some(arg) = cmd
                        .get_arguments()
                        .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                    {
                        possible_values = arg
                            .get_possible_values()
                            .iter()
                            .map(|e| return e.get_name().to_string())
                            .collect::<Vec<String>>();
                    }

                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_bool) = val.as_bool() {
                        Config::set(key, &val_bool.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        Config::set(key, val_str);
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        Config::validate()?;

        tracing::debug!(
            api_url = Config::get(ConfigKey::ApiURL),
            has_api_key = !Config::get(ConfigKey::ApiKey).is_empty(),
            model = Config::get(ConfigKey::Model),
            max_tokens = Config::get(ConfigKey::MaxTokens),
            streaming = Config::get(ConfigKey::Streaming),
            include_context = Config::get(ConfigKey::IncludeContext),
            request_timeout = Config::get(ConfigKey::RequestTimeout),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok() || val.parse::<bool>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
