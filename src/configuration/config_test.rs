use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;
use crate::domain::models::ModelName;

#[test]
fn it_serializes_to_valid_toml() -> Result<()> {
    let res = Config::serialize_default(cli::build());
    let doc = res.parse::<toml_edit::Document>()?;

    assert_eq!(doc["api-url"].as_str(), Some("https://openrouter.ai"));
    assert_eq!(doc["model"].as_str(), Some("openai/gpt-4o-mini"));
    assert_eq!(doc["max-tokens"].as_integer(), Some(2000));
    assert_eq!(doc["request-timeout"].as_integer(), Some(0));
    assert_eq!(doc["streaming"].as_bool(), Some(true));
    assert_eq!(doc["include-context"].as_bool(), Some(true));
    assert_eq!(doc["topic"].as_str(), Some("general"));
    assert!(doc.get("api-key").is_none());
    assert!(doc.get("config-file").is_none());
    assert!(res.contains("# api-key = \"\""));
    assert!(res.contains("[possible values: openai/gpt-4o-mini, openai/gpt-4o"));

    return Ok(());
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["agrismart", "-c", "./config.example.toml"])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::Model), "openai/gpt-4o");
    assert_eq!(Config::get(ConfigKey::MaxTokens), "1500");
    assert_eq!(Config::get(ConfigKey::RequestTimeout), "30000");
    assert_eq!(Config::get(ConfigKey::Topic), "soil");
    assert!(!Config::get_bool(ConfigKey::Streaming));
    assert!(Config::get_bool(ConfigKey::IncludeContext));

    let settings = Config::settings();
    assert_eq!(settings.model, ModelName::Gpt4o);
    assert_eq!(settings.max_tokens, 1500);
    assert!(!settings.streaming);

    return Ok(());
}

#[tokio::test]
async fn it_prefers_flags_over_the_config_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "agrismart",
        "-c",
        "./config.example.toml",
        "--max-tokens",
        "2500",
        "--streaming",
        "true",
    ])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::MaxTokens), "2500");
    assert!(Config::get_bool(ConfigKey::Streaming));
    assert_eq!(Config::get(ConfigKey::Model), "openai/gpt-4o");

    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["agrismart", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}

#[tokio::test]
async fn it_fails_on_max_tokens_off_the_step() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["agrismart", "-c", "./test/bad-max-tokens.toml"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}

#[test]
fn it_rejects_unknown_models_on_the_command_line() {
    let res = cli::build().try_get_matches_from(vec!["agrismart", "--model", "gpt-2"]);
    assert!(res.is_err());
}

#[tokio::test]
async fn it_trims_the_api_key_in_settings() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["agrismart", "--api-key", " sk-or-v1-abc \n"])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::settings().api_key, "sk-or-v1-abc");

    return Ok(());
}
