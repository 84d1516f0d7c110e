use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ModelName;
use crate::domain::models::Topic;

const BOOL_VALUES: [&str; 2] = ["true", "false"];

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_ask() -> Command {
    return Command::new("ask").about("Start an interactive advice session. This is the default.");
}

fn arg_bool(key: ConfigKey, env: &'static str, help: &str) -> Arg {
    return Arg::new(key.to_string())
        .long(key.to_string())
        .env(env)
        .num_args(1)
        .help(format!("{help} [default: {}]", Config::default(key)))
        .value_parser(PossibleValuesParser::new(BOOL_VALUES))
        .global(true);
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("agrismart")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(false)
        .subcommand(subcommand_ask())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("AGRISMART_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::ApiKey.to_string())
                .long(ConfigKey::ApiKey.to_string())
                .env("AGRISMART_API_KEY")
                .num_args(1)
                .hide_env_values(true)
                .help("OpenRouter API key. Can also be entered when the session starts.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ApiURL.to_string())
                .long(ConfigKey::ApiURL.to_string())
                .env("AGRISMART_API_URL")
                .num_args(1)
                .help(format!("OpenRouter API URL. Can be swapped to a compatible proxy. [default: {}]", Config::default(ConfigKey::ApiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Model.to_string())
                .short('m')
                .long(ConfigKey::Model.to_string())
                .env("AGRISMART_MODEL")
                .num_args(1)
                .help(format!("The model to ask. [default: {}]", Config::default(ConfigKey::Model)))
                .value_parser(PossibleValuesParser::new(ModelName::identifiers()))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::MaxTokens.to_string())
                .long(ConfigKey::MaxTokens.to_string())
                .env("AGRISMART_MAX_TOKENS")
                .num_args(1)
                .help(format!("Maximum tokens per answer, between 500 and 3000 in steps of 100. [default: {}]", Config::default(ConfigKey::MaxTokens)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::RequestTimeout.to_string())
                .long(ConfigKey::RequestTimeout.to_string())
                .env("AGRISMART_REQUEST_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds for an answer before giving up. 0 waits forever. [default: {}]", Config::default(ConfigKey::RequestTimeout)))
                .global(true),
        )
        .arg(arg_bool(
            ConfigKey::Streaming,
            "AGRISMART_STREAMING",
            "Print answers as they arrive instead of all at once.",
        ))
        .arg(arg_bool(
            ConfigKey::IncludeContext,
            "AGRISMART_INCLUDE_CONTEXT",
            "Send the last six conversation messages along with each question.",
        ))
        .arg(
            Arg::new(ConfigKey::Topic.to_string())
                .short('t')
                .long(ConfigKey::Topic.to_string())
                .env("AGRISMART_TOPIC")
                .num_args(1)
                .help(format!("The topic selected when a session starts. [default: {}]", Config::default(ConfigKey::Topic)))
                .value_parser(PossibleValuesParser::new(Topic::VARIANTS))
                .global(true),
        );
}

/// Parses the command line. Returns true when an interactive session should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("ask", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
