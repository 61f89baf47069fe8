pub mod commands;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

use clap::{Parser, Subcommand, ValueEnum};
use commands::config::{get_config_path, init_config, init_config_manager, show_config};
use commands::ocr::{analyze, check_ocr_health, AnalyzeOptions};
use error::AppError;
use models::config::LookupSource;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "medscan")]
#[command(about = "Read a prescription photo and look up the medicines on it")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a prescription image
    Analyze {
        /// JPEG, PNG, GIF, BMP or WEBP image
        image: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Include the raw OCR text
        #[arg(long)]
        show_text: bool,
        /// Where medicine information comes from
        #[arg(long, value_enum)]
        lookup: Option<SourceArg>,
    },
    /// Look up medicine information by name
    Lookup {
        #[arg(required = true)]
        names: Vec<String>,
        #[arg(long)]
        json: bool,
        #[arg(long, value_enum)]
        lookup: Option<SourceArg>,
    },
    /// Ask the AI assistant about a medicine
    Search {
        query: Vec<String>,
    },
    /// Check that the OCR server is reachable
    OcrHealth,
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Static,
    Ai,
}

impl From<SourceArg> for LookupSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Static => LookupSource::Static,
            SourceArg::Ai => LookupSource::Ai,
        }
    }
}

/// CLI entry point
pub fn run() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match execute(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::from(e.exit_code())
        }
    }
}

fn execute(cli: Cli) -> Result<String, AppError> {
    let manager = init_config_manager(cli.config)?;

    // Locating or resetting the file must work even when it does not parse
    if let Commands::Config { action } = &cli.command {
        match action {
            ConfigAction::Path => return Ok(get_config_path(&manager)),
            ConfigAction::Init { force } => return init_config(&manager, *force),
            ConfigAction::Show => {}
        }
    }

    let config = manager.load_with_env()?;
    logging::init_logging(&config.logging);

    let runtime = tokio::runtime::Runtime::new().map_err(AppError::Runtime)?;

    match cli.command {
        Commands::Analyze {
            image,
            json,
            show_text,
            lookup,
        } => {
            let options = AnalyzeOptions {
                json,
                show_text,
                lookup: lookup.map(Into::into),
            };
            runtime.block_on(analyze(&config, &image, &options))
        }
        Commands::Lookup {
            names,
            json,
            lookup,
        } => {
            let source = lookup.map(Into::into).unwrap_or(config.lookup.source);
            runtime.block_on(commands::lookup::lookup_medicines(
                &config, &names, source, json,
            ))
        }
        Commands::Search { query } => {
            runtime.block_on(commands::search::search(&config, &query.join(" ")))
        }
        Commands::OcrHealth => {
            let healthy = runtime.block_on(check_ocr_health(&config))?;
            Ok(if healthy {
                format!("OCR server at {} is healthy", config.ocr.server_url)
            } else {
                format!("OCR server at {} is not reachable", config.ocr.server_url)
            })
        }
        Commands::Config { .. } => show_config(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "medscan", "analyze", "rx.jpg", "--json", "--lookup", "ai", "--config", "/tmp/c.json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
        match cli.command {
            Commands::Analyze {
                image, json, lookup, ..
            } => {
                assert_eq!(image, PathBuf::from("rx.jpg"));
                assert!(json);
                assert!(matches!(lookup, Some(SourceArg::Ai)));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_lookup_requires_a_name() {
        assert!(Cli::try_parse_from(["medscan", "lookup"]).is_err());
    }

    #[test]
    fn test_config_path_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let cli = Cli::try_parse_from([
            "medscan",
            "config",
            "path",
            "--config",
            path.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(execute(cli).unwrap(), path.display().to_string());
    }

    #[test]
    fn test_config_commands_with_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let parse = |action: &str| {
            Cli::try_parse_from(["medscan", "config", action, "--config", path.to_str().unwrap()])
                .unwrap()
        };

        assert_eq!(execute(parse("path")).unwrap(), path.display().to_string());

        let init = execute(parse("init")).unwrap();
        assert!(init.starts_with("Config already exists"));

        let err = execute(parse("show")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let cli = Cli::try_parse_from([
            "medscan",
            "config",
            "init",
            "--force",
            "--config",
            path.to_str().unwrap(),
        ])
        .unwrap();
        assert!(execute(cli).unwrap().starts_with("Wrote default config"));
        assert!(execute(parse("show")).is_ok());
    }
}
