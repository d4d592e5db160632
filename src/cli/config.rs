//! Configuration management commands.

use serde_json::json;

use crate::config::{Config, CONFIG_TEMPLATE};
use crate::error::{ConfigError, Result};

use super::command::{ConfigInitArgs, ConfigPathArg};
use super::diagnostic::ConfigDiagnostic;
use super::output;

/// Write a fresh configuration file from the built-in template.
pub fn init(args: &ConfigInitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        output::error(&format!("{} already exists", args.path.display()));
        output::hint("pass --force to overwrite");
        return Err(ConfigError::InvalidValue {
            field: "path",
            reason: "refusing to overwrite an existing file".into(),
        }
        .into());
    }

    if let Some(parent) = args.path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&args.path, CONFIG_TEMPLATE)?;
    output::success(&format!("wrote {}", args.path.display()));
    Ok(())
}

/// Display the effective configuration with defaults applied.
pub fn show(args: &ConfigPathArg) -> Result<()> {
    let config = Config::load(&args.config)?;

    if output::is_json() {
        output::json_output(json!({
            "config": args.config.display().to_string(),
            "data": {
                "trades_dir": config.data.trades_dir.display().to_string(),
                "output_dir": config.data.output_dir.display().to_string(),
                "cohorts_file": config.cohorts_file().display().to_string(),
            },
            "runtime": { "jobs": config.jobs() },
            "logging": {
                "level": config.logging.level,
                "format": config.logging.format,
            },
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Config", args.config.display());
    output::field("Data dir", config.data.trades_dir.display());
    output::field("Output dir", config.data.output_dir.display());
    output::field("Cohort table", config.cohorts_file().display());
    output::field("Jobs", config.jobs());
    output::field("Log level", &config.logging.level);
    output::field("Log format", &config.logging.format);
    Ok(())
}

/// Validate a configuration file, rendering parse errors with source
/// context.
pub fn validate(args: &ConfigPathArg) -> Result<()> {
    let content = std::fs::read_to_string(&args.config).map_err(ConfigError::ReadFile)?;

    match toml::from_str::<Config>(&content) {
        Err(parse_error) => {
            let span = parse_error.span().unwrap_or(0..0);
            if output::is_json() {
                output::error(&parse_error.to_string());
            } else {
                let diagnostic = ConfigDiagnostic::new(
                    parse_error.message().to_string(),
                    content.clone(),
                    span.start,
                    span.len(),
                )
                .with_help(format!(
                    "run {} to regenerate a valid file",
                    output::highlight("oddsflow config init --force")
                ));
                eprintln!("{:?}", miette::Report::new(diagnostic));
            }
            Err(ConfigError::Parse(parse_error).into())
        }
        Ok(config) => match config.validate() {
            Err(error) => {
                output::error(&error.to_string());
                Err(error)
            }
            Ok(()) => {
                output::success("configuration is valid");
                Ok(())
            }
        },
    }
}
