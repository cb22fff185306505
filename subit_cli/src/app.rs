//! Argument parsing and the single lookup the binary performs

use crate::config::ConfigManager;
use crate::error::{CliError, CliResult, ErrorContext};
use clap::Parser;
use log::debug;
use std::path::PathBuf;
use subit_client_core::{LanguagePreference, LookupOutcome, SubtitleFinder};

#[derive(Parser, Debug)]
#[command(name = "subit")]
#[command(author, version, about = "SubIt - Find and download the subtitle of a video", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Show progress messages
    #[arg(short, long)]
    pub verbose: bool,

    /// Read configuration from this file instead of the default location
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Video file to find a subtitle for
    pub video: PathBuf,

    /// Comma-separated language codes in priority order, e.g. "eng,fre"
    pub languages: String,
}

/// Initialize logging based on the debug and verbose flags
pub fn init_logging(debug: bool, verbose: bool) {
    if debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("subit_client_core", log::LevelFilter::Debug)
            .filter_module("subit_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else if verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .format_timestamp(None)
            .format_target(false)
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }
}

/// Run the lookup described by `cli` and return the written subtitle path
pub async fn run(cli: &Cli) -> CliResult<PathBuf> {
    let languages = match LanguagePreference::parse(&cli.languages) {
        Ok(languages) => languages,
        Err(e) => {
            let err = CliError::usage(&e.to_string());
            return Err(err.with_context("languages", &cli.languages));
        }
    };

    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config_path = manager.config_path().display().to_string();
    debug!("Using configuration file {config_path}");
    let config = manager
        .load()
        .map_err(|e| CliError::from(e).with_context("config", &config_path))?;

    let finder = SubtitleFinder::from_config(&config.client, &config.network)?;
    match finder.find_subtitle(&cli.video, &languages).await? {
        LookupOutcome::Found(path) => Ok(path),
        LookupOutcome::NotFound(reason) => Err(CliError::not_found(reason)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExitCode;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_positionals() {
        let args = ["subit", "-c", "/tmp/x.toml", "movie.mkv", "eng,fre"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.video, PathBuf::from("movie.mkv"));
        assert_eq!(cli.languages, "eng,fre");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.toml")));
        assert!(!cli.debug);
    }

    #[test]
    fn test_missing_languages_is_rejected() {
        assert!(Cli::try_parse_from(["subit", "movie.mkv"]).is_err());
    }

    #[tokio::test]
    async fn test_blank_language_list_is_usage_error() {
        let cli = Cli::try_parse_from(["subit", "movie.mkv", " , "]).unwrap();
        let err = run(&cli).await.unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::Usage);
    }
}
