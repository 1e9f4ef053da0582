// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command-line configuration for repolog

use std::path::PathBuf;

use clap::Parser;
use repolog_git::ParseOptions;

/// Dump a repository's commit history and per-file churn as JSON
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "repolog")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Repository to read: a working tree, a `.git` directory or a bare repository
    ///
    /// Defaults to the current working directory.
    pub path: Option<PathBuf>,

    /// Only include commits made on or after this date (YYYY-MM-DD)
    #[arg(long, env = "GIT_SINCE")]
    pub since: Option<String>,

    /// Write JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit single-line JSON instead of pretty-printed output
    #[arg(long, default_value = "false")]
    pub compact: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs go to stderr so they never mix with the JSON on stdout.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Get the repository path, using the current directory as default
    ///
    /// Returns `None` if no path is given and the current directory
    /// cannot be determined.
    #[must_use]
    pub fn project_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(|| std::env::current_dir().ok())
    }

    /// Options for the history walk
    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            since: self.since.clone(),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the repository path is missing, does not exist,
    /// or is not a directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let path = self.project_path().ok_or(ConfigError::NoWorkingDirectory)?;
        if !path.exists() {
            return Err(ConfigError::PathNotFound(path));
        }
        if !path.is_dir() {
            return Err(ConfigError::PathNotDirectory(path));
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No path given and the current directory is unavailable
    #[error("No repository path given and the current directory is unavailable")]
    NoWorkingDirectory,

    /// Repository path not found
    #[error("Repository path not found: {0}")]
    PathNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    PathNotDirectory(PathBuf),
}
