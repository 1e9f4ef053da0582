// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! repolog library
//!
//! The command-line front end over `repolog-git`, exported so integration
//! tests can drive it without spawning the binary.

pub mod config;

use std::fs;

use anyhow::{Context, Result};
use repolog_git::Project;
use tracing::{debug, info};

use crate::config::Config;

/// Read the configured repository's history, file changes included
///
/// # Errors
///
/// Returns an error if the configuration is invalid or any step of the
/// history walk fails. No partial project is returned.
pub fn collect(config: &Config) -> Result<Project> {
    config.validate()?;
    let path = config
        .project_path()
        .context("Could not determine repository path")?;

    let mut project = Project::new(&path)
        .with_context(|| format!("Invalid project path {}", path.display()))?;
    project
        .parse_commits(&config.parse_options())
        .with_context(|| format!("Failed to read history of {}", path.display()))?;

    Ok(project)
}

/// Serialize a project as JSON
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(project: &Project, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(project)
    } else {
        serde_json::to_string_pretty(project)
    }
}

/// Collect the history and write it to the configured destination
///
/// # Errors
///
/// Returns an error if collection, serialization or writing fails.
pub fn run(config: &Config) -> Result<()> {
    let project = collect(config)?;
    let json = render(&project, config.compact).context("Failed to serialize project")?;

    match &config.output {
        Some(output) => {
            fs::write(output, json + "\n")
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(
                project = %project.name,
                commits = project.commits.len(),
                output = %output.display(),
                "Wrote commit history"
            );
        }
        None => {
            debug!(bytes = json.len(), "Writing JSON to stdout");
            println!("{json}");
        }
    }

    Ok(())
}
