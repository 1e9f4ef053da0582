// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Parsing of the `since` history boundary

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::GitError;

/// Accepted layout for the since boundary
pub const SINCE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` since boundary into midnight UTC of that day.
///
/// Blank input means no boundary and yields `Ok(None)`.
///
/// # Errors
///
/// Returns `GitError::InvalidDate` if the value is not a valid date.
pub fn parse_since(value: &str) -> Result<Option<DateTime<Utc>>, GitError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let date =
        NaiveDate::parse_from_str(trimmed, SINCE_FORMAT).map_err(|source| GitError::InvalidDate {
            value: value.to_string(),
            source,
        })?;

    Ok(Some(date.and_time(chrono::NaiveTime::MIN).and_utc()))
}
