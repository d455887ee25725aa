//! Credential list loading.
//!
//! The account list is a plain text file, one bearer token per line.
//! It is re-read at the start of every cycle so external edits take
//! effect without a restart.

use anyhow::{Context, Result};
use std::fs;

use crate::types::Credential;

/// Load the ordered credential list from a token file.
///
/// Lines are trimmed; empty and whitespace-only lines are discarded.
/// Order is preserved and duplicates are kept (they will simply be
/// processed again).
pub fn load_credentials(path: &str) -> Result<Vec<Credential>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read token file: {path}"))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Credential::new)
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
