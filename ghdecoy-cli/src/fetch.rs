//! Retrieves the raw contribution calendar markup.
use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::info;

const GITHUB_USERS_URL: &str = "https://github.com/users";

/// `https://github.com/users/{user}/contributions`
pub fn calendar_url(user: &str) -> String {
    users_url(GITHUB_USERS_URL, user)
}

fn users_url(base: &str, user: &str) -> String {
    format!("{base}/{user}/contributions")
}

/// Downloads the contribution calendar of `user`, split into lines.
pub fn fetch_calendar(user: &str) -> Result<Vec<String>> {
    fetch_calendar_from(GITHUB_USERS_URL, user)
}

fn fetch_calendar_from(base: &str, user: &str) -> Result<Vec<String>> {
    let url = users_url(base, user);
    info!(%url, "fetching calendar");
    let body = reqwest::blocking::get(&url)
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .with_context(|| format!("fetching calendar for {user}"))?;
    Ok(split_lines(&body))
}

/// Reads previously saved calendar markup from `path`, split into lines.
pub fn read_calendar(path: &Path) -> Result<Vec<String>> {
    info!(path = %path.display(), "reading calendar");
    let body = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(split_lines(&body))
}

fn split_lines(body: &str) -> Vec<String> {
    body.lines().map(str::to_string).collect()
}
