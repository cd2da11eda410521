//! Browser navigation via the platform opener.

use anyhow::{Context, Result};
use std::process::{Command, Stdio};
use url::Url;

/// Base URL for the site-wide search form.
pub const SITE_SEARCH_BASE: &str = "https://www.bondelaget.no/";

/// Capability to open a URL in a new browsing context.
pub trait Navigate {
    fn open_external(&mut self, url: &str) -> Result<()>;
}

/// Opens URLs with the platform opener (`xdg-open`, `open`, or `cmd /C start`).
///
/// The child process is detached with nulled stdio so it cannot write into
/// the alternate screen.
#[derive(Debug, Default)]
pub struct BrowserNavigator;

impl Navigate for BrowserNavigator {
    fn open_external(&mut self, url: &str) -> Result<()> {
        if url.trim().is_empty() {
            anyhow::bail!("Cannot open an empty URL");
        }

        #[cfg(target_os = "macos")]
        let mut command = {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        };

        #[cfg(target_os = "windows")]
        let mut command = {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        };

        #[cfg(all(not(target_os = "macos"), not(target_os = "windows")))]
        let mut command = {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        };

        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to open URL in browser: {url}"))?;

        Ok(())
    }
}

/// Records requested URLs instead of opening anything. For tests.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub opened: Vec<String>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Navigate for RecordingNavigator {
    fn open_external(&mut self, url: &str) -> Result<()> {
        self.opened.push(url.to_string());
        Ok(())
    }
}

/// Build the site search URL for a term, as the original search form submits
/// it: a GET request with the term in the `search` query parameter.
pub fn search_url(term: &str) -> Result<String> {
    let url = Url::parse_with_params(SITE_SEARCH_BASE, &[("search", term)])
        .context("Failed to build search URL")?;
    Ok(url.into())
}
