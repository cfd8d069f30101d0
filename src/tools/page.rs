//! Shared scraping plumbing for the YouTube tools.

use anyhow::{anyhow, Context};
use regex::Regex;
use serde_json::Value;

/// Build the HTTP client the scraping tools share.
///
/// The 30s timeout is internal to the tools; the agent core imposes none.
pub(crate) fn client() -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (compatible; YtAgent/0.2)")
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .context("failed to build HTTP client")
}

/// Extract the `ytInitialData` JSON blob embedded in a YouTube page.
pub(crate) fn initial_data(html: &str) -> anyhow::Result<Value> {
    let re = Regex::new(r"var ytInitialData = (.+?);</script>")?;
    let caps = re
        .captures(html)
        .ok_or_else(|| anyhow!("could not extract video data from YouTube response"))?;
    let data: Value =
        serde_json::from_str(&caps[1]).context("ytInitialData is not valid JSON")?;
    Ok(data)
}

/// Basic HTML entity decoding.
pub(crate) fn entity_decode(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}
