//! Video transcript extraction tool.

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::{page, Tool};

const MAX_TRANSCRIPT_CHARS: usize = 20000;

/// Pull a video's caption track and flatten it into plain text.
pub struct VideoTranscript;

#[async_trait]
impl Tool for VideoTranscript {
    fn name(&self) -> &str {
        "extract_video_transcript"
    }

    fn description(&self) -> &str {
        "Extract the transcript from a YouTube video."
    }

    async fn invoke(&self, input: &str) -> anyhow::Result<String> {
        let video_id = parse_video_id(input.trim())
            .ok_or_else(|| anyhow!("invalid YouTube URL format: {}", input.trim()))?;

        let client = page::client()?;
        let watch_url = format!("https://www.youtube.com/watch?v={}", video_id);
        let response = client.get(&watch_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("failed to fetch video page: HTTP {}", status));
        }
        let html = response.text().await?;

        let track_url = caption_track_url(&html)?
            .ok_or_else(|| anyhow!("no captions available for this video"))?;

        let xml = client.get(&track_url).send().await?.text().await?;
        let transcript = flatten_transcript(&xml);

        if transcript.is_empty() {
            return Err(anyhow!("transcript was empty"));
        }

        if transcript.len() > MAX_TRANSCRIPT_CHARS {
            let mut end = MAX_TRANSCRIPT_CHARS;
            while !transcript.is_char_boundary(end) {
                end -= 1;
            }
            return Ok(format!("{}... [transcript truncated]", &transcript[..end]));
        }

        Ok(transcript)
    }
}

/// Pull the video id out of a watch or short-form URL.
fn parse_video_id(raw: &str) -> Option<String> {
    if raw.contains("youtube.com/watch") {
        let parsed = Url::parse(raw).ok()?;
        return parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned());
    }

    if let Some(rest) = raw.split("youtu.be/").nth(1) {
        let id = rest.split(['?', '&']).next()?;
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }

    None
}

/// Find the first caption track advertised on the watch page.
///
/// The track list is a JSON array embedded in the page; brackets are matched
/// by depth so nested `runs` arrays inside track names don't cut it short.
fn caption_track_url(html: &str) -> anyhow::Result<Option<String>> {
    const MARKER: &str = "\"captionTracks\":";

    let Some(marker) = html.find(MARKER) else {
        return Ok(None);
    };
    let rest = &html[marker + MARKER.len()..];
    let Some(open) = rest.find('[') else {
        return Ok(None);
    };

    let mut depth = 0usize;
    let mut close = None;
    for (i, c) in rest[open..].char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(open + i + 1);
                    break;
                }
            }
            _ => {}
        }
    }
    let Some(close) = close else {
        return Ok(None);
    };

    let tracks: Value = serde_json::from_str(&rest[open..close])
        .context("caption track list is not valid JSON")?;

    Ok(tracks
        .get(0)
        .and_then(|track| track["baseUrl"].as_str())
        .map(|s| s.to_string()))
}

/// Strip timedtext XML down to a single line of prose.
fn flatten_transcript(xml: &str) -> String {
    let mut text = String::new();
    let mut in_tag = false;

    for c in xml.chars() {
        if c == '<' {
            in_tag = true;
        } else if c == '>' {
            in_tag = false;
            text.push(' ');
        } else if !in_tag {
            text.push(c);
        }
    }

    page::entity_decode(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_watch_urls() {
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?list=PL1&v=abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn parses_short_urls() {
        assert_eq!(
            parse_video_id("https://youtu.be/dQw4w9WgXcQ?t=42"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn rejects_non_video_urls() {
        assert_eq!(parse_video_id("https://example.com/watch?v=x"), None);
        assert_eq!(parse_video_id("not a url"), None);
    }

    #[test]
    fn finds_the_first_caption_track() {
        let html = r#"...,"captions":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=en","name":{"simpleText":"English"}}],"other":1},..."#;
        let url = caption_track_url(html).unwrap().unwrap();
        assert_eq!(url, "https://www.youtube.com/api/timedtext?v=abc&lang=en");
    }

    #[test]
    fn no_caption_tracks_is_not_an_error() {
        assert_eq!(caption_track_url("<html></html>").unwrap(), None);
    }

    #[test]
    fn nested_arrays_in_track_names_do_not_cut_the_list_short() {
        let html = r#""captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc","name":{"runs":[{"text":"English"}]}}],"audioTracks""#;
        let url = caption_track_url(html).unwrap().unwrap();
        assert_eq!(url, "https://www.youtube.com/api/timedtext?v=abc");
    }

    #[test]
    fn flattens_timedtext_xml() {
        let xml = r#"<transcript><text start="0.0" dur="1.2">never gonna</text><text start="1.2" dur="1.0">give &amp;you up</text></transcript>"#;
        assert_eq!(flatten_transcript(xml), "never gonna give &you up");
    }
}
