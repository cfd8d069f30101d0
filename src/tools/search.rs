//! YouTube video search tool.

use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::Value;

use super::{page, Tool};

const MAX_RESULTS: usize = 5;

/// Search for videos by scraping the YouTube results page.
pub struct SearchVideos;

#[async_trait]
impl Tool for SearchVideos {
    fn name(&self) -> &str {
        "search_youtube_videos"
    }

    fn description(&self) -> &str {
        "Search for YouTube videos based on the query."
    }

    async fn invoke(&self, input: &str) -> anyhow::Result<String> {
        let query = input.trim();
        let url = format!(
            "https://www.youtube.com/results?search_query={}",
            urlencoding::encode(query)
        );

        let client = page::client()?;
        let response = client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("failed to fetch search results: HTTP {}", status));
        }

        let html = response.text().await?;
        let data = page::initial_data(&html)?;
        let videos = collect_videos(&data, MAX_RESULTS);

        if videos.is_empty() {
            return Ok(format!("No videos found for: {}", query));
        }

        Ok(format_results(&videos))
    }
}

/// One entry scraped from the results page.
#[derive(Debug, PartialEq, Eq)]
struct VideoResult {
    title: String,
    url: String,
    channel: String,
}

/// Walk the search renderer tree and pull out up to `limit` videos.
fn collect_videos(data: &Value, limit: usize) -> Vec<VideoResult> {
    let mut videos = Vec::new();

    let sections = data["contents"]["twoColumnSearchResultsRenderer"]["primaryContents"]
        ["sectionListRenderer"]["contents"]
        .as_array();
    let Some(sections) = sections else {
        return videos;
    };

    for section in sections {
        let Some(items) = section["itemSectionRenderer"]["contents"].as_array() else {
            continue;
        };

        for item in items {
            let renderer = &item["videoRenderer"];
            if renderer.is_null() {
                continue;
            }

            let Some(title) = renderer["title"]["runs"][0]["text"].as_str() else {
                continue;
            };
            let Some(video_id) = renderer["videoId"].as_str() else {
                continue;
            };
            let channel = renderer["ownerText"]["runs"][0]["text"]
                .as_str()
                .unwrap_or("Unknown channel");

            videos.push(VideoResult {
                title: title.to_string(),
                url: format!("https://www.youtube.com/watch?v={}", video_id),
                channel: channel.to_string(),
            });

            if videos.len() >= limit {
                return videos;
            }
        }
    }

    videos
}

fn format_results(videos: &[VideoResult]) -> String {
    videos
        .iter()
        .map(|v| format!("**{}**\nChannel: {}\nURL: {}", v.title, v.channel, v.url))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn video_item(title: &str, id: &str, channel: &str) -> Value {
        json!({
            "videoRenderer": {
                "title": { "runs": [{ "text": title }] },
                "videoId": id,
                "ownerText": { "runs": [{ "text": channel }] }
            }
        })
    }

    fn results_page(items: Vec<Value>) -> Value {
        json!({
            "contents": {
                "twoColumnSearchResultsRenderer": {
                    "primaryContents": {
                        "sectionListRenderer": {
                            "contents": [
                                { "itemSectionRenderer": { "contents": items } }
                            ]
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn collects_title_url_and_channel() {
        let data = results_page(vec![
            video_item("Rust vs Go", "abc123", "LangFights"),
            json!({ "shelfRenderer": {} }),
            video_item("Go vs Rust", "def456", "LangFights"),
        ]);

        let videos = collect_videos(&data, 5);
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].title, "Rust vs Go");
        assert_eq!(videos[0].url, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(videos[0].channel, "LangFights");
    }

    #[test]
    fn respects_the_result_limit() {
        let items = (0..10)
            .map(|i| video_item(&format!("v{}", i), &format!("id{}", i), "c"))
            .collect();
        let videos = collect_videos(&results_page(items), 5);
        assert_eq!(videos.len(), 5);
    }

    #[test]
    fn malformed_payload_yields_no_videos() {
        let videos = collect_videos(&json!({ "contents": "garbage" }), 5);
        assert!(videos.is_empty());
    }

    #[test]
    fn formats_results_as_readable_blocks() {
        let videos = vec![VideoResult {
            title: "Rust vs Go".to_string(),
            url: "https://www.youtube.com/watch?v=abc123".to_string(),
            channel: "LangFights".to_string(),
        }];
        let text = format_results(&videos);
        assert!(text.contains("**Rust vs Go**"));
        assert!(text.contains("URL: https://www.youtube.com/watch?v=abc123"));
    }
}
