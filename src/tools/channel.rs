//! Channel content analysis tool.

use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::Value;

use super::{page, Tool};

const VIDEO_SAMPLE: usize = 3;

/// Profile a channel by sampling its most recent uploads.
pub struct ChannelAnalysis;

#[async_trait]
impl Tool for ChannelAnalysis {
    fn name(&self) -> &str {
        "analyze_channel_content"
    }

    fn description(&self) -> &str {
        "Analyze the content of a YouTube channel by examining its videos."
    }

    async fn invoke(&self, input: &str) -> anyhow::Result<String> {
        let channel_name = input.trim();
        let client = page::client()?;

        // Channel-filtered search (sp=EgIQAg%3D%3D restricts results to channels).
        let search_url = format!(
            "https://www.youtube.com/results?search_query={}&sp=EgIQAg%3D%3D",
            urlencoding::encode(channel_name)
        );
        let response = client.get(&search_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("failed to fetch channel search: HTTP {}", status));
        }
        let html = response.text().await?;
        let data = page::initial_data(&html)?;

        let (channel_title, channel_id) = find_channel(&data)
            .ok_or_else(|| anyhow!("channel '{}' not found", channel_name))?;

        let videos_url = format!("https://www.youtube.com/channel/{}/videos", channel_id);
        let response = client.get(&videos_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("failed to fetch channel videos: HTTP {}", status));
        }
        let html = response.text().await?;
        let channel_data = page::initial_data(&html)?;

        let videos = collect_channel_videos(&channel_data, VIDEO_SAMPLE);
        if videos.is_empty() {
            return Err(anyhow!("no videos found for channel '{}'", channel_title));
        }

        Ok(format_analysis(&channel_title, &videos))
    }
}

/// Summary of one upload on the channel's videos tab.
#[derive(Debug, PartialEq, Eq)]
struct ChannelVideo {
    title: String,
    duration: String,
    views: String,
    published: String,
}

/// Find the first channel entry in a channel-filtered search result.
fn find_channel(data: &Value) -> Option<(String, String)> {
    let sections = data["contents"]["twoColumnSearchResultsRenderer"]["primaryContents"]
        ["sectionListRenderer"]["contents"]
        .as_array()?;

    for section in sections {
        let Some(items) = section["itemSectionRenderer"]["contents"].as_array() else {
            continue;
        };

        for item in items {
            let renderer = &item["channelRenderer"];
            if renderer.is_null() {
                continue;
            }

            let title = renderer["title"]["simpleText"].as_str()?;
            let id = renderer["channelId"].as_str()?;
            return Some((title.to_string(), id.to_string()));
        }
    }

    None
}

/// Walk the videos tab and pull out up to `limit` uploads.
fn collect_channel_videos(data: &Value, limit: usize) -> Vec<ChannelVideo> {
    let mut videos = Vec::new();

    let Some(tabs) = data["contents"]["twoColumnBrowseResultsRenderer"]["tabs"].as_array() else {
        return videos;
    };

    let videos_tab = tabs
        .iter()
        .find(|tab| tab["tabRenderer"]["title"].as_str() == Some("Videos"));
    let Some(videos_tab) = videos_tab else {
        return videos;
    };

    let items = videos_tab["tabRenderer"]["content"]["sectionListRenderer"]["contents"][0]
        ["itemSectionRenderer"]["contents"][0]["gridRenderer"]["items"]
        .as_array();
    let Some(items) = items else {
        return videos;
    };

    for item in items {
        if videos.len() >= limit {
            break;
        }

        let renderer = &item["gridVideoRenderer"];
        if renderer.is_null() {
            continue;
        }

        let Some(title) = renderer["title"]["runs"][0]["text"].as_str() else {
            continue;
        };
        let duration = renderer["thumbnailOverlays"][0]["thumbnailOverlayTimeStatusRenderer"]
            ["text"]["simpleText"]
            .as_str()
            .unwrap_or("Unknown");
        let views = renderer["viewCountText"]["simpleText"]
            .as_str()
            .unwrap_or("Unknown views");
        let published = renderer["publishedTimeText"]["simpleText"]
            .as_str()
            .unwrap_or("Unknown");

        videos.push(ChannelVideo {
            title: title.to_string(),
            duration: duration.to_string(),
            views: views.to_string(),
            published: published.to_string(),
        });
    }

    videos
}

fn format_analysis(channel_title: &str, videos: &[ChannelVideo]) -> String {
    let mut analysis = format!("Analysis of '{}' channel:\n\n", channel_title);
    analysis.push_str(&format!("Top {} videos:\n", videos.len()));

    for (i, video) in videos.iter().enumerate() {
        analysis.push_str(&format!("{}. {}\n", i + 1, video.title));
        analysis.push_str(&format!(
            "   Duration: {}, Views: {}, Published: {}\n",
            video.duration, video.views, video.published
        ));
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_the_first_channel_renderer() {
        let data = json!({
            "contents": {
                "twoColumnSearchResultsRenderer": {
                    "primaryContents": {
                        "sectionListRenderer": {
                            "contents": [{
                                "itemSectionRenderer": {
                                    "contents": [
                                        { "videoRenderer": {} },
                                        {
                                            "channelRenderer": {
                                                "title": { "simpleText": "LangFights" },
                                                "channelId": "UCabc"
                                            }
                                        }
                                    ]
                                }
                            }]
                        }
                    }
                }
            }
        });

        assert_eq!(
            find_channel(&data),
            Some(("LangFights".to_string(), "UCabc".to_string()))
        );
    }

    #[test]
    fn missing_channel_is_none() {
        assert_eq!(find_channel(&json!({ "contents": {} })), None);
    }

    fn grid_video(title: &str) -> Value {
        json!({
            "gridVideoRenderer": {
                "title": { "runs": [{ "text": title }] },
                "thumbnailOverlays": [{
                    "thumbnailOverlayTimeStatusRenderer": {
                        "text": { "simpleText": "10:01" }
                    }
                }],
                "viewCountText": { "simpleText": "1,234 views" },
                "publishedTimeText": { "simpleText": "2 weeks ago" }
            }
        })
    }

    fn videos_tab(items: Vec<Value>) -> Value {
        json!({
            "contents": {
                "twoColumnBrowseResultsRenderer": {
                    "tabs": [
                        { "tabRenderer": { "title": "Home" } },
                        {
                            "tabRenderer": {
                                "title": "Videos",
                                "content": {
                                    "sectionListRenderer": {
                                        "contents": [{
                                            "itemSectionRenderer": {
                                                "contents": [{
                                                    "gridRenderer": { "items": items }
                                                }]
                                            }
                                        }]
                                    }
                                }
                            }
                        }
                    ]
                }
            }
        })
    }

    #[test]
    fn collects_uploads_from_the_videos_tab() {
        let data = videos_tab(vec![grid_video("First"), grid_video("Second")]);
        let videos = collect_channel_videos(&data, 3);
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].title, "First");
        assert_eq!(videos[0].duration, "10:01");
        assert_eq!(videos[0].views, "1,234 views");
    }

    #[test]
    fn missing_metadata_falls_back_to_unknown() {
        let data = videos_tab(vec![json!({
            "gridVideoRenderer": {
                "title": { "runs": [{ "text": "Bare" }] }
            }
        })]);
        let videos = collect_channel_videos(&data, 3);
        assert_eq!(videos[0].duration, "Unknown");
        assert_eq!(videos[0].views, "Unknown views");
        assert_eq!(videos[0].published, "Unknown");
    }

    #[test]
    fn sample_is_capped() {
        let data = videos_tab((0..10).map(|i| grid_video(&format!("v{}", i))).collect());
        assert_eq!(collect_channel_videos(&data, 3).len(), 3);
    }

    #[test]
    fn analysis_block_lists_each_video() {
        let videos = vec![ChannelVideo {
            title: "First".to_string(),
            duration: "10:01".to_string(),
            views: "1,234 views".to_string(),
            published: "2 weeks ago".to_string(),
        }];
        let text = format_analysis("LangFights", &videos);
        assert!(text.starts_with("Analysis of 'LangFights' channel:"));
        assert!(text.contains("1. First"));
        assert!(text.contains("Duration: 10:01, Views: 1,234 views, Published: 2 weeks ago"));
    }
}
