//! System prompt template for the agent.

use crate::tools::ToolRegistry;

/// Build the prompt that opens every session: role framing, the tool catalog
/// in registry order, the directive syntax, and the literal user query.
///
/// An empty registry still produces a well-formed prompt (the model may answer
/// directly), and an empty query is passed through verbatim.
pub fn build_system_prompt(tools: &ToolRegistry, query: &str) -> String {
    let tool_descriptions = if tools.is_empty() {
        "(no tools available - answer the query directly)".to_string()
    } else {
        tools
            .list()
            .iter()
            .map(|t| format!("- {}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"You are a YouTube content analysis assistant that helps users discover and understand YouTube videos and channels.

For a truly comprehensive analysis, you should typically use multiple tools in sequence to gather complete information:
1. First search for relevant videos
2. Then extract transcripts from the most promising results (using the exact URL returned by search)
3. Finally analyze the channel to understand the creator's credibility and content focus

Available tools:
{tool_descriptions}

To use a tool, you must respond in this exact format:

<json>
{{
"action": "tool_name",
"action_input": "input to the tool"
}}
</json>

For example, to search for videos about Python programming:
<json>
{{
"action": "search_youtube_videos",
"action_input": "python programming"
}}
</json>

And after getting search results, to extract a transcript:
<json>
{{
"action": "extract_video_transcript",
"action_input": "https://www.youtube.com/watch?v=actual_video_id"
}}
</json>

After using a tool, examine the results carefully to determine if you need additional information from other tools.
Always use the exact URLs returned by the search tool when extracting transcripts or analyzing channels.

When you have a final answer that doesn't require using more tools, provide your response in plain text without using the json format.
Your final answer should synthesize information from all tools used and provide valuable insights the user couldn't easily find on their own.

Think step by step to solve the user's request thoroughly. Always aim to provide comprehensive analysis rather than basic information.

User query: {query}"#,
        tool_descriptions = tool_descriptions,
        query = query
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::Tool;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Named(&'static str, &'static str);

    #[async_trait]
    impl Tool for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            self.1
        }

        async fn invoke(&self, input: &str) -> anyhow::Result<String> {
            Ok(input.to_string())
        }
    }

    #[test]
    fn lists_every_tool_in_registry_order() {
        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(Named("beta", "second tool")));
        tools.register(Arc::new(Named("alpha", "first tool")));

        let prompt = build_system_prompt(&tools, "anything");
        let beta = prompt.find("- beta: second tool").unwrap();
        let alpha = prompt.find("- alpha: first tool").unwrap();
        assert!(beta < alpha);
    }

    #[test]
    fn includes_the_query_verbatim() {
        let tools = ToolRegistry::new();
        let prompt = build_system_prompt(&tools, "what is rust {really} about?");
        assert!(prompt.ends_with("User query: what is rust {really} about?"));
    }

    #[test]
    fn empty_query_is_passed_through() {
        let tools = ToolRegistry::new();
        let prompt = build_system_prompt(&tools, "");
        assert!(prompt.ends_with("User query: "));
    }

    #[test]
    fn empty_registry_still_renders_a_well_formed_prompt() {
        let tools = ToolRegistry::new();
        let prompt = build_system_prompt(&tools, "hi");
        assert!(prompt.contains("(no tools available"));
        assert!(prompt.contains("<json>"));
    }
}
