//! Tool implementations for the agent.
//!
//! A tool is a name, a human-readable description, and a single-string
//! invoke. The model only ever sees the name/description pair; the input and
//! output travel through the transcript as plain text.

mod channel;
mod page;
mod search;
mod transcript;

pub use channel::ChannelAnalysis;
pub use search::SearchVideos;
pub use transcript::VideoTranscript;

use std::sync::Arc;

use async_trait::async_trait;

/// An external capability the model can request by name.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The name of the tool (must be unique within a registry).
    fn name(&self) -> &str;

    /// Human-readable description shown to the model.
    fn description(&self) -> &str;

    /// Run the tool against a single string input.
    async fn invoke(&self, input: &str) -> anyhow::Result<String>;
}

/// An ordered, read-only collection of tools.
///
/// Order matters: the prompt lists tools in registration order. Lookup is by
/// exact name, never fuzzy.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// The stock registry with the three YouTube tools.
    pub fn youtube() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SearchVideos));
        registry.register(Arc::new(VideoTranscript));
        registry.register(Arc::new(ChannelAnalysis));
        registry
    }

    /// Add a tool at the end of the catalog.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.push(tool);
    }

    /// Look up a tool by exact name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Whether a tool with this exact name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All tools, in registration order.
    pub fn list(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
