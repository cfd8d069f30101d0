//! Core agent loop implementation.

use std::sync::Arc;

use crate::config::Config;
use crate::llm::{LlmClient, LlmError, OllamaClient};
use crate::tools::ToolRegistry;

use super::directive::{interpret, strip_directives, Directive, Interpretation};
use super::prompt::build_system_prompt;

/// Appended after every tool result so the model decides whether to continue.
const CONTINUE_INSTRUCTION: &str =
    "Based on this information, provide a final answer or use another tool if needed.";

/// Appended once when the iteration budget is exhausted.
const FORCE_ANSWER_INSTRUCTION: &str =
    "Please provide a final answer based on all the information above.";

/// Append-only conversation history.
///
/// The rendered transcript is exactly what the model sees on the next call;
/// no summarization, no truncation. Segments are never rewritten or removed.
#[derive(Debug, Default)]
pub struct Transcript {
    segments: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one segment.
    pub fn append(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Render the full conversation for the next model call.
    pub fn render(&self) -> String {
        self.segments.join("\n")
    }

    /// Number of segments appended so far.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// A single entry in the session log.
///
/// The log mirrors the run for CLI visibility; it is never fed to the model.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub kind: LogKind,
    pub content: String,
}

/// Types of log entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogKind {
    /// A tool is being called
    ToolCall,
    /// A tool returned a result
    ToolResult,
    /// The model produced the final answer
    Response,
    /// A tool failed or an unknown tool was requested
    Error,
}

/// The result of one agent session.
#[derive(Debug)]
pub struct AgentRun {
    /// Final answer text.
    pub output: String,

    /// What happened along the way.
    pub log: Vec<LogEntry>,
}

/// The agent: one model backend, one tool catalog, one loop per query.
pub struct Agent {
    config: Config,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

impl Agent {
    /// Create an agent with the stock YouTube tools and an Ollama backend.
    pub fn new(config: Config) -> Self {
        let llm = Arc::new(OllamaClient::new(
            &config.ollama_url,
            &config.model,
            config.temperature,
        ));

        Self {
            config,
            llm,
            tools: ToolRegistry::youtube(),
        }
    }

    /// Create an agent from explicit parts (useful for testing and for
    /// alternate backends or tool sets).
    pub fn with_backend(config: Config, llm: Arc<dyn LlmClient>, tools: ToolRegistry) -> Self {
        Self { config, llm, tools }
    }

    /// Run one query to completion.
    ///
    /// Issues at most `max_iterations + 1` model calls: one per tool-calling
    /// iteration plus, on exhaustion, one forced final-answer call. Every
    /// per-iteration failure (malformed directive, unknown tool, tool error)
    /// is folded into the transcript and the loop continues; only a backend
    /// failure propagates.
    pub async fn run(&self, query: &str) -> Result<AgentRun, LlmError> {
        let mut transcript = Transcript::new();
        transcript.append(build_system_prompt(&self.tools, query));

        let mut log = Vec::new();

        for iteration in 0..self.config.max_iterations {
            tracing::debug!("Agent iteration {}", iteration + 1);

            let reply = self.llm.complete(&transcript.render()).await?;

            match interpret(&reply, &self.tools) {
                Interpretation::Call(directive) => {
                    tracing::info!(
                        "Using tool: {} with input: {}",
                        directive.action,
                        directive.action_input
                    );
                    log.push(LogEntry {
                        kind: LogKind::ToolCall,
                        content: format!(
                            "Calling tool: {} with input: {}",
                            directive.action, directive.action_input
                        ),
                    });

                    let summary = self.dispatch(&directive, &mut log).await;
                    transcript.append(reply);
                    transcript.append(summary);
                }
                Interpretation::UnknownTool(directive) => {
                    tracing::warn!("Unknown tool requested: {}", directive.action);
                    log.push(LogEntry {
                        kind: LogKind::Error,
                        content: format!("Unknown tool: {}", directive.action),
                    });

                    transcript.append(reply);
                    transcript.append(format!(
                        "Tool '{}' is not available. Please use one of the available tools.",
                        directive.action
                    ));
                }
                Interpretation::Answer => {
                    let answer = strip_directives(&reply);
                    log.push(LogEntry {
                        kind: LogKind::Response,
                        content: truncate_for_log(&answer, 2000),
                    });
                    return Ok(AgentRun {
                        output: answer,
                        log,
                    });
                }
            }
        }

        // Iteration budget exhausted: force a final answer with one more call.
        tracing::debug!(
            "Max iterations ({}) reached, forcing a final answer",
            self.config.max_iterations
        );
        transcript.append(FORCE_ANSWER_INSTRUCTION);

        let reply = self.llm.complete(&transcript.render()).await?;
        let answer = strip_directives(&reply);
        log.push(LogEntry {
            kind: LogKind::Response,
            content: truncate_for_log(&answer, 2000),
        });

        Ok(AgentRun {
            output: answer,
            log,
        })
    }

    /// Resolve and invoke a tool, converting every failure into a transcript
    /// segment. No error crosses this boundary.
    async fn dispatch(&self, directive: &Directive, log: &mut Vec<LogEntry>) -> String {
        // The interpreter only emits registered names, but the lookup stays
        // guarded in case the registry and the directive ever disagree.
        let Some(tool) = self.tools.get(&directive.action) else {
            log.push(LogEntry {
                kind: LogKind::Error,
                content: format!("Unknown tool: {}", directive.action),
            });
            return format!(
                "Tool '{}' is not available. Please use one of the available tools.",
                directive.action
            );
        };

        match tool.invoke(&directive.action_input).await {
            Ok(output) => {
                log.push(LogEntry {
                    kind: LogKind::ToolResult,
                    content: truncate_for_log(&output, 1000),
                });
                format!(
                    "Tool: {}\nTool Input: {}\nTool Result: {}\n\n{}",
                    directive.action, directive.action_input, output, CONTINUE_INSTRUCTION
                )
            }
            Err(e) => {
                log.push(LogEntry {
                    kind: LogKind::Error,
                    content: format!("Error executing tool {}: {}", directive.action, e),
                });
                format!(
                    "Error executing tool {}: {}\nPlease try a different approach or provide an answer based on what you know.",
                    directive.action, e
                )
            }
        }
    }
}

/// Truncate a string for logging purposes.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated]", &s[..end])
}
