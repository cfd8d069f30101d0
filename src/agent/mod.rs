//! Agent module - the core orchestration loop.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build the opening prompt with the tool catalog and user query
//! 2. Call the model with the transcript accumulated so far
//! 3. If the reply embeds a tool directive, execute it and fold the result back
//! 4. Repeat until the model answers in plain text or the iteration budget runs out

mod agent_loop;
mod directive;
mod prompt;

pub use agent_loop::{Agent, AgentRun, LogEntry, LogKind, Transcript};
pub use directive::{interpret, strip_directives, Directive, Interpretation};
pub use prompt::build_system_prompt;
