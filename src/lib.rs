//! # yt-agent
//!
//! A minimal YouTube content analysis agent driven by a local Ollama model.
//!
//! This library provides:
//! - An interactive CLI for asking questions about YouTube content
//! - A tool-based agent loop for search, transcript extraction, and channel analysis
//! - Integration with Ollama for local LLM access
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Receive a query from the CLI
//! 2. Build a prompt with the tool catalog and the user query
//! 3. Call the model, scan the reply for a tool directive, execute it
//! 4. Fold the result back into the transcript, repeat until a plain-text answer
//!
//! ## Example
//!
//! ```rust,ignore
//! use yt_agent::{agent::Agent, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(config);
//! let run = agent.run("find videos comparing rust and go").await?;
//! println!("{}", run.output);
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod tools;

pub use config::Config;
