//! yt-agent - interactive CLI entry point.
//!
//! Reads queries from stdin, runs one agent session per query, and prints the
//! final answer. Type `exit` to quit.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_agent::agent::Agent;
use yt_agent::config::Config;

fn prompt(text: &str) -> std::io::Result<()> {
    print!("{}", text);
    std::io::stdout().flush()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yt_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env()?;

    println!("Initializing YouTube agent with Ollama...");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // Optional model override at startup.
    prompt(&format!(
        "Enter Ollama model name (default: {}): ",
        config.model
    ))?;
    if let Some(line) = lines.next_line().await? {
        let choice = line.trim();
        if !choice.is_empty() {
            config.model = choice.to_string();
        }
    }

    let agent = Agent::new(config.clone());
    info!("YouTube agent ready with Ollama model: {}", config.model);
    println!("Type 'exit' to quit");

    loop {
        prompt("\nWhat would you like to know about YouTube content? ")?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();

        if query.eq_ignore_ascii_case("exit") {
            println!("Goodbye!");
            break;
        }
        if query.is_empty() {
            continue;
        }

        match agent.run(query).await {
            Ok(run) => {
                for entry in &run.log {
                    tracing::debug!("{:?}: {}", entry.kind, entry.content);
                }
                println!("\nAgent response: {}", run.output);
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    Ok(())
}
