//! Interactive line interpreter.
//!
//! Reads queries line by line, runs each through the network, and prints
//! the routing decision and agent reply. Per-query errors are printed and
//! the loop keeps going.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::agent::TaskState;
use crate::network::{AgentNetwork, HealthEntry, NetworkError, QueryOutcome};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Skip,
    Query(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Skip;
        }
        match line.to_lowercase().as_str() {
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Query(line.to_string()),
        }
    }
}

/// Whether a finished query counts as a failure.
pub fn is_failure(outcome: &Result<QueryOutcome, NetworkError>) -> bool {
    match outcome {
        Ok(o) => matches!(o.result.state(), TaskState::Failed | TaskState::Error),
        Err(_) => true,
    }
}

/// Text printed for one query.
pub fn render_outcome(query: &str, outcome: &Result<QueryOutcome, NetworkError>) -> String {
    let outcome = match outcome {
        Ok(o) => o,
        Err(e) => return format!("Error processing query '{query}': {e}"),
    };

    let mut out = format!(
        "Routing to {} with {:.2} confidence\n",
        outcome.decision.agent_name, outcome.decision.confidence
    );
    let text = outcome.result.text();
    match outcome.result.state() {
        TaskState::Completed => out.push_str(&format!("Agent Response: {text}")),
        TaskState::InputRequired => out.push_str(&format!("Agent requested input: {text}")),
        TaskState::Failed | TaskState::Error => out.push_str(&format!("Agent failed: {text}")),
    }

    match &outcome.summary {
        Some(Ok(summary)) => out.push_str(&format!("\nLLM Summary: {summary}")),
        Some(Err(e)) => out.push_str(&format!("\nLLM Summary: Error - {e}")),
        None => {}
    }
    out
}

pub fn render_health(entries: &[HealthEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("  {}: {}", e.name, e.health))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Handle one query and print it. Returns `false` when it failed.
pub async fn run_query<W>(network: &AgentNetwork, query: &str, out: &mut W) -> std::io::Result<bool>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(format!("Query: {query}\n").as_bytes()).await?;
    let outcome = network.handle_query(query).await;
    out.write_all(render_outcome(query, &outcome).as_bytes()).await?;
    out.write_all(b"\n\n").await?;
    out.flush().await?;
    Ok(!is_failure(&outcome))
}

/// Read lines from `input` until quit or EOF. A line that is not UTF-8 is
/// reported and skipped.
pub async fn run<R, W>(network: &AgentNetwork, mut input: R, out: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        out.write_all(b"Enter your query: ").await?;
        out.flush().await?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            debug!("input closed");
            break;
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                warn!("skipping input line: {e}");
                out.write_all(format!("Error: input is not valid UTF-8 ({e})\n").as_bytes())
                    .await?;
                continue;
            }
        };
        match Command::parse(line) {
            Command::Quit => break,
            Command::Skip => continue,
            Command::Query(query) => {
                run_query(network, &query, out).await?;
            }
        }
    }
    out.write_all(b"\nGoodbye.\n").await?;
    out.flush().await
}
