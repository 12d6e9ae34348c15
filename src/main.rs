use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncWrite, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use trigonet::config::NetworkConfig;
use trigonet::network::AgentNetwork;
use trigonet::repl;

/// Canned queries for `--demo`.
const DEMO_QUERIES: [&str; 9] = [
    "What is the sine of 30 degrees?",
    "Calculate cos(π/4)",
    "Write Python code to calculate sine and cosine",
    "What are the basic trigonometric identities?",
    "Generate a function for the law of cosines",
    "Explain the unit circle",
    "Code for converting degrees to radians",
    "What is tan(45°)?",
    "Show me the double angle formulas",
];

/// Trigonometry assistant network
#[derive(Parser)]
#[command(name = "trigonet")]
#[command(about = "Routes trigonometry queries to calculation, identity and code agents", long_about = None)]
#[command(version)]
struct Cli {
    /// YAML network config (built-in two-agent network when absent)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Debug logging for trigonet
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Ask the LLM for a short summary of each completed result
    #[arg(long, global = true)]
    summarize: bool,

    /// Print LLM and agent reachability, then exit
    #[arg(long)]
    health: bool,

    /// Skip the startup health check
    #[arg(long)]
    no_health: bool,

    /// Run the demo queries before the interactive prompt
    #[arg(long)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle a single query and exit (non-zero status when it fails)
    Query {
        #[arg(required = true, trailing_var_arg = true)]
        words: Vec<String>,
    },
}

fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("trigonet=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<NetworkConfig> {
    let mut config = match path {
        Some(path) => NetworkConfig::load(path)?,
        None => NetworkConfig::default(),
    };
    config.apply_env_overrides();
    config.validate().context("invalid network config")?;
    Ok(config)
}

async fn print_health<W: AsyncWrite + Unpin>(network: &AgentNetwork, out: &mut W) -> Result<()> {
    let entries = network.check_health().await;
    out.write_all(b"Health:\n").await?;
    out.write_all(repl::render_health(&entries).as_bytes()).await?;
    out.write_all(b"\n\n").await?;
    out.flush().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_file.as_deref())?;

    let config = load_config(cli.config.as_deref())?;
    let mut network = AgentNetwork::from_config(&config).context("building agent network")?;
    if cli.summarize {
        if let Some(client) = network.llm_client().cloned() {
            network = network.with_summarizer(Arc::new(client));
        }
    }
    tracing::info!("agents: {}", network.agent_names().join(", "));

    let mut stdout = tokio::io::stdout();

    if cli.health {
        print_health(&network, &mut stdout).await?;
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(Commands::Query { words }) = &cli.command {
        let ok = repl::run_query(&network, &words.join(" "), &mut stdout).await?;
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    stdout
        .write_all(b"=== Trigonometry Assistant Network ===\n\n")
        .await?;
    if !cli.no_health {
        print_health(&network, &mut stdout).await?;
    }

    if cli.demo {
        for query in DEMO_QUERIES {
            repl::run_query(&network, query, &mut stdout).await?;
            stdout.write_all(format!("{}\n", "-".repeat(60)).as_bytes()).await?;
        }
    }

    stdout
        .write_all(b"Interactive mode. Type 'quit' to exit.\n")
        .await?;
    let stdin = BufReader::new(tokio::io::stdin());
    tokio::select! {
        res = repl::run(&network, stdin, &mut stdout) => res?,
        _ = tokio::signal::ctrl_c() => println!("\nGoodbye."),
    }
    Ok(ExitCode::SUCCESS)
}
