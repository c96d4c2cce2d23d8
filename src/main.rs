//! SIMpol CLI - terminal workbench demo

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

use simpol::{FixSuggestion, RevealState, WorkbenchConfig, WorkbenchError, WorkbenchSession};

#[derive(Parser)]
#[command(name = "simpol")]
#[command(about = "SIMpol - reorderable agent panels and a timed orchestrator log")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive workbench (default)
    Tui {
        /// Skip the landing view and open the workbench with this prompt
        #[arg(short, long)]
        prompt: Option<String>,

        /// Path to a workbench YAML config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run a session headless, printing thoughts as they are revealed
    Run {
        /// Prompt for the session
        #[arg(short, long)]
        prompt: String,

        /// Path to a workbench YAML config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the reveal interval
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Emit JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// Validate a workbench config file
    Check {
        /// Path to the YAML file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui {
        prompt: None,
        config: None,
    });

    // The TUI owns the screen; keep its log output quiet by default
    let default_level = match command {
        Commands::Tui { .. } => tracing::Level::WARN,
        _ => tracing::Level::INFO,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level.to_string())),
        )
        .init();

    let result: anyhow::Result<()> = match command {
        Commands::Tui { prompt, config } => match load_config(config.as_ref()) {
            Ok(config) => simpol::tui::run(config, prompt).await,
            Err(e) => Err(e.into()),
        },
        Commands::Run {
            prompt,
            config,
            interval_ms,
            json,
        } => run_headless(&prompt, config.as_ref(), interval_ms, json)
            .await
            .map_err(Into::into),
        Commands::Check { file } => check_config(&file).map_err(Into::into),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e
            .downcast_ref::<WorkbenchError>()
            .and_then(|w| w.fix_suggestion())
        {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<WorkbenchConfig, WorkbenchError> {
    match path {
        Some(path) => WorkbenchConfig::from_path(path),
        None => Ok(WorkbenchConfig::default()),
    }
}

async fn run_headless(
    prompt: &str,
    config_path: Option<&PathBuf>,
    interval_ms: Option<u64>,
    json: bool,
) -> Result<(), WorkbenchError> {
    let mut config = load_config(config_path)?;
    if let Some(ms) = interval_ms {
        config.interval_ms = ms;
    }

    let session = WorkbenchSession::open(prompt, &config)?;
    if !json {
        println!("{} Prompt: {}", "→".cyan(), session.prompt().as_str().bold());
        println!("{}", "Orchestrator Thoughts:".cyan().bold());
    }

    let mut updates = WatchStream::new(session.reveal().subscribe());
    let mut printed = 0;
    loop {
        tokio::select! {
            update = updates.next() => {
                let Some(progress) = update else { break };
                for (index, thought) in progress.log().iter().enumerate().skip(printed) {
                    if json {
                        println!("{}", serde_json::json!({ "index": index, "thought": thought }));
                    } else {
                        println!("  {} {}", "•".dimmed(), thought);
                    }
                }
                printed = progress.cursor();
                if progress.state().is_terminal() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                session.reveal().stop();
                break;
            }
        }
    }

    let state = session.reveal_state();
    let order = session.close();
    let ids = order.ids();

    if json {
        println!(
            "{}",
            serde_json::json!({
                "state": state.to_string(),
                "panels": ids,
                "layout": order.as_slice(),
            })
        );
    } else {
        let marker = match state {
            RevealState::Complete => "✓".green(),
            _ => "■".yellow(),
        };
        println!("{} {}", marker, state);
        println!("{} {}", "Panels:".cyan().bold(), ids.join(", "));
    }

    Ok(())
}

fn check_config(file: &PathBuf) -> Result<(), WorkbenchError> {
    let config = WorkbenchConfig::from_path(file)?;

    println!("{} Config '{}' is valid", "✓".green(), file.display());
    println!("  Interval: {}ms", config.interval_ms);
    println!("  Thoughts: {}", config.thoughts.len());
    println!(
        "  Panels: {}",
        config
            .panels
            .iter()
            .map(|p| format!("{} ({})", p.id, p.kind))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(())
}
