mod config;
mod simulate;

use clap::{Parser, Subcommand};
use colloquy_channels::TerminalParticipant;
use colloquy_core::Participant;
use colloquy_session::{FileOutcomeStore, OutcomeStore};
use colloquy_world::{DialogTask, SessionSummary};
use config::ColloquyConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "colloquy", about = "Colloquy: paired dialogue collection")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "colloquy.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SessionArgs {
    /// Tag the session as a sandbox run
    #[arg(long, conflicts_with = "live")]
    sandbox: bool,
    /// Tag the session as a live run
    #[arg(long)]
    live: bool,
    /// Turn budget (overrides config)
    #[arg(long)]
    max_turns: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Two workers take turns on this terminal
    Run {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Dry run with two scripted workers
    Simulate {
        #[command(flatten)]
        session: SessionArgs,
        /// Lines each scripted worker says
        #[arg(long, default_value_t = 5)]
        lines: usize,
        /// Make the second worker return its HIT
        #[arg(long)]
        drop_out: bool,
    },
    /// List saved sessions
    List,
    /// Print a saved session
    Show {
        /// File name inside the data directory, or a path
        file: PathBuf,
    },
}

fn apply(config: &mut ColloquyConfig, session: &SessionArgs) {
    if session.sandbox {
        config.task.sandbox = true;
    }
    if session.live {
        config.task.sandbox = false;
    }
    if let Some(max_turns) = session.max_turns {
        config.task.max_turns = max_turns;
    }
}

fn report(summary: &SessionSummary) {
    let status = if summary.outcome.completed {
        "complete"
    } else {
        "incomplete"
    };
    println!(
        "Session {} {} after {} turn(s), saved to {}",
        summary.outcome.session_id,
        status,
        summary.turns,
        summary.path.display()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let mut config = ColloquyConfig::load(&cli.config).await?;
    let store = Arc::new(FileOutcomeStore::new(config.data_dir.clone()));

    match cli.command {
        Commands::Run { session } => {
            apply(&mut config, &session);
            info!(kind = %config.task.session_kind(), "Starting terminal session");

            let task = DialogTask::new(config.task, config.onboarding, store);
            let [first, second] = TerminalParticipant::stdio_pair("worker_1", "worker_2");
            let participants: Vec<Arc<dyn Participant>> = vec![Arc::new(first), Arc::new(second)];

            // One terminal, so onboard one worker at a time.
            for participant in &participants {
                task.run_onboard(participant.clone()).await?;
            }
            let summary = task.run_conversation(participants).await?;
            report(&summary);
        }
        Commands::Simulate {
            session,
            lines,
            drop_out,
        } => {
            apply(&mut config, &session);
            info!(lines, drop_out, "Starting simulated session");

            let task = DialogTask::new(config.task, config.onboarding, store);
            let participants = simulate::scripted_pair(lines, drop_out).await?;
            let summary = task.run(participants).await?;
            report(&summary);
        }
        Commands::List => {
            let paths = store.list().await?;
            if paths.is_empty() {
                println!("No saved sessions in {}", config.data_dir.display());
            } else {
                for path in &paths {
                    if let Some(name) = path.file_name() {
                        println!("  {}", name.to_string_lossy());
                    }
                }
                println!("\nTotal: {} session(s)", paths.len());
            }
        }
        Commands::Show { file } => {
            let path = if file.exists() {
                file
            } else {
                config.data_dir.join(file)
            };
            let record = store.load(&path).await?;
            println!("Session:     {}", record.session_id);
            println!("Kind:        {}", record.session_kind);
            println!("Completed:   {}", record.completed);
            println!("Workers:     {}", record.workers.join(", "));
            if !record.bad_workers.is_empty() {
                println!("Bad workers: {}", record.bad_workers.join(", "));
            }
            println!();
            for entry in record.dialog.entries() {
                let speaker = record
                    .workers
                    .get(entry.speaker())
                    .map_or("?", String::as_str);
                println!("[{}] {}: {}", entry.speaker(), speaker, entry.text());
            }
        }
    }

    Ok(())
}
