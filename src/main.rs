use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use autoversion::cli::{
    run_chlog, run_current, run_release, ChlogArgs, CurrentArgs, HistorySource, ReleaseArgs,
};
use autoversion::{config, ui};

#[derive(Parser)]
#[command(
    name = "autoversion",
    version,
    about = "Compute semantic versions and changelogs from conventional commit history"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Calculate the current version from the commit history and the last version
    Current {
        #[arg(long, help = "The last released version")]
        last: Option<String>,

        #[command(flatten)]
        history: HistoryArgs,
    },
    /// Generate the changelog for all versions found in the commit history
    Chlog {
        #[arg(long, help = "The last released version")]
        last: Option<String>,

        #[arg(long, alias = "chlog_file", help = "The existing changelog file")]
        chlog_file: Option<PathBuf>,

        #[arg(long, help = "Print the changelog instead of updating the file")]
        noupdate: bool,

        #[command(flatten)]
        history: HistoryArgs,
    },
    /// Print release notes for the current version
    Release {
        #[arg(long, help = "The current version")]
        current: String,

        #[command(flatten)]
        history: HistoryArgs,
    },
}

#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct HistoryArgs {
    #[arg(long, alias = "commit_hist", value_name = "FILE", help = "The commit history file")]
    commit_hist: Option<String>,

    #[arg(value_name = "-", value_parser = ["-"], help = "Read the commit history from stdin")]
    stdin: Option<String>,
}

impl HistoryArgs {
    fn source(&self) -> HistorySource {
        match &self.commit_hist {
            Some(path) => HistorySource::from_arg(path),
            None => HistorySource::Stdin,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref()).context("Error loading config")?;

    match cli.command {
        Command::Current { last, history } => {
            let args = CurrentArgs {
                last,
                history: history.source(),
            };
            let version = run_current(&args, &config).context("Failed to compute version")?;
            println!("{}", version);
        }
        Command::Chlog {
            last,
            chlog_file,
            noupdate,
            history,
        } => {
            let args = ChlogArgs {
                last,
                chlog_file,
                noupdate,
                history: history.source(),
            };
            let outcome = run_chlog(&args, &config).context("Failed to generate changelog")?;

            for warning in &outcome.warnings {
                ui::display_boundary_warning(warning);
            }

            if outcome.written {
                ui::display_version_change(&outcome.base_version, &outcome.version);
                ui::display_success(&format!("Updated {}", outcome.path.display()));
                println!("{}", outcome.version);
            } else {
                ui::display_status(&format!(
                    "Changelog generated on top of v{}",
                    outcome.base_version
                ));
                println!("{}", outcome.changelog);
            }
        }
        Command::Release { current, history } => {
            let args = ReleaseArgs {
                current,
                history: history.source(),
            };
            let lines = run_release(&args, &config).context("Failed to render release notes")?;
            println!("{}", lines.join("\n"));
        }
    }

    Ok(())
}
