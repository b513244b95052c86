use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codec::{encode, Limits, MediaResolution};
use quest::Dialect;
use questctl::{
    enrich_from_donor, load_log, load_quest, simulate, summarize, verify, DirResolver,
    QuestSummary,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "questctl",
    version,
    about = "Inspect, convert, play and verify quest files"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a quest file.
    Inspect {
        /// Path to the quest file.
        quest: PathBuf,
        #[arg(long, value_enum, default_value_t = DialectArg::Modern)]
        dialect: DialectArg,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Re-encode a quest as a modern rich file.
    Convert {
        /// Path to the source quest file.
        input: PathBuf,
        /// Path of the file to write.
        output: PathBuf,
        /// Dialect of the source file.
        #[arg(long, value_enum, default_value_t = DialectArg::Modern)]
        dialect: DialectArg,
        /// Embed media found in this directory.
        #[arg(long)]
        assets: Option<PathBuf>,
        /// Copy media references from this modern quest file.
        #[arg(long)]
        donor: Option<PathBuf>,
    },
    /// Play a quest deterministically and print the game log as JSON.
    Simulate {
        /// Path to the quest file.
        quest: PathBuf,
        #[arg(long, value_enum, default_value_t = DialectArg::Modern)]
        dialect: DialectArg,
        /// Session seed; a random one is generated when omitted.
        #[arg(long)]
        seed: Option<String>,
        /// Comma-separated indices into the offered jumps, one per step.
        #[arg(long, value_delimiter = ',')]
        choices: Vec<usize>,
        /// Stop after this many choices.
        #[arg(long, default_value_t = 1000)]
        max_steps: usize,
        /// Write the log here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replay a game log and check that it ends in a win.
    Verify {
        /// Path to the quest file.
        quest: PathBuf,
        /// Path to the JSON game log.
        log: PathBuf,
        #[arg(long, value_enum, default_value_t = DialectArg::Modern)]
        dialect: DialectArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DialectArg {
    Legacy,
    Modern,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Legacy => Self::Legacy,
            DialectArg::Modern => Self::Modern,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Inspect {
            quest,
            dialect,
            format,
        } => {
            let quest = load_quest(&quest, dialect.into())?;
            let summary = summarize(&quest);
            match format {
                OutputFormat::Json => {
                    let json =
                        serde_json::to_string_pretty(&summary).context("serialize json")?;
                    println!("{json}");
                }
                OutputFormat::Pretty => print_summary(&summary),
            }
        }
        Command::Convert {
            input,
            output,
            dialect,
            assets,
            donor,
        } => {
            let mut quest = load_quest(&input, dialect.into())?;
            if let Some(donor) = donor {
                let donor = load_quest(&donor, Dialect::Modern).context("load donor")?;
                let (enriched, warnings) = enrich_from_donor(&quest, &donor)?;
                if warnings > 0 {
                    warn!(warnings, "donor media partially applied");
                }
                quest = enriched;
            }
            let resolver = assets.map(DirResolver::new);
            let media = resolver
                .as_ref()
                .map_or(MediaResolution::References, |resolver| {
                    MediaResolution::Embed(resolver)
                });
            let bytes = encode(&quest, &media, &Limits::default()).context("encode quest")?;
            fs::write(&output, &bytes)
                .with_context(|| format!("write quest {}", output.display()))?;
            info!(bytes = bytes.len(), path = %output.display(), "quest written");
        }
        Command::Simulate {
            quest,
            dialect,
            seed,
            choices,
            max_steps,
            out,
        } => {
            let quest = load_quest(&quest, dialect.into())?;
            let state = simulate(&quest, seed.as_deref(), &choices, max_steps)?;
            eprintln!(
                "status: {} after {} steps (seed {})",
                state.status(),
                state.log().entries.len(),
                state.seed()
            );
            let json = serde_json::to_string_pretty(state.log()).context("serialize log")?;
            match out {
                Some(path) => fs::write(&path, json)
                    .with_context(|| format!("write log {}", path.display()))?,
                None => println!("{json}"),
            }
        }
        Command::Verify {
            quest,
            log,
            dialect,
        } => {
            let quest = load_quest(&quest, dialect.into())?;
            let log = load_log(&log)?;
            let verdict = verify(&quest, &log)?;
            let json = serde_json::to_string_pretty(&verdict).context("serialize verdict")?;
            println!("{json}");
            if !verdict.verified {
                anyhow::bail!("log replays to {} instead of a win", verdict.status);
            }
        }
    }
    Ok(())
}

fn print_summary(summary: &QuestSummary) {
    println!("fingerprint: {}", summary.fingerprint);
    println!(
        "dialect: {} difficulty: {}",
        summary.dialect, summary.difficulty
    );
    println!(
        "params: {} locations: {} jumps: {} start: {}",
        summary.params, summary.locations, summary.jumps, summary.start
    );
    if !summary.media.is_empty() {
        println!("media:");
        for name in &summary.media {
            let marker = if summary.embedded.contains(name) {
                " (embedded)"
            } else {
                ""
            };
            println!("  {name}{marker}");
        }
    }
}
