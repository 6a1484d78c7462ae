//! texty CLI — review textbook problems and track how they went.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use texty_core::StorageEncoding;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod default_file;
mod problem_ref;
mod session;

#[derive(Parser)]
#[command(name = "texty", version, about = "Textbook reviewing utility")]
struct Cli {
    #[command(flatten)]
    globals: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Book to work on (extension optional); falls back to the stored default
    #[arg(short, long, global = true)]
    file: Option<String>,

    /// Storage encoding: text or blob
    #[arg(long, global = true)]
    encoding: Option<StorageEncoding>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter texty.toml
    Init,

    /// Create an empty book
    New,

    /// Add problem sets, e.g. "2.1:39" or "2.1:39:10" (chapter.section:problems[:page])
    Add {
        #[arg(required = true)]
        sets: Vec<String>,
    },

    /// Record answers, e.g. "6.5:15" (chapter.section:problem)
    Mark {
        /// Problems answered correctly
        #[arg(short, long, num_args = 1..)]
        correct: Vec<String>,

        /// Problems answered incorrectly
        #[arg(short, long, num_args = 1..)]
        incorrect: Vec<String>,

        /// Also write a dated text copy (<name>_<YYYY-MM-DD>.txt)
        #[arg(short, long)]
        timestamp: bool,
    },

    /// Draw problems, weighted toward the weakest sections
    Pick {
        /// Number of problems to draw
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Only odd-numbered problems
        #[arg(short, long, conflicts_with = "even")]
        odd: bool,

        /// Only even-numbered problems
        #[arg(short, long)]
        even: bool,
    },

    /// Print every problem set
    List {
        /// Order by chapter and section instead of stored order
        #[arg(long)]
        by_section: bool,
    },

    /// Print descriptive statistics
    Stats {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show or set the default book
    Default {
        /// New default (no extension)
        name: Option<String>,
    },

    /// Save the book in another encoding
    Export {
        /// Target encoding: text or blob
        #[arg(long)]
        to: StorageEncoding,

        /// Add today's date to the file name
        #[arg(short, long)]
        timestamp: bool,
    },

    /// Rewrite a whitespace-separated file with tab separators
    Normalize {
        /// File to rewrite in place
        path: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("texty=info,texty_core=info")),
        )
        .init();

    let cli = Cli::parse();

    // init must work even when an existing config does not parse
    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        command => session::Session::build(
            cli.globals.file,
            cli.globals.encoding,
            cli.globals.config.as_deref(),
        )
        .and_then(|session| run(&session, command)),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(session: &session::Session, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Init => commands::init::execute(),
        Commands::New => commands::new::execute(session),
        Commands::Add { sets } => commands::add::execute(session, &sets),
        Commands::Mark {
            correct,
            incorrect,
            timestamp,
        } => commands::mark::execute(session, &correct, &incorrect, timestamp),
        Commands::Pick { count, odd, even } => commands::pick::execute(session, count, odd, even),
        Commands::List { by_section } => commands::list::execute(session, by_section),
        Commands::Stats { format } => commands::stats::execute(session, &format),
        Commands::Default { name } => commands::set_default::execute(session, name),
        Commands::Export { to, timestamp } => commands::export::execute(session, to, timestamp),
        Commands::Normalize { path } => commands::normalize::execute(&path),
    }
}
