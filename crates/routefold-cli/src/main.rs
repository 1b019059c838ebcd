mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "routefold")]
#[command(version, about = "routefold CLI - flatten file-based routes into a route table", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = routefold::config::CONFIG_FILE)]
    config: PathBuf,

    /// Read the route tree from a JSON file instead of scanning the pages directory
    #[arg(long, global = true)]
    tree: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the route table as JSON
    Build {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print the route tree before flattening
    Tree,

    /// List every route in the final table
    List,

    /// Check menus and page reachability against the route table
    Check {
        /// Treat unreachable pages as errors
        #[arg(long)]
        strict: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project = commands::Project::load(&cli.config, cli.tree.as_deref())?;

    // Execute command
    match cli.command {
        Commands::Build { out, pretty } => {
            commands::build::execute(&project, out.as_deref(), pretty)?;
        }
        Commands::Tree => {
            commands::tree::execute(&project);
        }
        Commands::List => {
            commands::list::execute(&project)?;
        }
        Commands::Check { strict } => {
            commands::check::execute(&project, strict)?;
        }
    }

    Ok(())
}
