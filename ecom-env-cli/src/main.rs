use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ecom_env_cli::commands::{check, keys, render, show};

#[derive(Parser)]
#[command(name = "ecom-env", version, about = "Inspect, check and render the shop environment configuration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Source {
    /// Profile to load (overridden by ECOM_PROFILE)
    #[arg(short, long, default_value = "dev")]
    profile: String,
    /// Directory holding application*.yaml and .env files
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved environment as JSON
    Show {
        #[command(flatten)]
        source: Source,
    },
    /// Report missing or invalid keys
    Check {
        #[command(flatten)]
        source: Source,
    },
    /// Write the environment as JSON or as an environment.ts module
    Render {
        #[command(flatten)]
        source: Source,
        /// Output format: json or ts
        #[arg(short, long, default_value = "ts")]
        format: String,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List every configuration key with its environment variable
    Keys,
}

fn main() {
    ecom_env::init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Show { source } => show::run(&source.dir, &source.profile),
        Commands::Check { source } => check::run(&source.dir, &source.profile),
        Commands::Render {
            source,
            format,
            output,
        } => render::run(&source.dir, &source.profile, &format, output.as_deref()),
        Commands::Keys => keys::run(),
    };

    if let Err(e) = result {
        eprintln!("{}", colored::Colorize::red(format!("Error: {e}").as_str()));
        std::process::exit(1);
    }
}
