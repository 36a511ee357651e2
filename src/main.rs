// ABOUTME: Main entry point for the slide-extractor program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;
use slide_extractor::config::DEFAULT_SETTINGS_FILE_NAME;
use slide_extractor::{Settings, WatchConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "slide-extractor",
    version,
    disable_version_flag = true,
    about = "Extracts reveal.js slides from markdown.",
    long_about = None
)]
struct Cli {
    /// The working directory (defaults to the current directory)
    #[arg(
        short = 'd',
        long = "workingdir",
        default_value = ".",
        env = "SLIDE_EXTRACTOR_WORKDIR",
        global = true
    )]
    working_dir: PathBuf,

    /// The properties file to read the settings from
    #[arg(
        short = 'p',
        long = "properties",
        default_value = DEFAULT_SETTINGS_FILE_NAME,
        env = "SLIDE_EXTRACTOR_PROPERTIES",
        global = true
    )]
    properties: PathBuf,

    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// Do not require reveal.js to be checked out in the output directory
    #[arg(long, global = true)]
    skip_reveal_check: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract slides once and write the presentations and index page (default)
    Run,

    /// Extract slides, then regenerate whenever a lesson or the template changes
    Watch(WatchArgs),
}

#[derive(Args)]
struct WatchArgs {
    /// Serve the output directory over HTTP
    #[arg(long)]
    serve: bool,

    /// Port for the HTTP server
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Debounce time for file changes, in milliseconds
    #[arg(long, default_value_t = 500)]
    debounce_ms: u64,
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    info!("Working directory is: {}", cli.working_dir.display());
    let settings = Settings::load(&cli.working_dir, &cli.properties).with_context(|| {
        format!(
            "Failed to load settings from {:?} in {:?}",
            cli.properties, cli.working_dir
        )
    })?;
    info!("SlideExtractor version: {}", env!("CARGO_PKG_VERSION"));

    if !cli.skip_reveal_check {
        slide_extractor::check_reveal_present(&settings)?;
    }

    match &cli.command {
        None | Some(Commands::Run) => {
            let summary = slide_extractor::run(&settings)?;
            info!(
                "Wrote {} presentations and index page {}",
                summary.written.len(),
                summary.index.display()
            );
            summary.ensure_success()?;
        }
        Some(Commands::Watch(args)) => {
            let config = WatchConfig {
                debounce_ms: args.debounce_ms,
                serve: args.serve,
                port: args.port,
            };
            slide_extractor::watch_lessons(&settings, &config)?;
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    if let Err(e) = execute(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
