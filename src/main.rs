use clap::{Parser, Subcommand};
use log::{LevelFilter, error};
use publish_manifest::config::{self, DEFAULT_CONFIG_FILE};
use publish_manifest::pipeline::{self, RunOutcome, RunRequest, RunSummary};
use publish_manifest::{output, stamp::VersionStamp};
use simplelog::{Config, SimpleLogger};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "publish-manifest")]
#[command(about = "Build a CDN URL manifest from a folder of PNG/WEBP images")]
#[command(long_about = "\
Build a CDN URL manifest from a folder of PNG/WEBP images

Every image in the source folder is matched against the publish roots in the
config file, top to bottom. The first root that matches turns the local path
into a public URL:

  local_root = /data/Brochures
  base_url   = https://cdn.example/Brochures
  markers    = [\"Brochures\"]

  /data/Brochures/cover.png          → https://cdn.example/Brochures/cover.png?v=…
  /mnt/copy/Brochures/sub/img.webp   → https://cdn.example/Brochures/sub/img.webp?v=…

The URLs are written to <output>/manifest.txt, one per line, replacing any
previous manifest. Images that match no root are skipped and counted.

Run 'publish-manifest gen-config' to print a documented config file.")]
#[command(version)]
struct Cli {
    /// Folder to collect PNG/WEBP images from
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Folder that receives manifest.txt (created if missing)
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    /// Publish-root config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Descend into subfolders of the source folder
    #[arg(short, long, global = true)]
    recursive: bool,

    /// Use this version stamp (YYYYMMDDHHMMSS) instead of the current time
    #[arg(long, global = true)]
    stamp: Option<String>,

    /// Print the run summary as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Turn on verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Collect, map and write manifest.txt
    Build,
    /// Collect and map without writing, to see what would be published
    Check,
    /// List the configured publish roots in match order
    Roots,
    /// Print a documented example config file
    GenConfig,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        // Keep stdout clean for machine-readable output.
        0 if cli.json => LevelFilter::Warn,
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Logging is best-effort; the report itself goes to stdout.
    let _ = SimpleLogger::init(log_level, Config::default());

    if let Err(e) = dispatch(&cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn dispatch(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Build => run(cli, true),
        Command::Check => run(cli, false),
        Command::Roots => {
            let config = config::load_config(&cli.config)?;
            output::print_roots(&config.roots);
            Ok(())
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(())
        }
    }
}

fn run(cli: &Cli, write: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_config(&cli.config)?;
    let stamp = match &cli.stamp {
        Some(s) => VersionStamp::parse(s)?,
        None => VersionStamp::now(),
    };

    let request = RunRequest {
        source: cli.source.clone(),
        destination: cli.output.clone(),
        recursive: cli.recursive,
        write,
    };

    match pipeline::run(&request, &config.roots, stamp.clone())? {
        RunOutcome::Empty { source } => {
            if cli.json {
                println!("{}", output::format_summary_json(&RunSummary::empty(stamp))?);
            } else {
                output::print_empty(&source);
            }
        }
        RunOutcome::Completed(summary) => {
            if cli.json {
                println!("{}", output::format_summary_json(&summary)?);
            } else {
                output::print_run_summary(&summary, cli.verbose > 0);
            }
        }
    }
    Ok(())
}
