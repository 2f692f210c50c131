// ABOUTME: Main entry point for the slideshot program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use slideshot::{Config, SlideConverter, SlideOrder};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a slide deck into one PNG per slide
    Convert(ConvertArgs),

    /// Print the LibreOffice executable that would be used
    Locate(EngineArgs),
}

#[derive(Args)]
struct EngineArgs {
    /// Path to the LibreOffice executable (overrides SLIDESHOT_ENGINE)
    #[arg(long)]
    engine: Option<PathBuf>,
}

#[derive(Args)]
struct ConvertArgs {
    /// Path to the presentation file
    #[arg(short, long)]
    input: PathBuf,

    /// Directory that receives the slide images
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    engine: EngineArgs,

    /// Seconds to wait for LibreOffice before killing it (0 waits forever)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Number slides by the numeric value in the engine's file names
    #[arg(long)]
    natural_order: bool,

    /// Use a per-job temporary directory name
    #[arg(long)]
    unique_temp_dir: bool,
}

fn apply_engine(config: &mut Config, args: &EngineArgs) {
    if let Some(engine) = &args.engine {
        config.engine_path = Some(engine.clone());
    }
}

fn run(command: &Commands) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;

    match command {
        Commands::Convert(args) => {
            apply_engine(&mut config, &args.engine);
            if let Some(secs) = args.timeout_secs {
                config.timeout = slideshot::config::timeout_from_secs(secs);
            }
            if args.natural_order {
                config.order = SlideOrder::Natural;
            }
            if args.unique_temp_dir {
                config.unique_temp_dir = true;
            }

            let converter = SlideConverter::new(&config)?;
            let files = converter.convert(&args.input, &args.output)?;
            for file in &files {
                println!("{}", file.display());
            }
            Ok(())
        }
        Commands::Locate(args) => {
            apply_engine(&mut config, args);
            let engine = slideshot::locate(&config.locator_config())?;
            println!("{}", engine);
            Ok(())
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let Some(command) = &cli.command else {
        println!("No command specified. Use --help for usage information.");
        return;
    };

    if let Err(e) = run(command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
