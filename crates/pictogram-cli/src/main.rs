use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pictogram_application::ExportFormat;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pictogram")]
#[command(about = "Pictogram - turn short descriptions into monochrome SVG icons", long_about = None)]
struct Cli {
    /// Use this directory instead of the platform config/data directories
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a prompt through the strategy chain
    Generate {
        prompt: String,
        /// Style preset or custom style name
        #[arg(long)]
        style: Option<String>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
        /// Recolor the SVG for display (currentColor, scalable)
        #[arg(long)]
        for_display: bool,
        /// Do not record the result in the history
        #[arg(long)]
        no_history: bool,
    },
    /// Generate with the image model directly, surfacing every error
    Ai {
        prompt: String,
        #[arg(long)]
        style: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Score the built-in icon index against a query
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Trace a local image file or an image URL into an SVG icon
    Trace {
        image: String,
        #[arg(long)]
        json: bool,
    },
    /// Pretty-print an SVG file
    Format { file: PathBuf },
    /// Export an SVG file as a black icon of the given size
    Export {
        file: PathBuf,
        #[arg(long, default_value_t = 24)]
        size: u32,
        #[arg(long, default_value = "svg")]
        format: ExportFormat,
        /// Output path (defaults to icon-{size}x{size}.{format})
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show or clear the generation history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List items, most recent first
    List {
        #[arg(long)]
        json: bool,
    },
    /// Remove every item
    Clear,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "pictogram=debug" } else { "pictogram=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let base_dir = cli.base_dir.as_deref();

    match cli.command {
        Commands::Generate {
            prompt,
            style,
            json,
            for_display,
            no_history,
        } => {
            let options = commands::generate::GenerateOptions {
                json,
                for_display,
                record_history: !no_history,
            };
            commands::generate::run(base_dir, &prompt, style, options).await?
        }
        Commands::Ai {
            prompt,
            style,
            json,
        } => commands::generate::run_ai(base_dir, &prompt, style, json).await?,
        Commands::Search { query, json } => commands::search::run(&query, json)?,
        Commands::Trace { image, json } => commands::trace::run(base_dir, &image, json).await?,
        Commands::Format { file } => commands::format::run(&file).await?,
        Commands::Export {
            file,
            size,
            format,
            out,
        } => commands::export::run(&file, size, format, out).await?,
        Commands::History { action } => match action {
            HistoryAction::List { json } => commands::history::list(base_dir, json).await?,
            HistoryAction::Clear => commands::history::clear(base_dir).await?,
        },
    }

    Ok(())
}
