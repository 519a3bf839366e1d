//! tour-dl command-line entry point
//!
//! Parses the invocation surface, installs the logging subscriber, loads
//! configuration, wires the collaborators together, and runs one export.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tour_dl::{
    Config, Database, Downloader, Error, LocalTransfer, MediaResolver, NoopTransfer, Printer,
    ScpTransfer, TourStore, Transfer, TransferMode, TreeBuilder,
};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Export tour content and download media archives
#[derive(Debug, Parser)]
#[command(name = "tour-dl", version, about)]
struct Cli {
    /// Tour id to process
    tour_id: i64,

    /// Download behavior: "yes" (secure copy), "local" (filesystem copy)
    /// or "no" (skip downloads)
    #[arg(short = 'i', long = "imagefiles", default_value = "no")]
    imagefiles: String,

    /// Path to a JSON configuration file
    #[arg(long, default_value = "tour-dl.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!(error = %e, "export failed");
        let code = match e {
            Error::BadArguments(_) => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> tour_dl::Result<()> {
    // Mode is validated before anything touches the network or database
    let mode = TransferMode::parse(&cli.imagefiles)?;
    let config = Config::load_or_default(&cli.config)?;

    let strategy: Box<dyn Transfer> = match mode {
        TransferMode::Scp => {
            let scp = ScpTransfer::new(&config.transfer);
            if scp.locate_program().is_none() {
                warn!(
                    command = %config.transfer.command,
                    "transfer program not found in PATH, transfers will fail per item"
                );
            }
            Box::new(scp)
        }
        TransferMode::Local => Box::new(LocalTransfer),
        TransferMode::Noop => Box::new(NoopTransfer),
    };

    let store: Arc<dyn TourStore> = Arc::new(Database::connect(&config.database).await?);
    let downloader = Downloader::new(strategy, cli.tour_id, &config.media.output_root)?;
    let resolver = MediaResolver::new(store.clone(), config.media.clone())?;
    let builder = TreeBuilder::new(store, resolver, downloader);

    let tour = builder.build_tour(cli.tour_id).await?;

    let mut printer = Printer::new();
    let stdout = std::io::stdout();
    printer.print_tour(&mut stdout.lock(), &tour)?;
    printer.write_summary(&PathBuf::from(format!("summary-tour-{}.txt", cli.tour_id)))?;

    Ok(())
}
