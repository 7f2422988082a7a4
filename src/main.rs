//! Binary entry point: parse arguments, load the starting file, and either
//! print the list or hand it to the terminal UI.
use std::path::PathBuf;

use clap::Parser;
use list_manager::config::DEFAULT_FILE;
use list_manager::{logging, run_app, App, RowStore, StoreConfig};

/// Manage a small fixed-width list stored as CSV.
#[derive(Parser, Debug)]
#[command(name = "list-manager", version, about)]
struct Cli {
    /// CSV file to open at start-up.
    #[arg(default_value = DEFAULT_FILE)]
    file: PathBuf,

    /// Print the list as a table and exit instead of starting the UI.
    #[arg(long)]
    print: bool,

    /// Start with an empty list instead of loading FILE.
    #[arg(long, conflicts_with = "print")]
    no_load: bool,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    let mut store = RowStore::new(StoreConfig::default());

    if cli.print {
        let report = store.load(&cli.file)?;
        for warning in &report.warnings {
            eprintln!("{warning}");
        }
        println!("{}", store.display_pretty());
        return Ok(());
    }

    let mut app = App::new(store);
    if !cli.no_load {
        app.load_file(&cli.file);
    }
    run_app(&mut app)
}
