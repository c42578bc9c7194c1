use std::path::PathBuf;

use clap::Parser;

use transit_prep::db;
use transit_prep::db::stops::{import_stops, read_stops};
use transit_prep::error::Error;

/// Load the stop listing into the dataset database, replacing the stops
/// table.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Target sqlite database
    #[arg(long)]
    db_path: PathBuf,

    /// Stop listing (.tsv) to import
    #[arg(long)]
    stops_path: PathBuf,
}

fn run(args: Args) -> Result<(), Error> {
    let stops = read_stops(&args.stops_path)?;
    log::info!("Read {} stops from {}", stops.len(), args.stops_path.display());

    let mut conn = db::open(&args.db_path)?;
    let inserted = import_stops(&mut conn, &stops)?;
    log::info!("Imported {} stops into {}", inserted, args.db_path.display());
    Ok(())
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1)
    }
}
