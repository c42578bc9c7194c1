use std::path::PathBuf;

use clap::Parser;

use transit_prep::db;
use transit_prep::db::routes::import_routes;
use transit_prep::error::Error;

/// Load per-route JSON files into the dataset database, replacing the
/// routes, coordinates and route_stops tables.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Target sqlite database
    #[arg(long)]
    db_path: PathBuf,

    /// Directory of route description (.json) files
    #[arg(long)]
    routes_dir: PathBuf,
}

fn run(args: Args) -> Result<(), Error> {
    let mut conn = db::open(&args.db_path)?;
    let summary = import_routes(&mut conn, &args.routes_dir)?;
    log::info!(
        "Imported {} routes ({} coordinates, {} route stops) into {}",
        summary.routes,
        summary.coordinates,
        summary.route_stops,
        args.db_path.display()
    );
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
