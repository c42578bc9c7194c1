use std::path::PathBuf;

use clap::Parser;

use transit_prep::convert::{convert, ConvertOptions};
use transit_prep::error::Error;

/// Convert a TSV with lat/lng columns to a GeoJSON FeatureCollection of
/// Points.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input .tsv path
    input: PathBuf,

    /// Output .geojson path
    output: PathBuf,

    /// Latitude column name
    #[arg(long, default_value = "lat")]
    lat: String,

    /// Longitude column name
    #[arg(long, default_value = "lng")]
    lon: String,

    /// ID column name used for Feature.id
    #[arg(long, default_value = "id")]
    id: String,

    /// Columns to keep as properties (default: all except lat/lon/id)
    #[arg(long, num_args = 0..)]
    keep: Option<Vec<String>>,
}

fn run(args: Args) -> Result<(), Error> {
    let Args {
        input,
        output,
        lat,
        lon,
        id,
        keep,
    } = args;

    let opts = ConvertOptions {
        lat_field: lat,
        lon_field: lon,
        id_field: id,
        keep_fields: keep,
    };

    let summary = convert(&input, &output, &opts)?;
    log::info!("Wrote {} features to {}", summary.features, output.display());
    log::debug!("Skipped {} rows without valid coordinates", summary.skipped);
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
