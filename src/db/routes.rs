//! Route import: every `*.json` file in the route directory describes one
//! route with its shape polyline and the stops it serves.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, Transaction};
use serde::Deserialize;

use crate::error::Error;

/// On-disk route description.
#[derive(Debug, Deserialize)]
pub struct RouteFile {
    /// Display name of the line, e.g. "36"
    pub route_id: String,
    pub color: String,
    pub name: String,
    pub shape: Shape,
    pub stops: Vec<StopRef>,
}

/// GeoJSON-shaped wrapper around the route polyline.
#[derive(Debug, Deserialize)]
pub struct Shape {
    pub geometry: Geometry,
}

/// Route polyline, coordinates in GeoJSON `[lng, lat]` order.
#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub coordinates: Vec<[f64; 2]>,
}

/// Stop reference; some route files carry these as numbers, some as
/// numeric strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StopRef {
    Number(i64),
    Text(String),
}

/// Counts reported by a route import run.
#[derive(Debug, Default, Clone, Copy)]
pub struct RouteImportSummary {
    pub routes: usize,
    pub coordinates: usize,
    pub route_stops: usize,
}

const CREATE_ROUTES: &str = "
    CREATE TABLE routes (
        id             INTEGER PRIMARY KEY NOT NULL,
        route_id_name  TEXT    NOT NULL,
        color          TEXT    NOT NULL,
        name           TEXT    NOT NULL
    )";

const CREATE_COORDINATES: &str = "
    CREATE TABLE coordinates (
        id        INTEGER PRIMARY KEY NOT NULL,
        route_id  INTEGER NOT NULL,
        lat       REAL    NOT NULL,
        lng       REAL    NOT NULL,
        FOREIGN KEY (route_id) REFERENCES routes(id)
    )";

const CREATE_ROUTE_STOPS: &str = "
    CREATE TABLE route_stops (
        id        INTEGER PRIMARY KEY NOT NULL,
        route_id  INTEGER NOT NULL,
        stop_id   INTEGER NOT NULL,
        FOREIGN KEY (route_id) REFERENCES routes(id),
        FOREIGN KEY (stop_id)  REFERENCES stops(id)
    )";

/// Lists route description files (`*.json`) in `dir`, sorted by file name
/// so import order is stable across runs.
pub fn route_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let entries = fs::read_dir(dir).map_err(|e| Error::NamedFileIO {
        file_name: dir.display().to_string(),
        source: Box::new(e),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().map_or(false, |ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Decodes one route description file.
pub fn read_route(path: &Path) -> Result<RouteFile, Error> {
    let bytes = fs::read(path).map_err(|e| Error::NamedFileIO {
        file_name: path.display().to_string(),
        source: Box::new(e),
    })?;
    serde_json::from_slice(&bytes).map_err(|e| Error::Json {
        file_name: path.display().to_string(),
        source: e,
    })
}

/// Drops and recreates the route tables, then loads every route file in
/// `dir`. The whole import commits as one transaction.
pub fn import_routes(conn: &mut Connection, dir: &Path) -> Result<RouteImportSummary, Error> {
    let files = route_files(dir)?;

    let tx = conn.transaction()?;

    // Drop in dependency-safe order
    tx.execute("DROP TABLE IF EXISTS route_stops", [])?;
    tx.execute("DROP TABLE IF EXISTS coordinates", [])?;
    tx.execute("DROP TABLE IF EXISTS routes", [])?;

    tx.execute(CREATE_ROUTES, [])?;
    tx.execute(CREATE_COORDINATES, [])?;
    tx.execute(CREATE_ROUTE_STOPS, [])?;

    // The consuming app looks these indexes up by exactly these names
    tx.execute(
        "CREATE INDEX IF NOT EXISTS index_route_stops_route_id ON route_stops(route_id)",
        [],
    )?;
    tx.execute(
        "CREATE INDEX IF NOT EXISTS index_route_stops_stop_id ON route_stops(stop_id)",
        [],
    )?;

    let mut summary = RouteImportSummary::default();
    for path in &files {
        let route = read_route(path)?;
        insert_route(&tx, path, &route, &mut summary)?;
    }

    tx.commit()?;
    Ok(summary)
}

fn insert_route(
    tx: &Transaction,
    path: &Path,
    route: &RouteFile,
    summary: &mut RouteImportSummary,
) -> Result<(), Error> {
    tx.execute(
        "INSERT INTO routes (route_id_name, color, name) VALUES (?1, ?2, ?3)",
        params![route.route_id, route.color, route.name],
    )?;
    let route_rowid = tx.last_insert_rowid();

    {
        let mut stmt =
            tx.prepare("INSERT INTO coordinates (route_id, lat, lng) VALUES (?1, ?2, ?3)")?;
        // Shape coordinates arrive [lng, lat]; the table stores (lat, lng)
        for [lng, lat] in &route.shape.geometry.coordinates {
            stmt.execute(params![route_rowid, lat, lng])?;
            summary.coordinates += 1;
        }
    }

    {
        let mut stmt =
            tx.prepare("INSERT INTO route_stops (route_id, stop_id) VALUES (?1, ?2)")?;
        for stop in &route.stops {
            let stop_id = match stop {
                StopRef::Number(n) => *n,
                StopRef::Text(s) => s.trim().parse().map_err(|_| Error::BadStopRef {
                    file_name: path.display().to_string(),
                    stop_ref: s.clone(),
                })?,
            };
            stmt.execute(params![route_rowid, stop_id])?;
            summary.route_stops += 1;
        }
    }

    summary.routes += 1;
    Ok(())
}
