//! Stop catalogue import: a tab-separated stop listing replaces the
//! `stops` table wholesale.

use std::path::Path;

use rusqlite::{params, Connection};
use serde::Deserialize;

use crate::error::Error;
use crate::tsv;

/// One row of the stop listing. Field names match the TSV header.
#[derive(Debug, Deserialize, PartialEq)]
pub struct StopRecord {
    pub id: i64,
    pub lat: f64,
    pub lng: f64,
    pub name_en: String,
    pub name_mm: String,
    pub road_en: String,
    pub road_mm: String,
    pub township_en: String,
    pub township_mm: String,
}

const CREATE_STOPS: &str = "
    CREATE TABLE stops (
        id            INTEGER PRIMARY KEY NOT NULL,
        lat           REAL    NOT NULL,
        lng           REAL    NOT NULL,
        name_en       TEXT    NOT NULL,
        name_mm       TEXT    NOT NULL,
        road_en       TEXT    NOT NULL,
        road_mm       TEXT    NOT NULL,
        township_en   TEXT    NOT NULL,
        township_mm   TEXT    NOT NULL
    )";

/// Reads the stop listing, coercing id/lat/lng to their column types.
/// A row that fails to coerce aborts the read.
pub fn read_stops(path: &Path) -> Result<Vec<StopRecord>, Error> {
    let bytes = tsv::read_stripped(path)?;
    let mut rdr = tsv::reader(&bytes);
    let mut stops = Vec::new();
    for record in rdr.deserialize() {
        stops.push(record.map_err(|e| Error::CSVError {
            file_name: path.display().to_string(),
            source: e,
        })?);
    }
    Ok(stops)
}

/// Recreates the `stops` table and inserts every record in a single
/// transaction. Returns the number of inserted rows.
pub fn import_stops(conn: &mut Connection, stops: &[StopRecord]) -> Result<usize, Error> {
    let tx = conn.transaction()?;

    tx.execute("DROP TABLE IF EXISTS stops", [])?;
    tx.execute(CREATE_STOPS, [])?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO stops (id, lat, lng, name_en, name_mm, road_en, road_mm, township_en, township_mm)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;
        for stop in stops {
            stmt.execute(params![
                stop.id,
                stop.lat,
                stop.lng,
                stop.name_en,
                stop.name_mm,
                stop.road_en,
                stop.road_mm,
                stop.township_en,
                stop.township_mm,
            ])?;
        }
    }

    tx.commit()?;
    Ok(stops.len())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::db;

    const LISTING: &str = "id\tlat\tlng\tname_en\tname_mm\troad_en\troad_mm\ttownship_en\ttownship_mm\n\
        1\t16.7756\t96.1580\tSule\tဆူးလေ\tSule Pagoda Rd\tဆူးလေဘုရားလမ်း\tKyauktada\tကျောက်တံတား\n\
        2\t16.8053\t96.1561\tCentral\tဗဟို\tBogyoke Rd\tဗိုလ်ချုပ်လမ်း\tPabedan\tပန်းပဲတန်း\n";

    fn listing_file(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("stops.tsv");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_typed_records() {
        let dir = tempfile::tempdir().unwrap();
        let stops = read_stops(&listing_file(&dir, LISTING)).unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].id, 1);
        assert_eq!(stops[0].lat, 16.7756);
        assert_eq!(stops[1].name_mm, "ဗဟို");
    }

    #[test]
    fn non_numeric_coordinate_aborts_the_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = listing_file(
            &dir,
            "id\tlat\tlng\tname_en\tname_mm\troad_en\troad_mm\ttownship_en\ttownship_mm\n\
             1\tX\t96.1\ta\tb\tc\td\te\tf\n",
        );
        let err = read_stops(&path).unwrap_err();
        assert!(matches!(err, Error::CSVError { .. }));
    }

    #[test]
    fn import_replaces_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let stops = read_stops(&listing_file(&dir, LISTING)).unwrap();
        let mut conn = db::open(&dir.path().join("ybs.db")).unwrap();

        assert_eq!(import_stops(&mut conn, &stops).unwrap(), 2);
        // A second run must not append
        assert_eq!(import_stops(&mut conn, &stops).unwrap(), 2);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM stops", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let (name_en, township_mm): (String, String) = conn
            .query_row(
                "SELECT name_en, township_mm FROM stops WHERE id = 2",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(name_en, "Central");
        assert_eq!(township_mm, "ပန်းပဲတန်း");
    }
}
