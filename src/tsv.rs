//! Tab-separated input handling shared by the converter and the stop
//! importer.

use std::fs;
use std::path::Path;

use crate::error::Error;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Reads a whole file into memory, stripping a UTF-8 byte-order mark if
/// one is present.
pub fn read_stripped(path: &Path) -> Result<Vec<u8>, Error> {
    let bytes = fs::read(path).map_err(|e| Error::NamedFileIO {
        file_name: path.display().to_string(),
        source: Box::new(e),
    })?;
    Ok(match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_vec(),
        None => bytes,
    })
}

/// Builds a tab-delimited reader over `bytes`. Records may have fewer
/// fields than the header; short rows are handled by the callers.
pub fn reader(bytes: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(bytes)
}

/// A fully materialized tab-separated table: trimmed header names plus
/// every data record in input order.
#[derive(Debug)]
pub struct TsvTable {
    pub headers: Vec<String>,
    pub records: Vec<csv::StringRecord>,
}

impl TsvTable {
    pub fn from_path(path: &Path) -> Result<TsvTable, Error> {
        let csv_error = |e| Error::CSVError {
            file_name: path.display().to_string(),
            source: e,
        };

        let bytes = read_stripped(path)?;
        let mut rdr = reader(&bytes);
        let headers = rdr
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        // Pre-allocate a StringRecord and read one row at a time
        let mut rec = csv::StringRecord::new();
        let mut records = Vec::new();
        while rdr.read_record(&mut rec).map_err(csv_error)? {
            records.push(rec.clone());
        }

        Ok(TsvTable { headers, records })
    }
}
