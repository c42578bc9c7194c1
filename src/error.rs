use thiserror::Error;

/// An error that can occur while preparing the transit dataset.
#[derive(Error, Debug)]
pub enum Error {
    /// The input header does not contain the configured coordinate columns
    #[error("Missing required lat/lon fields: '{lat_field}', '{lon_field}'. Found: {found:?}")]
    MissingColumns {
        lat_field: String,
        lon_field: String,
        /// Column names actually present in the header
        found: Vec<String>,
    },
    /// Generic Input/Output error while reading a file
    #[error("impossible to read file")]
    IO(#[from] std::io::Error),
    /// Impossible to read a file
    #[error("impossible to read '{file_name}'")]
    NamedFileIO {
        /// The file name that could not be read
        file_name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Impossible to read a tab-separated file
    #[error("impossible to read tsv file '{file_name}'")]
    CSVError {
        /// File name that could not be parsed as tab-separated text
        file_name: String,
        #[source]
        source: csv::Error,
    },
    /// Malformed route description file
    #[error("impossible to read route file '{file_name}'")]
    Json {
        file_name: String,
        #[source]
        source: serde_json::Error,
    },
    /// A route references a stop by something that is not an integer id
    #[error("route file '{file_name}' has non-numeric stop reference '{stop_ref}'")]
    BadStopRef { file_name: String, stop_ref: String },
    /// Error when querying sqlite
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}
