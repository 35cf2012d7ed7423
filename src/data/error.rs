use std::path::PathBuf;

use thiserror::Error;

/// Storage failures. Only writes produce these; reads degrade to empty.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Could not write file path: {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, DataError>;
