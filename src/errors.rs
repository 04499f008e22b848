use thiserror;

use crate::record::Origin;

pub type Result<T> = std::result::Result<T, Error>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error reading or writing \"{file}\": {source}")]
    FileIo { file: String, source: BoxError },

    #[error("Error reading or writing bytes: {0}")]
    BytesIo(BoxError),

    #[error("Error writing hits: {0}")]
    OutputIo(#[from] std::io::Error),

    #[error("Error parsing record {idx} in {origin}: {source}")]
    ParseRecord {
        origin: Origin,
        idx: usize,
        source: BoxError,
    },

    #[error("Could not compile consensus \"{consensus}\": {reason}")]
    InvalidPattern { consensus: String, reason: String },

    #[error("Invalid base {base:?} at position {idx} (expected a nucleotide or IUPAC ambiguity code)")]
    InvalidBase { base: char, idx: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}
