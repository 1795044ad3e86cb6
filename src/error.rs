use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, reshaping, or querying indicator data.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read input")]
    Read(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("input ends before the header row (expected {expected} metadata lines first)")]
    MissingHeader { expected: usize },

    #[error("required column `{0}` not found in header")]
    MissingColumn(String),

    #[error("line {line}: column `{column}` holds non-numeric value `{value}`")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },

    #[error("series ({country}, {indicator}) appears more than once")]
    DuplicateSeries { country: String, indicator: String },

    #[error("year {0} is not present in the reshaped data")]
    UnknownYear(i32),

    #[error("country `{0}` is not present in the reshaped data")]
    UnknownCountry(String),

    #[error("indicator `{0}` is not present in the reshaped data")]
    UnknownIndicator(String),

    #[error("series ({country}, {indicator}) is not present in the reshaped data")]
    UnknownSeries { country: String, indicator: String },

    #[error("unknown colormap `{0}`")]
    UnknownColorMap(String),

    #[error("no usable TrueType font could be registered for chart text")]
    FontUnavailable,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
