use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed line {line_no}: {line:?}")]
    MalformedLine { line_no: usize, line: String },
    #[error("Malformed {field} field on line {line_no}: {value:?} is not an integer")]
    MalformedField {
        line_no: usize,
        field: &'static str,
        value: String,
    },
    #[error("Package entry starting on line {line_no} has no {field} field")]
    MissingField { line_no: usize, field: &'static str },
    #[error("Invalid manifest line {line_no}: {line:?}")]
    InvalidManifestLine { line_no: usize, line: String },
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Server returned {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Failed to decompress {url}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse package index from {url}")]
    Parse {
        url: String,
        #[source]
        source: ParseError,
    },
}
