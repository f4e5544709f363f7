use std::path::PathBuf;

use thiserror::Error;

/// Every way running a `.http` file can fail, one variant per stage.
#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("couldn't read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line_no}: {reason}: '{line}'")]
    Parse {
        line_no: usize,
        line: String,
        reason: ParseFailure,
    },
    #[error("invalid request index: {index} out of {count}")]
    Selection { index: usize, count: usize },
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// What the assembler didn't like about a line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ParseFailure {
    #[error("request block has no request line")]
    MissingRequestLine,
    #[error("request line must be 'METHOD URL'")]
    MalformedRequestLine,
    #[error("header name must not be empty or padded")]
    MalformedHeader,
    #[error("expected a header, a '?'/'&' parameter or a blank line")]
    UnrecognizedLine,
}

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("{method} is not a valid http method")]
    InvalidMethod { method: String },
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid header '{name}'")]
    InvalidHeader { name: String },
    #[error("failed to build http client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read response body: {source}")]
    ReadBody {
        #[source]
        source: std::io::Error,
    },
}

impl HttpClientError {
    pub fn parse(line_no: usize, line: &str, reason: ParseFailure) -> HttpClientError {
        HttpClientError::Parse {
            line_no,
            line: line.to_string(),
            reason,
        }
    }
}
