use std::io::{self, Write};

use crate::http_request::HttpRequest;
use crate::http_response::HttpResponse;

/// How much to print around a response body.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub enum Verbosity {
    /// Body bytes only, for piping into `jq` and friends.
    Raw,
    /// Status line, elapsed time and headers before the body.
    Response,
    /// Like `Response`, preceded by the request that was sent.
    Exchange,
}

impl Verbosity {
    pub fn from_occurrences(count: u8) -> Verbosity {
        match count {
            0 => Verbosity::Raw,
            1 => Verbosity::Response,
            _ => Verbosity::Exchange,
        }
    }
}

fn elapsed_ms(response: &HttpResponse) -> f64 {
    response.elapsed.as_nanos() as f64 / 1_000_000.0
}

pub fn write_request<W: Write>(out: &mut W, request: &HttpRequest) -> io::Result<()> {
    writeln!(out, "===== Request:\n{}\n===== Response:", request)
}

pub fn write_response<W: Write>(out: &mut W, response: &HttpResponse, verbosity: Verbosity) -> io::Result<()> {
    if verbosity >= Verbosity::Response {
        writeln!(
            out,
            "{} {} - {}ms",
            response.status_code,
            response.status_text,
            elapsed_ms(response)
        )?;
        for (name, value) in &response.headers {
            writeln!(out, "{}: {:?}", name, value)?;
        }
        writeln!(out)?;
    }
    out.write_all(&response.body)
}
