use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::errors::{HttpClientError, ParseFailure};
use crate::http_file_parser::{BlockLine, RequestBlock};
use crate::http_request::HttpRequest;

static TRAILING_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<url>.*?)\s+(?P<version>HTTP/\d+(?:\.\d+)?)$").unwrap());

// What the assembler expects the next line to be. Each state owns the request
// built so far.
#[derive(Debug)]
enum AssemblerState {
    ExpectRequestLine,
    ExpectContinuationOrHeaderOrBody(HttpRequest),
    ExpectBody(HttpRequest, Vec<String>),
}

impl AssemblerState {
    fn name(&self) -> &'static str {
        match self {
            AssemblerState::ExpectRequestLine => "ExpectRequestLine",
            AssemblerState::ExpectContinuationOrHeaderOrBody(_) => "ExpectContinuationOrHeaderOrBody",
            AssemblerState::ExpectBody(..) => "ExpectBody",
        }
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn on_request_line(line: &BlockLine) -> Result<AssemblerState, HttpClientError> {
    let text = line.text.trim();
    if text.is_empty() {
        return Ok(AssemblerState::ExpectRequestLine);
    }

    let (method, rest) = text.split_once(' ').ok_or_else(|| {
        HttpClientError::parse(line.line_no, &line.text, ParseFailure::MalformedRequestLine)
    })?;
    let rest = rest.trim();

    let request = match TRAILING_VERSION.captures(rest) {
        Some(caps) => {
            let mut request = HttpRequest::new(method, &caps["url"]);
            request.version = Some(caps["version"].to_string());
            request
        }
        None => HttpRequest::new(method, rest),
    };

    Ok(AssemblerState::ExpectContinuationOrHeaderOrBody(request))
}

fn on_head_line(mut request: HttpRequest, line: &BlockLine) -> Result<AssemblerState, HttpClientError> {
    let text = line.text.as_str();
    let unindented = text.trim_start();

    if unindented.len() < text.len() && (unindented.starts_with('?') || unindented.starts_with('&')) {
        request.url.push_str(unindented.trim_end());
        return Ok(AssemblerState::ExpectContinuationOrHeaderOrBody(request));
    }

    if is_blank(text) {
        return Ok(AssemblerState::ExpectBody(request, Vec::new()));
    }

    match text.split_once(": ") {
        Some((name, value)) => {
            if name.is_empty() || name.trim() != name {
                return Err(HttpClientError::parse(line.line_no, text, ParseFailure::MalformedHeader));
            }
            request.set_header(name, value);
            Ok(AssemblerState::ExpectContinuationOrHeaderOrBody(request))
        }
        None => Err(HttpClientError::parse(line.line_no, text, ParseFailure::UnrecognizedLine)),
    }
}

fn on_body_line(request: HttpRequest, mut body: Vec<String>, line: &BlockLine) -> AssemblerState {
    body.push(line.text.clone());
    AssemblerState::ExpectBody(request, body)
}

fn finish(state: AssemblerState, block: &RequestBlock) -> Result<HttpRequest, HttpClientError> {
    match state {
        AssemblerState::ExpectRequestLine => {
            let line_no = block.lines.first().map_or(0, |l| l.line_no);
            Err(HttpClientError::parse(line_no, "", ParseFailure::MissingRequestLine))
        }
        AssemblerState::ExpectContinuationOrHeaderOrBody(request) => Ok(request),
        AssemblerState::ExpectBody(mut request, body) => {
            if !body.iter().all(|l| l.is_empty()) {
                request.body = Some(body.join("\n"));
            }
            Ok(request)
        }
    }
}

/// Turns the lines of one request block into a request.
///
/// The first non-blank line is `METHOD URL`. It may be followed by indented
/// `?k=v`/`&k=v` lines that extend the URL, and by `name: value` headers. A
/// blank line closes the head; everything after it is the body, verbatim.
pub fn assemble_request(block: &RequestBlock) -> Result<HttpRequest, HttpClientError> {
    let mut state = AssemblerState::ExpectRequestLine;

    for line in &block.lines {
        let from = state.name();
        state = match state {
            AssemblerState::ExpectRequestLine => on_request_line(line)?,
            AssemblerState::ExpectContinuationOrHeaderOrBody(request) => on_head_line(request, line)?,
            AssemblerState::ExpectBody(request, body) => on_body_line(request, body, line),
        };
        if from != state.name() {
            debug!(line_no = line.line_no, from, to = state.name(), "assembler transition");
        }
    }

    finish(state, block)
}
