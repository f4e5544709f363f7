use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use crate::http_file_parser::{parse_http_file, select_block, RequestBlock};
use crate::http_request::HttpRequest;
use crate::http_request_assembler::assemble_request;
use crate::http_request_executor::{execute_http_request, Transport};
use crate::output_formatter::{write_request, write_response, Verbosity};

/// Which blocks of a file to run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Selection {
    Index(usize),
    /// Every non-blank block, in file order.
    All,
}

impl FromStr for Selection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Selection> {
        match s {
            "a" => Ok(Selection::All),
            "" => Ok(Selection::Index(0)),
            _ => s
                .parse::<usize>()
                .map(Selection::Index)
                .map_err(|_| anyhow!("'{}' is neither a request index nor 'a'", s)),
        }
    }
}

pub struct ExecutionContext<'a> {
    pub transport: &'a dyn Transport,
    pub selection: Selection,
    pub verbosity: Verbosity,
}

fn selected_blocks(blocks: &[RequestBlock], selection: Selection) -> Result<Vec<&RequestBlock>> {
    Ok(match selection {
        Selection::Index(index) => vec![select_block(blocks, index)?],
        Selection::All => blocks.iter().filter(|b| !b.is_blank()).collect(),
    })
}

/// Assembles every selected request of one file, failing before anything is sent.
pub fn assemble_http_file(path: &PathBuf, selection: Selection) -> Result<Vec<HttpRequest>> {
    let blocks = parse_http_file(path)?;
    selected_blocks(&blocks, selection)?
        .into_iter()
        .map(|block| assemble_request(block).map_err(anyhow::Error::from))
        .collect::<Result<Vec<_>>>()
        .context(format!("while parsing file {}", path.display()))
}

pub fn execute_http_files<W: Write>(files: Vec<&PathBuf>, context: &ExecutionContext<'_>, out: &mut W) -> Result<()> {
    for p in files {
        let requests = assemble_http_file(p, context.selection)?;
        debug!(path = %p.display(), requests = requests.len(), "assembled requests");

        for request in &requests {
            let response = execute_http_request(request, context.transport)
                .context(format!("while executing {} {}", request.method, request.url))?;

            if context.verbosity >= Verbosity::Exchange {
                write_request(out, request)?;
            }
            write_response(out, &response, context.verbosity)?;
            out.flush()?;
        }
    }
    Ok(())
}
