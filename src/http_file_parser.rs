use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::HttpClientError;

/// A line kept inside a request block, with its 1-based position in the file.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BlockLine {
    pub line_no: usize,
    pub text: String,
}

/// The raw lines of one request, comments already dropped.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RequestBlock {
    pub lines: Vec<BlockLine>,
}

impl RequestBlock {
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.text.trim().is_empty())
    }
}

// Determined type of a raw file line
#[derive(Debug, Eq, PartialEq)]
enum LineType {
    Separator,
    Comment,
    Content,
}

fn get_line_type(line: &str) -> LineType {
    let trimmed = line.trim_start();
    if line.trim_end() == "###" {
        LineType::Separator
    } else if trimmed.starts_with("//") || trimmed.starts_with('#') {
        LineType::Comment
    } else {
        LineType::Content
    }
}

/// Splits file text into request blocks on `###` lines.
///
/// An empty text has no blocks; anything else has one block more than it has
/// separators, some of which may be empty.
pub fn split_blocks(text: &str) -> Vec<RequestBlock> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut blocks = Vec::new();
    let mut current = RequestBlock::default();

    for (idx, line) in text.lines().enumerate() {
        match get_line_type(line) {
            LineType::Separator => blocks.push(std::mem::take(&mut current)),
            LineType::Comment => {}
            LineType::Content => current.lines.push(BlockLine {
                line_no: idx + 1,
                text: line.to_string(),
            }),
        }
    }
    blocks.push(current);
    blocks
}

pub fn parse_http_file(http_file_path: &Path) -> Result<Vec<RequestBlock>, HttpClientError> {
    let text = fs::read_to_string(http_file_path).map_err(|source| HttpClientError::File {
        path: http_file_path.to_path_buf(),
        source,
    })?;
    let blocks = split_blocks(&text);
    debug!(
        path = %http_file_path.display(),
        blocks = blocks.len(),
        "split http file"
    );
    Ok(blocks)
}

/// Picks block `index`, counting from 0 in file order.
pub fn select_block(blocks: &[RequestBlock], index: usize) -> Result<&RequestBlock, HttpClientError> {
    blocks.get(index).ok_or(HttpClientError::Selection {
        index,
        count: blocks.len(),
    })
}
