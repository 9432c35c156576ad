//! The packed input document.
//!
//! A packed document has three lines:
//!
//! ```text
//! [0,1]
//! [2,5,7,3,1,2,3]
//! [2,0,1,9,1,0,4,1,2,0,8]
//! ```
//!
//! The first line summarises the graph ids, the second holds one
//! size-prefixed group of node types per graph and the third one
//! size-prefixed group of `(source, destination, edge type)` triples per
//! graph.

pub use groups::{count_groups, SizePrefixed};

use crate::error::{Error, Result, Stream};
use log::{debug, warn};
use std::path::Path;

mod groups;

/// Tokens per record in the node-type stream.
pub const NODE_WIDTH: usize = 1;

/// Tokens per record in the edge-type stream.
pub const EDGE_WIDTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedDocument {
    graph_count: usize,
    node_types: Vec<i32>,
    edge_types: Vec<i32>,
}

impl PackedDocument {
    pub fn new(graph_count: usize, node_types: Vec<i32>, edge_types: Vec<i32>) -> Self {
        PackedDocument {
            graph_count,
            node_types,
            edge_types,
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().take(3).collect();
        if lines.len() < 3 {
            return Err(Error::format(
                Stream::Document,
                lines.len() + 1,
                format!("expected 3 lines, found {}", lines.len()),
            ));
        }
        let doc = PackedDocument::new(
            legacy_graph_count(lines[0])?,
            tokenize(Stream::NodeTypes, lines[1])?,
            tokenize(Stream::EdgeTypes, lines[2])?,
        );
        debug!(
            "graph_count={} node_tokens={} edge_tokens={}",
            doc.graph_count,
            doc.node_types.len(),
            doc.edge_types.len()
        );
        Ok(doc)
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::open(path.to_path_buf(), e))?;
        Self::parse(&text)
    }

    pub fn graph_count(&self) -> usize {
        self.graph_count
    }

    pub fn node_groups(&self) -> SizePrefixed<'_> {
        SizePrefixed::new(Stream::NodeTypes, &self.node_types, NODE_WIDTH)
    }

    pub fn edge_groups(&self) -> SizePrefixed<'_> {
        SizePrefixed::new(Stream::EdgeTypes, &self.edge_types, EDGE_WIDTH)
    }

    /// Compares the graph count of the first line with the number of groups
    /// found in both streams and warns on any mismatch.
    pub fn cross_check(&self) -> bool {
        let node_groups = count_groups(Stream::NodeTypes, &self.node_types, NODE_WIDTH);
        let edge_groups = count_groups(Stream::EdgeTypes, &self.edge_types, EDGE_WIDTH);
        let consistent = node_groups == self.graph_count && edge_groups == self.graph_count;
        if !consistent {
            warn!(
                "graph count {} disagrees with the streams: {} node-type groups, {} edge-type groups",
                self.graph_count, node_groups, edge_groups
            );
        }
        consistent
    }
}

/// Decodes the number of graphs from the first line.
///
/// The legacy packer prints the graph ids, so the count is the last id plus
/// one. Only the last two characters of the last element are read; ids of
/// three or more digits are truncated. Files written by the packer rely on
/// this, so it must not be generalised.
pub fn legacy_graph_count(line: &str) -> Result<usize> {
    let stripped = strip_brackets(line);
    let position = stripped.split(',').count() - 1;
    let last = stripped.rsplit(',').next().unwrap_or("").trim();
    let start = last.char_indices().rev().nth(1).map_or(0, |(i, _)| i);
    last[start..]
        .parse::<usize>()
        .map(|id| id + 1)
        .map_err(|_| {
            Error::format(
                Stream::GraphCount,
                position,
                format!("expected a trailing graph id, found {:?}", last),
            )
        })
}

fn strip_brackets(line: &str) -> String {
    line.replace(|c: char| c == '[' || c == ']', "")
}

/// Splits a bracketed, comma-separated line into integers.
fn tokenize(stream: Stream, line: &str) -> Result<Vec<i32>> {
    let stripped = strip_brackets(line);
    if stripped.trim().is_empty() {
        return Ok(Vec::new());
    }
    stripped
        .split(',')
        .map(str::trim)
        .enumerate()
        .map(|(i, token)| {
            token.parse::<i32>().map_err(|_| {
                Error::format(stream, i, format!("expected an integer, found {:?}", token))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_graph_count() {
        assert_eq!(legacy_graph_count("[0,1]").unwrap(), 2);
        assert_eq!(legacy_graph_count("[0]").unwrap(), 1);
        assert_eq!(legacy_graph_count("[0,1,2,3,4,5,6,7,8,9,10]").unwrap(), 11);
        assert_eq!(legacy_graph_count("[0, 1, 2]\n").unwrap(), 3);
        assert_eq!(legacy_graph_count("[[0,1],[2,3]]").unwrap(), 4);
    }

    #[test]
    fn test_legacy_graph_count_truncates() {
        assert_eq!(legacy_graph_count("[0,122,123]").unwrap(), 24);
    }

    #[test]
    fn test_legacy_graph_count_malformed() {
        assert!(matches!(
            legacy_graph_count("[]"),
            Err(Error::Format {
                stream: Stream::GraphCount,
                ..
            })
        ));
        assert!(matches!(
            legacy_graph_count("[0,x]"),
            Err(Error::Format {
                stream: Stream::GraphCount,
                position: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize(Stream::NodeTypes, "[2, 5, 7,\n3,1,2,3]\n").unwrap(),
            vec![2, 5, 7, 3, 1, 2, 3]
        );
        assert_eq!(tokenize(Stream::EdgeTypes, "[]").unwrap(), vec![]);
        assert_eq!(tokenize(Stream::EdgeTypes, "[-1,2]").unwrap(), vec![-1, 2]);
    }

    #[test]
    fn test_tokenize_non_numeric() {
        match tokenize(Stream::EdgeTypes, "[1,0,a,2]") {
            Err(Error::Format {
                stream, position, ..
            }) => assert_eq!((stream, position), (Stream::EdgeTypes, 2)),
            _ => panic!("expected a format error"),
        }
        assert!(tokenize(Stream::NodeTypes, "[1,2,]").is_err());
    }

    #[test]
    fn test_parse() {
        let doc = PackedDocument::parse("[0,1]\n[2,5,7,3,1,2,3]\n[2,0,1,9,1,0,4,1,2,0,8]\n").unwrap();
        assert_eq!(
            doc,
            PackedDocument::new(
                2,
                vec![2, 5, 7, 3, 1, 2, 3],
                vec![2, 0, 1, 9, 1, 0, 4, 1, 2, 0, 8]
            )
        );
        assert!(doc.cross_check());
    }

    #[test]
    fn test_parse_short_document() {
        assert!(matches!(
            PackedDocument::parse("[0]\n[1,3]\n"),
            Err(Error::Format {
                stream: Stream::Document,
                position: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_cross_check_mismatch() {
        let doc = PackedDocument::new(3, vec![1, 5, 1, 6], vec![0, 0]);
        assert!(!doc.cross_check());
    }

    #[test]
    fn test_read_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matlablist_progprofile.txt");
        assert!(matches!(
            PackedDocument::read(&path),
            Err(Error::FileNotFound(p)) if p == path
        ));
    }
}
