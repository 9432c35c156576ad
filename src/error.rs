//! Error management.

use crate::types::NodeId;
use derive_more::Display;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Where a malformed input was found.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    #[display(fmt = "packed document")]
    Document,
    #[display(fmt = "graph-count line")]
    GraphCount,
    #[display(fmt = "node-type stream")]
    NodeTypes,
    #[display(fmt = "edge-type stream")]
    EdgeTypes,
    #[display(fmt = "edge list")]
    EdgeList,
}

#[derive(Debug, Display)]
pub enum Error {
    /// `position` is a token index for the packed streams and a 1-based line
    /// number for the document and edge lists.
    #[display(fmt = "malformed {} at {}: {}", stream, position, reason)]
    Format {
        stream: Stream,
        position: usize,
        reason: String,
    },
    #[display(
        fmt = "graph {} edge {}: node {} is not one of the graph's {} nodes",
        graph,
        edge,
        node,
        num_nodes
    )]
    Lookup {
        graph: usize,
        edge: usize,
        node: NodeId,
        num_nodes: usize,
    },
    #[display(fmt = "file not found: {}", "_0.display()")]
    FileNotFound(PathBuf),
    #[display(fmt = "{}", _0)]
    Io(std::io::Error),
}

impl Error {
    pub(crate) fn format<S: Into<String>>(stream: Stream, position: usize, reason: S) -> Self {
        Error::Format {
            stream,
            position,
            reason: reason.into(),
        }
    }

    /// Maps a failed open of `path` to `FileNotFound` when the file is missing.
    pub(crate) fn open(path: PathBuf, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path)
        } else {
            Error::Io(err)
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::format(Stream::EdgeTypes, 7, "size 4 exceeds remaining 2").to_string(),
            "malformed edge-type stream at 7: size 4 exceeds remaining 2"
        );
        assert_eq!(
            Error::Lookup {
                graph: 1,
                edge: 3,
                node: 9,
                num_nodes: 4
            }
            .to_string(),
            "graph 1 edge 3: node 9 is not one of the graph's 4 nodes"
        );
    }

    #[test]
    fn test_boxed_display() {
        let err: Box<dyn std::error::Error> =
            Box::new(Error::FileNotFound(PathBuf::from("/nonexistent")));
        assert_eq!(err.to_string(), "file not found: /nonexistent");
    }

    #[test]
    fn test_open_not_found() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            Error::open(PathBuf::from("edgeList2.txt"), err),
            Error::FileNotFound(path) if path == PathBuf::from("edgeList2.txt")
        ));
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        assert!(matches!(
            Error::open(PathBuf::from("x"), err),
            Error::Io(_)
        ));
    }
}
