//! Conversion of a packed document into one typed edge-list file per graph.

use crate::{
    error::{Error, Result},
    packed::{PackedDocument, EDGE_WIDTH},
    types::{EdgeType, NodeId, NodeType},
};
use derive_more::Display;
use itertools::Itertools;
use log::info;
use std::{
    convert::TryFrom,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Node types of one graph, indexed by local node id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTypeMap {
    types: Vec<NodeType>,
}

impl NodeTypeMap {
    pub fn new(types: Vec<NodeType>) -> Self {
        NodeTypeMap { types }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn get(&self, id: NodeId) -> Option<NodeType> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.types.get(i))
            .copied()
    }
}

/// An edge whose endpoints have been resolved to their node types.
///
/// Displays as one edge-list line without the line ending.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[display(fmt = "{}\t{}\t{}:{}:{}", src, dst, src_type, dst_type, elabel)]
pub struct TypedEdge {
    pub src: NodeId,
    pub dst: NodeId,
    pub src_type: NodeType,
    pub dst_type: NodeType,
    pub elabel: EdgeType,
}

impl TypedEdge {
    /// Resolves the `edge`-th triple of `graph` against its node types.
    pub fn resolve(
        graph: usize,
        edge: usize,
        nodes: &NodeTypeMap,
        (src, dst, elabel): (NodeId, NodeId, EdgeType),
    ) -> Result<Self> {
        let lookup = |node: NodeId| {
            nodes.get(node).ok_or(Error::Lookup {
                graph,
                edge,
                node,
                num_nodes: nodes.len(),
            })
        };
        Ok(TypedEdge {
            src,
            dst,
            src_type: lookup(src)?,
            dst_type: lookup(dst)?,
            elabel,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSummary {
    pub path: PathBuf,
    pub num_edges: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub graphs: Vec<GraphSummary>,
}

impl ExtractSummary {
    pub fn num_edges(&self) -> usize {
        self.graphs.iter().map(|g| g.num_edges).sum()
    }
}

pub fn edge_list_path(dir: &Path, graph: usize) -> PathBuf {
    dir.join(format!("edgeList{}.txt", graph))
}

/// Reads one node-type group per graph from the node-type stream.
pub fn node_type_maps(doc: &PackedDocument) -> Result<Vec<NodeTypeMap>> {
    let mut groups = doc.node_groups();
    (0..doc.graph_count())
        .map(|graph| {
            groups
                .next_group(graph)
                .map(|types| NodeTypeMap::new(types.to_vec()))
        })
        .collect()
}

/// Writes the edges of one group to `out` and returns how many were written.
///
/// On a lookup failure the lines written so far are flushed before the error
/// is returned, leaving exactly the valid prefix in `out`.
pub fn write_graph<W: Write>(
    graph: usize,
    nodes: &NodeTypeMap,
    group: &[i32],
    out: &mut W,
) -> Result<usize> {
    for (edge, (&src, &dst, &elabel)) in group.iter().tuples::<(_, _, _)>().enumerate() {
        match TypedEdge::resolve(graph, edge, nodes, (src, dst, elabel)) {
            Ok(typed) => writeln!(out, "{}", typed)?,
            Err(err) => {
                out.flush()?;
                return Err(err);
            }
        }
    }
    out.flush()?;
    Ok(group.len() / EDGE_WIDTH)
}

/// Writes `edgeList<i>.txt` into `out_dir` for every graph of `doc`.
pub fn extract<P: AsRef<Path>>(doc: &PackedDocument, out_dir: P) -> Result<ExtractSummary> {
    let out_dir = out_dir.as_ref();
    doc.cross_check();
    let node_maps = node_type_maps(doc)?;
    let mut groups = doc.edge_groups();
    let mut summary = ExtractSummary::default();
    for (graph, nodes) in node_maps.iter().enumerate() {
        let group = groups.next_group(graph)?;
        let path = edge_list_path(out_dir, graph);
        let mut out = BufWriter::new(File::create(&path)?);
        let num_edges = write_graph(graph, nodes, group, &mut out)?;
        info!(
            "graph {}: {} nodes, {} edges -> {}",
            graph,
            nodes.len(),
            num_edges,
            path.display()
        );
        summary.graphs.push(GraphSummary { path, num_edges });
    }
    info!(
        "extracted {} graphs with {} edges",
        summary.graphs.len(),
        summary.num_edges()
    );
    Ok(summary)
}

pub fn extract_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    out_dir: Q,
) -> Result<ExtractSummary> {
    extract(&PackedDocument::read(input)?, out_dir)
}
