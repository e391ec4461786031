pub mod dot_writer;
pub mod node_link;
pub mod pace_reader;
pub mod pace_writer;
pub mod trace_writer;

use std::{
    fs::File,
    io::{BufReader, ErrorKind},
    path::Path,
};

pub use dot_writer::DotWriter;
pub use node_link::{GraphNodeLinkReader, NodeIds, try_read_node_link_relabeled};
pub use pace_reader::{GraphPaceReader, Labels, PaceReader, invalid_graph};
pub use pace_writer::{DEFAULT_PROBLEM_ID, PaceWriter, label_out_of_range};
pub use trace_writer::{TraceWriter, write_trace};

use crate::{graph::Graph, utils::ContractionSequence};

fn has_json_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Loads a graph by file extension: `.json` is read as node-link data (integer
/// node ids are kept, `labels` does not apply), `.gr` as PACE. Other extensions
/// are rejected with [`ErrorKind::Unsupported`].
pub fn read_graph_file<P: AsRef<Path>>(path: P, labels: Labels) -> std::io::Result<Graph> {
    read_graph_file_with_ids(path, labels).map(|(graph, _)| graph)
}

/// Like [`read_graph_file`], but node-link files whose ids are not all integers
/// are relabeled to `0..n`; their ids are returned alongside the graph.
pub fn read_graph_file_with_ids<P: AsRef<Path>>(
    path: P,
    labels: Labels,
) -> std::io::Result<(Graph, Option<NodeIds>)> {
    let path = path.as_ref();
    if has_json_extension(path) {
        return try_read_node_link_relabeled(BufReader::new(File::open(path)?));
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("gr") => Ok((Graph::try_read_pace_file(path, labels)?, None)),
        _ => Err(std::io::Error::new(
            ErrorKind::Unsupported,
            format!("unknown graph format of {}", path.display()),
        )),
    }
}

/// Loads a contraction sequence: `.json` files hold an array of pairs, any
/// other file is read as text with one `survivor removed` pair per line.
pub fn read_contraction_sequence_file<P: AsRef<Path>>(
    path: P,
    labels: Labels,
) -> std::io::Result<ContractionSequence> {
    read_contraction_sequence_file_with_ids(path, labels, None)
}

/// Like [`read_contraction_sequence_file`]; if `ids` is given, the pairs of a
/// `.json` file are node ids of a relabeled node-link graph.
pub fn read_contraction_sequence_file_with_ids<P: AsRef<Path>>(
    path: P,
    labels: Labels,
    ids: Option<&NodeIds>,
) -> std::io::Result<ContractionSequence> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    match (has_json_extension(path), ids) {
        (true, Some(ids)) => ids.try_read_contraction_sequence(reader),
        (true, None) => Ok(serde_json::from_reader(reader)?),
        (false, _) => ContractionSequence::pace_reader(reader, labels),
    }
}
