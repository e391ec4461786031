use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind, Lines},
    ops::Range,
    path::Path,
};

use crate::{
    errors::InvalidGraph,
    graph::{Edge, Graph, NumEdges, NumNodes, Vertex},
};

pub type Result<T> = std::io::Result<T>;

/// How vertex labels in a text file map to vertices in memory
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Labels {
    /// Keep the labels `1..=n` of the file
    #[default]
    AsWritten,
    /// Shift labels down by one, yielding vertices `0..n`
    ZeroBased,
}

impl Labels {
    /// Maps a label read from a file to a vertex; fails for label 0 if the
    /// labels are shifted
    pub fn from_file_label(self, label: NumNodes) -> Option<NumNodes> {
        match self {
            Labels::AsWritten => Some(label),
            Labels::ZeroBased => label.checked_sub(1),
        }
    }

    /// Maps a vertex to its label in a file; `None` if the label does not fit
    /// into [`NumNodes`]
    pub fn to_file_label(self, u: NumNodes) -> Option<NumNodes> {
        match self {
            Labels::AsWritten => Some(u),
            Labels::ZeroBased => u.checked_add(1),
        }
    }

    /// The vertices of a graph with `n` nodes; `None` if they exceed [`NumNodes`]
    pub fn vertices(self, n: NumNodes) -> Option<Range<NumNodes>> {
        match self {
            Labels::AsWritten => Some(1..n.checked_add(1)?),
            Labels::ZeroBased => Some(0..n),
        }
    }
}

pub trait GraphPaceReader: Sized {
    fn try_read_pace<R: BufRead>(reader: R, labels: Labels) -> Result<Self>;
    fn try_read_pace_file<P: AsRef<Path>>(path: P, labels: Labels) -> Result<Self>;
}

impl GraphPaceReader for Graph {
    fn try_read_pace<R: BufRead>(reader: R, labels: Labels) -> Result<Self> {
        let pace_reader = PaceReader::try_new(reader, labels)?;
        let number_of_nodes = pace_reader.number_of_nodes();
        let number_of_edges = pace_reader.number_of_edges();

        let Some(vertices) = labels.vertices(number_of_nodes) else {
            return Err(std::io::Error::new(
                ErrorKind::InvalidData,
                format!("{number_of_nodes} nodes exceed the label range"),
            ));
        };

        let edges: Vec<Edge> = pace_reader.collect::<Result<_>>()?;

        let graph = Graph::try_new(vertices, edges).map_err(invalid_graph)?;
        graph
            .expect_number_of_edges(number_of_edges)
            .map_err(invalid_graph)?;

        Ok(graph)
    }

    fn try_read_pace_file<P: AsRef<Path>>(path: P, labels: Labels) -> Result<Self> {
        let reader = File::open(path)?;
        let buf_reader = BufReader::new(reader);
        Self::try_read_pace(buf_reader, labels)
    }
}

/// Wraps a graph validation failure; the original value can be recovered with
/// `error.get_ref().and_then(|e| e.downcast_ref::<InvalidGraph<Node>>())`
pub fn invalid_graph<V: Vertex>(error: InvalidGraph<V>) -> std::io::Error {
    std::io::Error::new(ErrorKind::InvalidData, error)
}

pub struct PaceReader<R> {
    lines: Lines<R>,
    labels: Labels,
    line_number: usize,
    problem_id: String,
    number_of_nodes: NumNodes,
    number_of_edges: NumEdges,
}

impl<R: BufRead> PaceReader<R> {
    pub fn try_new(reader: R, labels: Labels) -> Result<Self> {
        let mut pace_reader = Self::try_new_contraction_sequence(reader, labels);
        (pace_reader.number_of_nodes, pace_reader.number_of_edges) = pace_reader.parse_header()?;
        Ok(pace_reader)
    }

    /// Reader for files without header that only contain pairs
    pub fn try_new_contraction_sequence(reader: R, labels: Labels) -> Self {
        Self {
            lines: reader.lines(),
            labels,
            line_number: 0,
            problem_id: String::new(),
            number_of_nodes: 0,
            number_of_edges: 0,
        }
    }

    pub fn number_of_edges(&self) -> NumEdges {
        self.number_of_edges
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.number_of_nodes
    }

    pub fn problem_id(&self) -> &str {
        &self.problem_id
    }
}

impl<R: BufRead> Iterator for PaceReader<R> {
    type Item = Result<Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse_edge_line().transpose()
    }
}

macro_rules! raise_error_unless {
    ($cond : expr, $error : expr) => {
        if !($cond) {
            return Err($error);
        }
    };
}

macro_rules! parse_next_value {
    ($self : expr, $iterator : expr, $name : expr) => {{
        let Some(next) = $iterator.next() else {
            return Err($self.error(format!("Premature end of line when parsing {}.", $name)));
        };

        match next.parse() {
            Ok(x) => x,
            Err(_) => {
                return Err($self.error(format!("Invalid value found. Cannot parse {}.", $name)));
            }
        }
    }};
}

impl<R: BufRead> PaceReader<R> {
    fn error(&self, info: String) -> std::io::Error {
        std::io::Error::new(
            ErrorKind::InvalidData,
            format!("line {}: {info}", self.line_number),
        )
    }

    fn next_non_comment_line(&mut self) -> Result<Option<String>> {
        loop {
            let line = self.lines.next();
            self.line_number += 1;
            match line {
                None => return Ok(None),
                Some(Err(x)) => return Err(x),
                Some(Ok(line)) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() || trimmed.starts_with('c') {
                        continue;
                    }
                    return Ok(Some(trimmed.to_string()));
                }
            }
        }
    }

    fn parse_header(&mut self) -> Result<(NumNodes, NumEdges)> {
        let Some(line) = self.next_non_comment_line()? else {
            return Err(self.error("No header found".into()));
        };

        let mut parts = line.split_whitespace();

        raise_error_unless!(
            parts.next() == Some("p"),
            self.error("Invalid header found; line should start with p".into())
        );

        match parts.next() {
            Some(x) => {
                self.problem_id = x.to_string();
            }
            None => {
                return Err(self.error("Invalid header; no problem id found".into()));
            }
        }

        let number_of_nodes = parse_next_value!(self, parts, "Header>Number of nodes");
        let number_of_edges = parse_next_value!(self, parts, "Header>Number of edges");

        raise_error_unless!(
            self.labels.vertices(number_of_nodes).is_some(),
            self.error(format!(
                "Header>Number of nodes {number_of_nodes} exceeds the label range"
            ))
        );

        raise_error_unless!(
            parts.next().is_none(),
            self.error("Invalid header found; expected end of line".into())
        );

        Ok((number_of_nodes, number_of_edges))
    }

    fn parse_edge_line(&mut self) -> Result<Option<Edge>> {
        let Some(line) = self.next_non_comment_line()? else {
            return Ok(None);
        };

        let mut parts = line.split_whitespace();

        let from: NumNodes = parse_next_value!(self, parts, "Source node");
        let dest: NumNodes = parse_next_value!(self, parts, "Target node");

        raise_error_unless!(
            parts.next().is_none(),
            self.error("Expected exactly two nodes per line".into())
        );

        match (
            self.labels.from_file_label(from),
            self.labels.from_file_label(dest),
        ) {
            (Some(u), Some(v)) => Ok(Some(Edge(u, v))),
            _ => Err(self.error("Label 0 is not allowed for one-based input".into())),
        }
    }
}
