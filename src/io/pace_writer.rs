use std::{
    fs::File,
    io::{BufWriter, ErrorKind, Write},
    path::Path,
};

use itertools::Itertools;

use super::{super::graph::*, Labels};

pub const DEFAULT_PROBLEM_ID: &str = "tww";

/// Error for a vertex whose file label does not fit into [`NumNodes`]
pub fn label_out_of_range(u: NumNodes) -> std::io::Error {
    std::io::Error::new(
        ErrorKind::InvalidInput,
        format!("label of vertex {u} exceeds the label range"),
    )
}

pub trait PaceWriter {
    fn try_write_pace<W: Write>(&self, writer: W, labels: Labels) -> Result<(), std::io::Error> {
        self.try_write_pace_with(writer, DEFAULT_PROBLEM_ID, &[], labels)
    }

    /// Writes the graph with a custom problem id; every comment becomes a
    /// `c`-line in front of the header
    fn try_write_pace_with<W: Write>(
        &self,
        writer: W,
        problem_id: &str,
        comments: &[&str],
        labels: Labels,
    ) -> Result<(), std::io::Error>;

    fn try_write_pace_file<P: AsRef<Path>>(
        &self,
        path: P,
        labels: Labels,
    ) -> Result<(), std::io::Error> {
        let writer = BufWriter::new(File::create(path)?);
        self.try_write_pace(writer, labels)
    }
}

impl PaceWriter for Graph {
    fn try_write_pace_with<W: Write>(
        &self,
        mut writer: W,
        problem_id: &str,
        comments: &[&str],
        labels: Labels,
    ) -> Result<(), std::io::Error> {
        let n = self.number_of_nodes();
        let expected = labels.vertices(n).ok_or_else(|| label_out_of_range(n))?;
        if !self
            .vertices()
            .iter()
            .copied()
            .sorted()
            .eq(expected.clone())
        {
            return Err(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("vertices of the graph are not {expected:?}"),
            ));
        }

        for comment in comments {
            for line in comment.lines() {
                writeln!(writer, "c {line}")?;
            }
        }

        writeln!(writer, "p {problem_id} {} {}", n, self.number_of_edges())?;

        for &Edge(u, v) in self.edges() {
            let u = labels.to_file_label(u).ok_or_else(|| label_out_of_range(u))?;
            let v = labels.to_file_label(v).ok_or_else(|| label_out_of_range(v))?;
            writeln!(writer, "{u} {v}")?;
        }

        writer.flush()
    }
}
