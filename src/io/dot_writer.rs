use std::io::Write;

use super::super::{graph::*, trace::ContractionTrace};

/// produces a minimalistic DOT representation of the trace's current state
pub trait DotWriter {
    fn try_write_dot<W: Write>(&self, writer: W) -> Result<(), std::io::Error>;
}

impl<V: Vertex> DotWriter for ContractionTrace<V> {
    fn try_write_dot<W: Write>(&self, mut writer: W) -> Result<(), std::io::Error> {
        write!(writer, "graph G {{")?;
        for u in self.vertices() {
            write!(writer, "v{u:?}; ")?;
        }
        for ColoredEdge(u, v, c) in self.colored_edges() {
            if c.is_red() {
                write!(writer, "v{u:?}--v{v:?}[color=red]; ")?;
            } else {
                write!(writer, "v{u:?}--v{v:?}; ")?;
            }
        }
        write!(writer, r"}}")
    }
}
