use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::{
    graph::*,
    io::NodeIds,
    trace::ChangeRecord,
    utils::{ContractionSequence, Replay, Step},
};

#[derive(Serialize)]
struct Header<'a, V> {
    vertices: &'a [V],
    edges: &'a [Edge<V>],
    #[serde(skip_serializing_if = "Option::is_none")]
    dimension: Option<Dimension>,
    positions: Vec<(V, Position)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ids: Option<&'a [Value]>,
}

#[derive(Serialize)]
struct Frame<'a, V: Vertex> {
    step: usize,
    contraction: (V, V),
    record: &'a ChangeRecord<V>,
    max_red_degree: NumNodes,
    twin_width: NumNodes,
}

/// Emits a replay as JSON lines: first a header describing the input graph,
/// then one object per contraction. `step` counts from 1.
pub struct TraceWriter<W: Write> {
    writer: W,
    frames: usize,
    ids: Option<Vec<Value>>,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            frames: 0,
            ids: None,
        }
    }

    /// Adds the original node ids of a relabeled graph to the header
    pub fn with_node_ids(mut self, ids: Option<&NodeIds>) -> Self {
        self.ids = ids.map(|ids| ids.ids().to_vec());
        self
    }

    pub fn write_header<V>(&mut self, graph: &Graph<V>) -> std::io::Result<()>
    where
        V: Vertex + Serialize,
    {
        let header = Header {
            vertices: graph.vertices(),
            edges: graph.edges(),
            dimension: graph.layout().map(|l| l.dimension()),
            positions: graph
                .layout()
                .map(|l| l.sorted_positions())
                .unwrap_or_default(),
            ids: self.ids.as_deref(),
        };

        serde_json::to_writer(&mut self.writer, &header)?;
        writeln!(self.writer)
    }

    pub fn write_step<V>(&mut self, step: &Step<V>) -> std::io::Result<()>
    where
        V: Vertex + Serialize,
    {
        let frame = Frame {
            step: step.index + 1,
            contraction: (step.survivor, step.removed),
            record: &step.record,
            max_red_degree: step.max_red_degree,
            twin_width: step.twin_width,
        };

        serde_json::to_writer(&mut self.writer, &frame)?;
        writeln!(self.writer)?;
        self.frames += 1;
        Ok(())
    }

    /// Number of steps written so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn into_inner(mut self) -> std::io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Replays `sequence` on `graph` and writes the header followed by every step.
/// Returns the exhausted replay, which holds the twin-width and the final
/// trace; a failing contraction aborts the output after the last successful step.
pub fn write_trace<'a, V, W>(
    graph: &Graph<V>,
    sequence: &'a ContractionSequence<V>,
    writer: &mut TraceWriter<W>,
) -> anyhow::Result<Replay<'a, V>>
where
    V: Vertex + Serialize,
    W: Write,
{
    writer.write_header(graph)?;

    let mut replay = sequence.replay(graph);
    for step in replay.by_ref() {
        writer.write_step(&step?)?;
    }

    Ok(replay)
}
