use std::{
    collections::BTreeSet,
    io::{BufRead, Write},
    iter::Enumerate,
    slice,
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    errors::ReplayError,
    graph::*,
    io::{Labels, PaceReader, label_out_of_range},
    trace::{ChangeRecord, ContractionTrace},
};

/// An ordered list of contractions `(survivor, removed)`; the `removed` vertex
/// is merged into `survivor`. Serializes as a plain JSON array of pairs.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractionSequence<V = Node> {
    seq: Vec<(V, V)>,
}

impl<V> Default for ContractionSequence<V> {
    fn default() -> Self {
        Self { seq: Vec::new() }
    }
}

impl<V: Vertex> ContractionSequence<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seq: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, survivor: V, removed: V) {
        self.seq.push((survivor, removed))
    }

    pub fn merge_node_into(&mut self, removed: V, survivor: V) {
        self.push(survivor, removed)
    }

    /// Pairs `(survivor, removed)` in the order they are applied
    pub fn contractions(&self) -> &[(V, V)] {
        &self.seq
    }

    pub fn last_survivor(&self) -> Option<V> {
        self.seq.last().map(|&(u, _)| u)
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// If the sequence is valid on `vertices` (but possibly incomplete), returns
    /// `Some(nodes)` where `nodes` is the set of still unmerged nodes. If the
    /// sequence is infeasible (e.g. because a node is removed twice or merged
    /// into itself), returns `None`.
    pub fn remaining_nodes(&self, vertices: impl IntoIterator<Item = V>) -> Option<BTreeSet<V>> {
        let mut remaining: BTreeSet<V> = vertices.into_iter().collect();

        for &(survivor, removed) in &self.seq {
            if survivor == removed || !remaining.contains(&survivor) || !remaining.remove(&removed)
            {
                return None;
            }
        }

        Some(remaining)
    }

    /// Replays the sequence on a fresh trace of `graph`
    pub fn replay<'a>(&'a self, graph: &Graph<V>) -> Replay<'a, V> {
        Replay::new(ContractionTrace::new(graph), self)
    }

    /// Replays the whole sequence and returns the largest red degree observed
    /// after any contraction; 0 for an empty sequence
    pub fn compute_twin_width(&self, graph: &Graph<V>) -> Result<NumNodes, ReplayError<V>> {
        let mut replay = self.replay(graph);
        for step in replay.by_ref() {
            step?;
        }
        Ok(replay.twin_width())
    }
}

impl ContractionSequence<Node> {
    /// Writes one `survivor removed` line per contraction
    pub fn pace_writer<W: Write>(&self, mut writer: W, labels: Labels) -> std::io::Result<()> {
        for &(sur, rem) in &self.seq {
            let sur = labels.to_file_label(sur).ok_or_else(|| label_out_of_range(sur))?;
            let rem = labels.to_file_label(rem).ok_or_else(|| label_out_of_range(rem))?;
            writeln!(writer, "{sur} {rem}")?;
        }
        Ok(())
    }

    /// Reads the headerless text format: `c`-comments and blank lines are
    /// skipped, every other line holds `survivor removed`
    pub fn pace_reader<R: BufRead>(reader: R, labels: Labels) -> std::io::Result<Self> {
        let reader = PaceReader::try_new_contraction_sequence(reader, labels);
        let mut cs = ContractionSequence::new();
        for edge in reader {
            let Edge(sur, rem) = edge?;
            cs.push(sur, rem);
        }
        Ok(cs)
    }
}

impl<V> FromIterator<(V, V)> for ContractionSequence<V> {
    fn from_iter<T: IntoIterator<Item = (V, V)>>(iter: T) -> Self {
        Self {
            seq: iter.into_iter().collect(),
        }
    }
}

/// The outcome of one successful contraction during a replay
#[derive(Clone, Debug)]
pub struct Step<V: Vertex = Node> {
    /// Zero-based position within the sequence
    pub index: usize,
    pub survivor: V,
    pub removed: V,
    pub record: ChangeRecord<V>,
    /// Red degree maximum of the graph right after this step
    pub max_red_degree: NumNodes,
    /// Largest `max_red_degree` seen up to and including this step
    pub twin_width: NumNodes,
}

/// Drives a [`ContractionTrace`] through a [`ContractionSequence`], one
/// contraction per call of `next`. Stops after the first failure.
#[derive(Debug)]
pub struct Replay<'a, V: Vertex = Node> {
    trace: ContractionTrace<V>,
    merges: Enumerate<slice::Iter<'a, (V, V)>>,
    twin_width: NumNodes,
    failed: bool,
}

impl<'a, V: Vertex> Replay<'a, V> {
    pub fn new(trace: ContractionTrace<V>, sequence: &'a ContractionSequence<V>) -> Self {
        Self {
            trace,
            merges: sequence.contractions().iter().enumerate(),
            twin_width: 0,
            failed: false,
        }
    }

    /// The trace in the state after the most recent step
    pub fn trace(&self) -> &ContractionTrace<V> {
        &self.trace
    }

    pub fn into_trace(self) -> ContractionTrace<V> {
        self.trace
    }

    /// Running maximum of the red degree over all steps so far
    pub fn twin_width(&self) -> NumNodes {
        self.twin_width
    }

    fn step(&mut self, index: usize, survivor: V, removed: V) -> Result<Step<V>, ReplayError<V>> {
        let error = |source| ReplayError {
            step: index,
            survivor,
            removed,
            source,
        };

        let record = self.trace.contract(survivor, removed).map_err(error)?;
        let max_red_degree = self.trace.max_red_degree().map_err(error)?;
        self.twin_width = self.twin_width.max(max_red_degree);

        debug!(
            "step {:>5}: {survivor:?} <- {removed:?} | max red degree {max_red_degree} | tww {}",
            index + 1,
            self.twin_width
        );

        Ok(Step {
            index,
            survivor,
            removed,
            record,
            max_red_degree,
            twin_width: self.twin_width,
        })
    }
}

impl<V: Vertex> Iterator for Replay<'_, V> {
    type Item = Result<Step<V>, ReplayError<V>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let (index, &(survivor, removed)) = self.merges.next()?;
        let result = self.step(index, survivor, removed);
        self.failed = result.is_err();
        Some(result)
    }
}
