use anyhow::Context;
use log::{LevelFilter, info, warn};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};
use structopt::StructOpt;
use twwanim::{log::build_pace_logger_for_verbosity, prelude::*};

/// Replays a contraction sequence on a graph and writes the edge-level changes
/// of every contraction as JSON lines
#[derive(Debug, StructOpt)]
struct Opt {
    /// Input graph; `.json` (node-link) or `.gr` (PACE). Node-link ids that
    /// are not integers are relabeled to 0..n in the order of the node list
    #[structopt(parse(from_os_str))]
    graph: PathBuf,

    /// Contraction sequence; `.json` (array of pairs of node ids) or text
    #[structopt(parse(from_os_str))]
    contraction_sequence: PathBuf,

    /// Shift the labels of text files from 1..=n to 0..n
    #[structopt(short = "z", long)]
    zero_indexed: bool,

    /// Write the trace to this file instead of stdout
    #[structopt(short = "o", long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Write the final state as DOT graph
    #[structopt(long, parse(from_os_str))]
    dot: Option<PathBuf>,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    build_pace_logger_for_verbosity(LevelFilter::Info, opt.verbose);

    let labels = if opt.zero_indexed {
        Labels::ZeroBased
    } else {
        Labels::AsWritten
    };

    let (graph, ids) = read_graph_file_with_ids(&opt.graph, labels)
        .with_context(|| format!("Cannot read graph {}", opt.graph.display()))?;
    if let Some(ids) = &ids {
        info!("Relabeled {} node ids to 0..{}", ids.len(), ids.len());
    }

    let sequence =
        read_contraction_sequence_file_with_ids(&opt.contraction_sequence, labels, ids.as_ref())
            .with_context(|| {
                format!(
                    "Cannot read contraction sequence {}",
                    opt.contraction_sequence.display()
                )
            })?;

    info!(
        "Graph with n={} m={}, sequence of {} contractions",
        graph.number_of_nodes(),
        graph.number_of_edges(),
        sequence.len()
    );

    if let Some(remaining) = sequence
        .remaining_nodes(graph.vertices().iter().copied())
        .filter(|remaining| remaining.len() > 1)
    {
        warn!("Sequence is incomplete; {} vertices remain", remaining.len());
    }

    let output: Box<dyn Write> = match &opt.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Cannot create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    let mut writer = TraceWriter::new(output).with_node_ids(ids.as_ref());
    let replay = write_trace(&graph, &sequence, &mut writer)?;
    writer.into_inner()?;

    let twin_width = replay.twin_width();
    let trace = replay.into_trace();

    if let Some(path) = &opt.dot {
        let mut dot = BufWriter::new(
            File::create(path).with_context(|| format!("Cannot create {}", path.display()))?,
        );
        trace.try_write_dot(&mut dot)?;
        dot.flush()?;
    }

    info!("Twin-width of the sequence: {twin_width}");

    Ok(())
}
