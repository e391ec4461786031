use anyhow::Context;
use log::{LevelFilter, info};
use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_pcg::Pcg64;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};
use structopt::StructOpt;
use twwanim::{log::build_pace_logger_for_verbosity, prelude::*};

/// Writes a random G(n,p) graph in PACE format together with a random
/// contraction sequence that merges it into a single vertex
#[derive(Debug, StructOpt)]
struct Opt {
    #[structopt(short = "n")]
    nodes: NumNodes,

    #[structopt(short = "p")]
    density: f64,

    #[structopt(short, long)]
    seed: Option<u64>,

    #[structopt(parse(from_os_str))]
    graph_output: PathBuf,

    #[structopt(parse(from_os_str))]
    sequence_output: PathBuf,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn random_sequence<R: Rng>(rng: &mut R, graph: &Graph) -> ContractionSequence {
    let mut order = graph.vertices().to_vec();
    order.shuffle(rng);

    let mut sequence = ContractionSequence::with_capacity(order.len().saturating_sub(1));
    for i in (1..order.len()).rev() {
        let survivor = order[rng.gen_range(0..i)];
        sequence.merge_node_into(order[i], survivor);
    }

    sequence
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    build_pace_logger_for_verbosity(LevelFilter::Info, opt.verbose);

    anyhow::ensure!(
        (0.0..=1.0).contains(&opt.density),
        "density must be within [0, 1]"
    );

    let seed = opt.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
    let mut rng = Pcg64::seed_from_u64(seed);

    let graph: Graph = Graph::random_gnp(&mut rng, opt.nodes, opt.density);
    let sequence = random_sequence(&mut rng, &graph);

    info!(
        "Generated n={} m={} with seed {seed}",
        graph.number_of_nodes(),
        graph.number_of_edges()
    );

    let comment = format!("G(n,p) with n={} p={} seed={seed}", opt.nodes, opt.density);
    let mut writer = BufWriter::new(
        File::create(&opt.graph_output)
            .with_context(|| format!("Cannot create {}", opt.graph_output.display()))?,
    );
    graph.try_write_pace_with(
        &mut writer,
        DEFAULT_PROBLEM_ID,
        &[comment.as_str()],
        Labels::ZeroBased,
    )?;
    writer.flush()?;

    let twin_width = sequence.compute_twin_width(&graph)?;

    let mut writer = BufWriter::new(
        File::create(&opt.sequence_output)
            .with_context(|| format!("Cannot create {}", opt.sequence_output.display()))?,
    );
    sequence.pace_writer(&mut writer, Labels::ZeroBased)?;
    writer.flush()?;

    info!("Sequence of {} contractions has width {twin_width}", sequence.len());

    Ok(())
}
