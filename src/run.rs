use std::time::Instant;

use crate::config::*;
use crate::errors::*;
use crate::graph::node::*;
use crate::graph::*;

/// Totals from one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub records: usize,
    pub hits: usize,
}

/// Scan every record of a fasta file and write the hits.
///
/// The consensus is compiled before the input is opened, so a bad pattern fails before any
/// sequence is read.
pub fn run(config: &RunConfig) -> Result<RunStats> {
    config.check()?;
    let pattern = config.scan.compile(&config.consensus)?;

    log::info!(
        "scanning {} for \"{}\" ({:?}, both strands: {}, overlap: {}, ignore repeat: {})",
        config.input,
        config.consensus,
        config.scan.syntax,
        config.scan.both_strands,
        config.scan.allow_overlap,
        config.scan.ignore_repeat
    );

    let mut graph = Graph::new();
    graph.add(InputFastaNode::new(&config.input)?);
    graph.add(ScanMotifNode::new(pattern, config.scan));
    if log::log_enabled!(log::Level::Trace) {
        graph.add(DbgNode::new());
    }
    let output = graph.add(OutputHitsNode::new(config.output.as_deref())?);

    let start = Instant::now();
    if config.threads > 1 {
        graph.run_with_threads(config.threads)?;
    } else {
        graph.run()?;
    }
    output.finish()?;

    let stats = RunStats {
        records: output.records(),
        hits: output.hits(),
    };
    log::info!(
        "found {} hits in {} records in {:.3}s",
        stats.hits,
        stats.records,
        start.elapsed().as_secs_f64()
    );

    Ok(stats)
}
