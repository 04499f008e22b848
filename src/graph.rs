use std::marker::{Send, Sync};
use std::sync::Arc;
use std::thread;

use crate::errors::*;
use crate::hit::*;
use crate::record::*;

pub mod node;

/// A sequence record and the hits found in it so far.
#[derive(Debug, Clone)]
pub struct RecordHits {
    pub record: SequenceRecord,
    pub hits: Vec<Hit>,
}

impl RecordHits {
    pub fn new(record: SequenceRecord) -> Self {
        Self {
            record,
            hits: Vec::new(),
        }
    }
}

/// Computation graph of record operations, where each operation is a node.
pub struct Graph<'a> {
    nodes: Vec<Arc<dyn GraphNode + 'a>>,
}

pub trait GraphNode: Send + Sync {
    fn run(&self, item: Option<RecordHits>) -> Result<(Option<RecordHits>, bool)>;
    fn name(&self) -> &'static str;
}

impl<'a> Graph<'a> {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a node to the graph and return the node.
    pub fn add<G: GraphNode + 'a>(&mut self, node: G) -> Arc<G> {
        let a = Arc::new(node);
        let b = Arc::clone(&a);
        self.nodes.push(a);
        b
    }

    /// Run a graph until all records are processed.
    pub fn run(&self) -> Result<()> {
        loop {
            let (_, done) = self.run_one(None)?;
            if done {
                break;
            }
        }

        Ok(())
    }

    /// Run a graph in parallel (multithreading) until all records are processed.
    ///
    /// Records are processed in an arbitrary order across threads.
    pub fn run_with_threads(&self, threads: usize) -> Result<()> {
        assert!(threads >= 1, "Number of threads must be greater than zero");

        thread::scope(|s| {
            let handles = (0..threads)
                .map(|_| s.spawn(|| self.run()))
                .collect::<Vec<_>>();

            handles.into_iter().try_for_each(|h| {
                h.join()
                    .unwrap_or_else(|e| std::panic::resume_unwind(e))
            })
        })
    }

    /// Run a single record through the graph.
    ///
    /// Returns an additional boolean indicating whether the graph is done executing.
    pub fn run_one(&self, mut curr: Option<RecordHits>) -> Result<(Option<RecordHits>, bool)> {
        for node in &self.nodes {
            let (c, done) = node.run(curr)?;
            curr = c;

            if done {
                return Ok((curr, done));
            }
            if curr.is_none() {
                break;
            }
        }

        Ok((curr, false))
    }
}

impl<'a> Default for Graph<'a> {
    fn default() -> Self {
        Self::new()
    }
}
