use crate::graph::*;

pub struct ForEachNode<F: Fn(&mut RecordHits) + Send + Sync> {
    func: F,
}

impl<F: Fn(&mut RecordHits) + Send + Sync> ForEachNode<F> {
    const NAME: &'static str = "ForEachNode";

    /// Apply an arbitrary function on each record and its hits.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F: Fn(&mut RecordHits) + Send + Sync> GraphNode for ForEachNode<F> {
    fn run(&self, item: Option<RecordHits>) -> Result<(Option<RecordHits>, bool)> {
        let Some(mut item) = item else { panic!("Expected some record!") };
        (self.func)(&mut item);
        Ok((Some(item), false))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

pub struct DbgNode;

impl DbgNode {
    /// Print each record and its hits to standard error.
    pub fn new() -> ForEachNode<impl Fn(&mut RecordHits) + Send + Sync> {
        ForEachNode::new(|item| {
            eprint!("{}", item.record);
            for hit in &item.hits {
                eprintln!("  {hit}");
            }
        })
    }
}
