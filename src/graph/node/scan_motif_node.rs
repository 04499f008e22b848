use thread_local::*;

use crate::config::ScanConfig;
use crate::graph::*;
use crate::patterns::Pattern;
use crate::scan::scan_record;

const PROGRESS_INTERVAL: usize = 500;

pub struct ScanMotifNode {
    pattern: Pattern,
    pattern_local: ThreadLocal<Pattern>,
    config: ScanConfig,
}

impl ScanMotifNode {
    const NAME: &'static str = "ScanMotifNode";

    /// Scan each record for a compiled motif pattern and attach the hits to the record.
    ///
    /// The forward strand is always scanned. The reverse complement is scanned too if
    /// `config.both_strands` is set, with its hits mapped back to forward strand coordinates.
    pub fn new(pattern: Pattern, config: ScanConfig) -> Self {
        Self {
            pattern,
            pattern_local: ThreadLocal::new(),
            config,
        }
    }
}

impl GraphNode for ScanMotifNode {
    fn run(&self, item: Option<RecordHits>) -> Result<(Option<RecordHits>, bool)> {
        let Some(mut item) = item else { panic!("Expected some record!") };
        let record = &item.record;

        if record.idx() % PROGRESS_INTERVAL == 0 {
            log::info!(
                "processing # {}: {}, size={}, informative size={}",
                record.idx(),
                record.name(),
                record.len(),
                record.informative_len()
            );
        }

        let pattern = self.pattern_local.get_or(|| self.pattern.clone());
        let hits = scan_record(record, pattern, &self.config)?;
        item.hits.extend(hits);

        Ok((Some(item), false))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
