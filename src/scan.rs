use std::iter::FusedIterator;

use crate::config::ScanConfig;
use crate::errors::*;
use crate::hit::*;
use crate::mask;
use crate::patterns::Pattern;
use crate::record::SequenceRecord;
use crate::revcomp::reverse_complement;

/// A match in the sequence that was searched.
///
/// `start` is inclusive and `end` is exclusive, and `start < end` always holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatchSpan<'h> {
    pub start: usize,
    pub end: usize,
    pub text: &'h [u8],
}

/// Iterator over the matches of a pattern in one strand, ordered by start.
pub struct Matches<'p, 'h> {
    pattern: &'p Pattern,
    haystack: &'h [u8],
    cursor: usize,
    allow_overlap: bool,
}

impl<'p, 'h> Iterator for Matches<'p, 'h> {
    type Item = MatchSpan<'h>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.haystack.len() {
            let Some((start, end)) = self.pattern.find_at(self.haystack, self.cursor) else {
                self.cursor = self.haystack.len();
                break;
            };

            if start == end {
                // empty matches are skipped
                self.cursor = start + 1;
                continue;
            }

            self.cursor = if self.allow_overlap { start + 1 } else { end };

            return Some(MatchSpan {
                start,
                end,
                text: &self.haystack[start..end],
            });
        }

        None
    }
}

impl<'p, 'h> FusedIterator for Matches<'p, 'h> {}

/// Lazily scan a sequence for matches of a pattern.
///
/// After a match at `[s, e)`, the next search starts at `s + 1` if overlapping matches are
/// allowed, and at `e` otherwise.
pub fn scan<'p, 'h>(haystack: &'h [u8], pattern: &'p Pattern, allow_overlap: bool) -> Matches<'p, 'h> {
    Matches {
        pattern,
        haystack,
        cursor: 0,
        allow_overlap,
    }
}

fn scan_strand(
    hits: &mut Vec<Hit>,
    record: &SequenceRecord,
    haystack: &[u8],
    strand: Strand,
    pattern: &Pattern,
    config: &ScanConfig,
) {
    hits.extend(
        scan(haystack, pattern, config.allow_overlap)
            .filter(|span| mask::accept(span, haystack, config.ignore_repeat))
            .map(|span| Hit::new(record.name(), &span, record.len(), strand)),
    );
}

/// Find all hits of a pattern in a record.
///
/// Forward strand hits come first. Reverse strand hits follow when `both_strands` is set and are
/// ordered by their start on the reverse complement.
pub fn scan_record(record: &SequenceRecord, pattern: &Pattern, config: &ScanConfig) -> Result<Vec<Hit>> {
    let mut hits = Vec::new();

    scan_strand(&mut hits, record, record.bases(), Strand::Forward, pattern, config);
    let forward = hits.len();

    if config.both_strands {
        let rc = reverse_complement(record.bases())?;
        scan_strand(&mut hits, record, &rc, Strand::Reverse, pattern, config);
    }

    log::debug!(
        "{}: {} forward hits, {} reverse hits",
        record.name(),
        forward,
        hits.len() - forward
    );

    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::ConsensusSyntax;

    fn spans(haystack: &[u8], consensus: &str, allow_overlap: bool) -> Vec<(usize, usize)> {
        let pattern = Pattern::compile(consensus, true).unwrap();
        scan(haystack, &pattern, allow_overlap)
            .map(|s| (s.start, s.end))
            .collect()
    }

    fn intervals(hits: &[Hit]) -> Vec<(usize, usize, Strand)> {
        hits.iter().map(|h| (h.start_1, h.end_1, h.strand)).collect()
    }

    #[test]
    fn non_overlapping() {
        assert_eq!(spans(b"ACGTACGT", "ACGT", false), vec![(0, 4), (4, 8)]);
        assert_eq!(spans(b"AAAA", "AA", false), vec![(0, 2), (2, 4)]);
        assert_eq!(spans(b"AAAAA", "AA", false), vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn overlapping() {
        assert_eq!(spans(b"AAAA", "AA", true), vec![(0, 2), (1, 3), (2, 4)]);
        assert_eq!(spans(b"ACACA", "ACA", true), vec![(0, 3), (2, 5)]);
        assert_eq!(spans(b"ACACA", "ACA", false), vec![(0, 3)]);
    }

    #[test]
    fn overlap_never_repeats() {
        let found = spans(b"AAAAAAA", "A+", true);
        assert_eq!(found, vec![(0, 7), (1, 7), (2, 7), (3, 7), (4, 7), (5, 7), (6, 7)]);

        let found = spans(b"AAAAAAA", "A+", false);
        assert_eq!(found, vec![(0, 7)]);
    }

    #[test]
    fn no_matches() {
        assert!(spans(b"", "ACGT", false).is_empty());
        assert!(spans(b"TTTT", "ACGT", true).is_empty());
        assert!(spans(b"ACG", "ACGT", false).is_empty());
    }

    #[test]
    fn empty_matches_skipped() {
        assert_eq!(spans(b"CACCA", "A*", false), vec![(1, 2), (4, 5)]);
        assert_eq!(spans(b"CCC", "A*", true), vec![]);
    }

    #[test]
    fn match_text() {
        let pattern = Pattern::compile("G[AT]C", true).unwrap();
        let texts = scan(b"GACGTCGGC", &pattern, false)
            .map(|s| s.text.to_vec())
            .collect::<Vec<_>>();
        assert_eq!(texts, vec![b"GAC".to_vec(), b"GTC".to_vec()]);
    }

    #[test]
    fn fused() {
        let pattern = Pattern::compile("AC", true).unwrap();
        let mut matches = scan(b"ACAC", &pattern, false);
        assert!(matches.next().is_some());
        assert!(matches.next().is_some());
        assert!(matches.next().is_none());
        assert!(matches.next().is_none());
    }

    #[test]
    fn record_forward_only() {
        let record = SequenceRecord::new("s", "", "ACGTACGT");
        let config = ScanConfig::default();
        let pattern = config.compile("ACGT").unwrap();
        let hits = scan_record(&record, &pattern, &config).unwrap();

        assert_eq!(
            intervals(&hits),
            vec![(1, 4, Strand::Forward), (5, 8, Strand::Forward)]
        );
        assert!(hits.iter().all(|h| h.matched_text == b"ACGT" && h.score == 0));
    }

    #[test]
    fn record_both_strands_palindrome() {
        let record = SequenceRecord::new("s", "", "ACGT");
        let config = ScanConfig {
            both_strands: true,
            ..Default::default()
        };
        let pattern = config.compile("ACGT").unwrap();
        let hits = scan_record(&record, &pattern, &config).unwrap();

        assert_eq!(
            intervals(&hits),
            vec![(1, 4, Strand::Forward), (1, 4, Strand::Reverse)]
        );
    }

    #[test]
    fn record_reverse_only_hit() {
        // reverse complement is GGGTTTCC
        let record = SequenceRecord::new("s", "", "GGAAACCC");
        let config = ScanConfig {
            both_strands: true,
            ..Default::default()
        };
        let pattern = config.compile("TTTCC").unwrap();
        let hits = scan_record(&record, &pattern, &config).unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(intervals(&hits), vec![(1, 5, Strand::Reverse)]);
        assert_eq!(hits[0].matched_text, b"TTTCC");
        assert_eq!(&record.bases()[0..5], b"GGAAA");
    }

    #[test]
    fn record_ignore_repeat() {
        let record = SequenceRecord::new("s", "", "acgtACGT");

        let config = ScanConfig {
            ignore_repeat: true,
            ..Default::default()
        };
        let pattern = config.compile("ACGT").unwrap();
        let hits = scan_record(&record, &pattern, &config).unwrap();
        assert_eq!(intervals(&hits), vec![(5, 8, Strand::Forward)]);

        let config = ScanConfig::default();
        let pattern = config.compile("ACGT").unwrap();
        let hits = scan_record(&record, &pattern, &config).unwrap();
        assert_eq!(
            intervals(&hits),
            vec![(1, 4, Strand::Forward), (5, 8, Strand::Forward)]
        );
        assert_eq!(hits[0].matched_text, b"acgt");
    }

    #[test]
    fn record_ignore_repeat_case_insensitive_class() {
        // a case-insensitive pattern still matches soft-masked bases, so the mask filter has to
        // remove them
        let record = SequenceRecord::new("s", "", "AAcgTTACGT");
        let config = ScanConfig {
            ignore_repeat: true,
            both_strands: true,
            ..Default::default()
        };
        let pattern = Pattern::compile("(?i)ACGT", true).unwrap();
        let hits = scan_record(&record, &pattern, &config).unwrap();

        assert!(hits.iter().all(|h| !mask::is_soft_masked(&h.matched_text)));
        assert_eq!(
            intervals(&hits),
            vec![(7, 10, Strand::Forward), (7, 10, Strand::Reverse)]
        );
    }

    #[test]
    fn record_iupac_both_strands() {
        let record = SequenceRecord::new("s", "", "CCGAATTC");
        let config = ScanConfig {
            both_strands: true,
            syntax: ConsensusSyntax::Iupac,
            ..Default::default()
        };
        let pattern = config.compile("GAWTYC").unwrap();
        let hits = scan_record(&record, &pattern, &config).unwrap();

        assert_eq!(
            intervals(&hits),
            vec![(3, 8, Strand::Forward), (3, 8, Strand::Reverse)]
        );
    }

    #[test]
    fn record_empty() {
        let record = SequenceRecord::new("empty", "", Vec::new());
        let config = ScanConfig {
            both_strands: true,
            ..Default::default()
        };
        let pattern = config.compile("A").unwrap();
        assert!(scan_record(&record, &pattern, &config).unwrap().is_empty());
    }

    #[test]
    fn record_invalid_base() {
        let record = SequenceRecord::new("bad", "", "ACGTX");
        let config = ScanConfig {
            both_strands: true,
            ..Default::default()
        };
        let pattern = config.compile("ACGT").unwrap();
        assert!(matches!(
            scan_record(&record, &pattern, &config),
            Err(Error::InvalidBase { base: 'X', idx: 4 })
        ));
    }
}
