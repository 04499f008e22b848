use std::fmt;
use std::io::Write;

use crate::scan::MatchSpan;

/// Score reported for every hit.
pub const HIT_SCORE: u32 = 0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn symbol(&self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Map a match span to a 1-based inclusive interval on the forward strand.
///
/// Spans on the reverse strand were found in the reverse complement of a sequence of length
/// `len`, so `[start, end)` there covers `[len - end, len - start)` on the forward strand.
pub fn map_to_forward(span: &MatchSpan, len: usize, strand: Strand) -> (usize, usize) {
    match strand {
        Strand::Forward => (span.start + 1, span.end),
        Strand::Reverse => (len - span.end + 1, len - span.start),
    }
}

/// A reported motif occurrence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    pub sequence_name: String,
    /// 1-based inclusive start on the forward strand.
    pub start_1: usize,
    /// 1-based inclusive end on the forward strand.
    pub end_1: usize,
    /// The matched bases as they appear on `strand`.
    pub matched_text: Vec<u8>,
    pub score: u32,
    pub strand: Strand,
}

impl Hit {
    pub fn new(sequence_name: &str, span: &MatchSpan, len: usize, strand: Strand) -> Self {
        let (start_1, end_1) = map_to_forward(span, len, strand);

        Self {
            sequence_name: sequence_name.to_owned(),
            start_1,
            end_1,
            matched_text: span.text.to_owned(),
            score: HIT_SCORE,
            strand,
        }
    }

    /// Write the hit as one tab-separated line.
    ///
    /// The columns are the sequence name, the 0-based start, the end, the matched bases, the
    /// score, and the strand, so the interval reads as half-open.
    pub fn write_tsv(&self, writer: &mut (impl Write + ?Sized)) -> std::io::Result<()> {
        write!(writer, "{}\t{}\t{}\t", self.sequence_name, self.start_1 - 1, self.end_1)?;
        writer.write_all(&self.matched_text)?;
        writeln!(writer, "\t{}\t{}", self.score, self.strand)
    }
}

impl fmt::Display for Hit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.sequence_name,
            self.start_1 - 1,
            self.end_1,
            String::from_utf8_lossy(&self.matched_text),
            self.score,
            self.strand
        )
    }
}
