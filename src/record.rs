use std::fmt;
use std::sync::Arc;

/// Where a sequence record was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    File(String),
    Bytes,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Origin::*;
        match self {
            File(file) => write!(f, "file: \"{}\"", file),
            Bytes => write!(f, "bytes"),
        }
    }
}

/// A named nucleotide sequence after normalization.
///
/// The bases only contain `A`, `C`, `G`, `T`, `N` and the lowercase `a`, `c`, `g`, `t`
/// of soft-masked regions when created through [`normalize_record`](crate::fasta::normalize_record).
/// Records are never modified once created.
#[derive(Debug, Clone)]
pub struct SequenceRecord {
    name: String,
    description: String,
    bases: Vec<u8>,
    origin: Arc<Origin>,
    idx: usize,
}

impl SequenceRecord {
    /// Create a record that did not come from a file.
    ///
    /// The bases are used as-is, without normalization.
    pub fn new(name: impl Into<String>, description: impl Into<String>, bases: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            bases: bases.into(),
            origin: Arc::new(Origin::Bytes),
            idx: 0,
        }
    }

    pub(crate) fn with_origin(
        name: String,
        description: String,
        bases: Vec<u8>,
        origin: Arc<Origin>,
        idx: usize,
    ) -> Self {
        Self {
            name,
            description,
            bases,
            origin,
            idx,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Index of the record within its origin.
    pub fn idx(&self) -> usize {
        self.idx
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Number of bases that are not `N` or `n`.
    pub fn informative_len(&self) -> usize {
        self.bases.iter().filter(|&&b| b != b'N' && b != b'n').count()
    }
}

impl fmt::Display for SequenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "name: {}", self.name)?;
        if !self.description.is_empty() {
            writeln!(f, "description: {}", self.description)?;
        }
        writeln!(f, "bases: {}", String::from_utf8_lossy(&self.bases))?;
        writeln!(f, "from record {} in {}", self.idx, self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn informative_len_skips_n() {
        let record = SequenceRecord::new("chr1", "", "ACNNgtnA");
        assert_eq!(record.len(), 8);
        assert_eq!(record.informative_len(), 5);
    }

    #[test]
    fn empty_record() {
        let record = SequenceRecord::new("empty", "", Vec::new());
        assert!(record.is_empty());
        assert_eq!(record.informative_len(), 0);
        assert_eq!(*record.origin(), Origin::Bytes);
    }

    #[test]
    fn display_includes_origin() {
        let record = SequenceRecord::with_origin(
            "chr2".to_owned(),
            "test".to_owned(),
            b"ACGT".to_vec(),
            Arc::new(Origin::File("genome.fa".to_owned())),
            3,
        );
        let s = record.to_string();
        assert!(s.contains("name: chr2"));
        assert!(s.contains("description: test"));
        assert!(s.contains("from record 3 in file: \"genome.fa\""));
    }
}
