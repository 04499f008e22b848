use flate2::read::MultiGzDecoder;
use memchr::{memchr, memchr3};
use needletail::errors::{ParseError, ParseErrorKind};
use needletail::{parse_fastx_reader, FastxReader};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::Arc;

use crate::errors::*;
use crate::record::*;

/// Split a fasta header into the sequence name and the description.
///
/// Leading `>`, tab, and space characters are skipped. The name ends at the first `>`, tab, or
/// space and everything after that separator is the description.
pub fn split_header(header: &[u8]) -> (&[u8], &[u8]) {
    let start = header
        .iter()
        .position(|b| !matches!(b, b'>' | b'\t' | b' '))
        .unwrap_or(header.len());
    let header = &header[start..];

    match memchr3(b'>', b'\t', b' ', header) {
        Some(i) => (&header[..i], &header[i + 1..]),
        None => (header, &[]),
    }
}

/// Replace every base that is not `A`, `C`, `G`, or `T` (in any case) with `N`.
///
/// Lowercase bases are kept so soft-masked regions can still be recognized.
pub fn normalize_bases(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .map(|&b| match b.to_ascii_uppercase() {
            b'A' | b'C' | b'G' | b'T' => b,
            _ => b'N',
        })
        .collect()
}

/// Create a normalized sequence record from a raw header and sequence.
pub fn normalize_record(header: &[u8], seq: &[u8], origin: Arc<Origin>, idx: usize) -> SequenceRecord {
    let (name, description) = split_header(header);

    SequenceRecord::with_origin(
        String::from_utf8_lossy(name).into_owned(),
        String::from_utf8_lossy(description).into_owned(),
        normalize_bases(seq),
        origin,
        idx,
    )
}

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Drop any lines before the first line that starts with `>`.
fn skip_preamble(reader: &mut impl BufRead) -> std::io::Result<()> {
    let mut line_start = true;

    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() || (line_start && buf[0] == b'>') {
            return Ok(());
        }

        let (consumed, next_line_start) = match memchr(b'\n', buf) {
            Some(i) => (i + 1, true),
            None => (buf.len(), false),
        };
        reader.consume(consumed);
        line_start = next_line_start;
    }
}

/// Decompress gzip input and position the reader at the first record header.
fn fasta_stream<'a>(
    mut reader: Box<dyn BufRead + Send + 'a>,
) -> std::io::Result<Box<dyn BufRead + Send + 'a>> {
    if reader.fill_buf()?.starts_with(&GZIP_MAGIC) {
        reader = Box::new(BufReader::new(MultiGzDecoder::new(reader)));
    }
    skip_preamble(&mut reader)?;
    Ok(reader)
}

/// An input without any record header has no records, which is not an error.
fn parse_fasta<'a>(
    reader: Box<dyn BufRead + Send + 'a>,
) -> std::result::Result<Option<Box<dyn FastxReader + 'a>>, ParseError> {
    match parse_fastx_reader(reader) {
        Ok(reader) => Ok(Some(reader)),
        Err(e) if matches!(e.kind, ParseErrorKind::EmptyFile) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Open a fasta file, which may be gzip-compressed. Returns `None` if it holds no records.
pub(crate) fn open_fasta_file<'a>(file: &str) -> Result<Option<Box<dyn FastxReader + 'a>>> {
    let file_io = |e: BoxError| Error::FileIo {
        file: file.to_owned(),
        source: e,
    };

    let f = File::open(file).map_err(|e| file_io(Box::new(e)))?;
    let stream = fasta_stream(Box::new(BufReader::new(f))).map_err(|e| file_io(Box::new(e)))?;
    parse_fasta(stream).map_err(|e| file_io(Box::new(e)))
}

/// Open fasta-formatted bytes, which may be gzip-compressed. Returns `None` if they hold no
/// records.
pub(crate) fn open_fasta_bytes(bytes: &[u8]) -> Result<Option<Box<dyn FastxReader + '_>>> {
    let stream = fasta_stream(Box::new(bytes)).map_err(|e| Error::BytesIo(Box::new(e)))?;
    parse_fasta(stream).map_err(|e| Error::BytesIo(Box::new(e)))
}

/// Read all records from a fasta file, which may be gzip-compressed.
pub fn read_records(file: impl AsRef<str>) -> Result<Vec<SequenceRecord>> {
    let reader = open_fasta_file(file.as_ref())?;
    collect_records(reader, Arc::new(Origin::File(file.as_ref().to_owned())))
}

/// Read all records from fasta-formatted bytes.
pub fn records_from_bytes(bytes: &[u8]) -> Result<Vec<SequenceRecord>> {
    let reader = open_fasta_bytes(bytes)?;
    collect_records(reader, Arc::new(Origin::Bytes))
}

fn collect_records(
    reader: Option<Box<dyn FastxReader + '_>>,
    origin: Arc<Origin>,
) -> Result<Vec<SequenceRecord>> {
    let mut records = Vec::new();
    let Some(mut reader) = reader else {
        return Ok(records);
    };

    while let Some(record) = reader.next() {
        let idx = records.len();
        let record = record.map_err(|e| Error::ParseRecord {
            origin: (*origin).clone(),
            idx,
            source: Box::new(e),
        })?;

        records.push(normalize_record(record.id(), &record.seq(), Arc::clone(&origin), idx));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_name_and_description() {
        assert_eq!(split_header(b"chr1 some description"), (&b"chr1"[..], &b"some description"[..]));
        assert_eq!(split_header(b"chr1\tdesc"), (&b"chr1"[..], &b"desc"[..]));
        assert_eq!(split_header(b"chr1"), (&b"chr1"[..], &b""[..]));
    }

    #[test]
    fn header_leading_separators_skipped() {
        assert_eq!(split_header(b"> \tchrX rest"), (&b"chrX"[..], &b"rest"[..]));
        assert_eq!(split_header(b"   "), (&b""[..], &b""[..]));
    }

    #[test]
    fn normalize_keeps_soft_masking() {
        assert_eq!(normalize_bases(b"ACGTacgt"), b"ACGTacgt");
        assert_eq!(normalize_bases(b"ARYnxU-."), b"ANNNNNNN");
    }

    #[test]
    fn bytes_multiline_records() {
        let fasta = b">seq1 first record\nACGT\nacgt\n>seq2\nNNRA\n";
        let records = records_from_bytes(fasta).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name(), "seq1");
        assert_eq!(records[0].description(), "first record");
        assert_eq!(records[0].bases(), b"ACGTacgt");
        assert_eq!(records[0].idx(), 0);
        assert_eq!(records[1].name(), "seq2");
        assert_eq!(records[1].description(), "");
        assert_eq!(records[1].bases(), b"NNNA");
        assert_eq!(records[1].idx(), 1);
    }

    #[test]
    fn empty_input_has_no_records() {
        assert!(records_from_bytes(b"").unwrap().is_empty());
        assert!(records_from_bytes(b"only a comment\nand no header\n").unwrap().is_empty());
    }

    #[test]
    fn lines_before_first_header_skipped() {
        let records = records_from_bytes(b"junk line\n; another >one\n>a\nACGT\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "a");
        assert_eq!(records[0].bases(), b"ACGT");
    }

    #[test]
    fn gzip_bytes_with_preamble() {
        use flate2::{write::GzEncoder, Compression};
        use std::io::Write;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"# made by hand\n>g\nGAATTC\n").unwrap();
        let gz = encoder.finish().unwrap();

        let records = records_from_bytes(&gz).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bases(), b"GAATTC");

        let empty = GzEncoder::new(Vec::new(), Compression::default()).finish().unwrap();
        assert!(records_from_bytes(&empty).unwrap().is_empty());
    }

    #[test]
    fn missing_file() {
        let err = read_records("does/not/exist.fa").unwrap_err();
        assert!(matches!(err, Error::FileIo { .. }));
    }
}
