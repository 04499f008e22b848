use needletail::FastxReader;

use thread_local::*;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::fasta::*;
use crate::graph::*;

const CHUNK_SIZE: usize = 256;

pub struct InputFastaNode<'reader> {
    reader: Mutex<Option<Box<dyn FastxReader + 'reader>>>,
    buf: ThreadLocal<RefCell<VecDeque<SequenceRecord>>>,
    origin: Arc<Origin>,
    idx: AtomicUsize,
}

impl<'reader> InputFastaNode<'reader> {
    const NAME: &'static str = "InputFastaNode";

    /// Stream normalized records from a fasta file, which may be gzip-compressed.
    ///
    /// Lines before the first header are skipped, and a file without any header has no records.
    pub fn new(file: impl AsRef<str>) -> Result<Self> {
        let reader = Mutex::new(open_fasta_file(file.as_ref())?);

        Ok(Self {
            reader,
            buf: ThreadLocal::new(),
            origin: Arc::new(Origin::File(file.as_ref().to_owned())),
            idx: AtomicUsize::new(0),
        })
    }

    /// Stream normalized records from fasta-formatted bytes.
    pub fn from_bytes(bytes: &'reader [u8]) -> Result<Self> {
        let reader = Mutex::new(open_fasta_bytes(bytes)?);

        Ok(Self {
            reader,
            buf: ThreadLocal::new(),
            origin: Arc::new(Origin::Bytes),
            idx: AtomicUsize::new(0),
        })
    }

    /// Number of records read so far.
    pub fn records_read(&self) -> usize {
        self.idx.load(Ordering::Relaxed)
    }
}

impl<'reader> GraphNode for InputFastaNode<'reader> {
    fn run(&self, item: Option<RecordHits>) -> Result<(Option<RecordHits>, bool)> {
        assert!(item.is_none(), "Expected no input records for {}", Self::NAME);

        let buf = self.buf.get_or(|| RefCell::new(VecDeque::with_capacity(CHUNK_SIZE)));
        let mut b = buf.borrow_mut();

        if b.is_empty() {
            let mut reader = self.reader.lock().unwrap();
            let Some(reader) = reader.as_mut() else {
                return Ok((None, true));
            };

            for _ in 0..CHUNK_SIZE {
                let Some(record) = reader.next() else {
                    break;
                };
                let record = record.map_err(|e| Error::ParseRecord {
                    origin: (*self.origin).clone(),
                    idx: self.idx.load(Ordering::Relaxed),
                    source: Box::new(e),
                })?;
                let idx = self.idx.fetch_add(1, Ordering::Relaxed);

                b.push_back(normalize_record(
                    record.id(),
                    &record.seq(),
                    Arc::clone(&self.origin),
                    idx,
                ));
            }
        }

        match b.pop_front() {
            Some(record) => Ok((Some(RecordHits::new(record)), false)),
            None => Ok((None, true)),
        }
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
