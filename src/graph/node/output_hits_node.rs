use std::fs::File;
use std::io::{BufWriter, Stdout, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use flate2::{write::GzEncoder, Compression};

use crate::graph::*;

/// Destination of the tab-separated hits.
pub enum HitsWriter {
    Stdout(BufWriter<Stdout>),
    File(BufWriter<File>),
    Gzip(BufWriter<GzEncoder<File>>),
    Other(Box<dyn Write + Send>),
}

impl HitsWriter {
    /// Flush buffered hits and, for gzip output, write the gzip trailer.
    pub fn finish(&mut self) -> std::io::Result<()> {
        match self {
            HitsWriter::Gzip(w) => {
                w.flush()?;
                w.get_mut().try_finish()
            }
            w => w.flush(),
        }
    }
}

impl Write for HitsWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            HitsWriter::Stdout(w) => w.write(buf),
            HitsWriter::File(w) => w.write(buf),
            HitsWriter::Gzip(w) => w.write(buf),
            HitsWriter::Other(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            HitsWriter::Stdout(w) => w.flush(),
            HitsWriter::File(w) => w.flush(),
            HitsWriter::Gzip(w) => w.flush(),
            HitsWriter::Other(w) => w.flush(),
        }
    }
}

/// Open the destination for hits, which is standard output if `file` is `None`.
///
/// Files ending in `.gz` are gzip-compressed.
pub fn open_output(file: Option<&str>) -> Result<HitsWriter> {
    let Some(file) = file else {
        return Ok(HitsWriter::Stdout(BufWriter::new(std::io::stdout())));
    };

    let file_io = |e: std::io::Error| Error::FileIo {
        file: file.to_owned(),
        source: Box::new(e),
    };

    if let Some(parent) = std::path::Path::new(file).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(file_io)?;
        }
    }

    let f = File::create(file).map_err(file_io)?;

    if file.ends_with(".gz") {
        Ok(HitsWriter::Gzip(BufWriter::new(GzEncoder::new(f, Compression::default()))))
    } else {
        Ok(HitsWriter::File(BufWriter::new(f)))
    }
}

pub struct OutputHitsNode {
    writer: Mutex<HitsWriter>,
    records: AtomicUsize,
    hits: AtomicUsize,
}

impl OutputHitsNode {
    const NAME: &'static str = "OutputHitsNode";

    /// Write the hits of each record as tab-separated lines to a file or standard output.
    ///
    /// The hits of a record are written together, so they stay contiguous and in order even when
    /// multiple threads are running.
    pub fn new(file: Option<&str>) -> Result<Self> {
        Ok(Self::with_output(open_output(file)?))
    }

    pub fn from_writer(writer: Box<dyn Write + Send>) -> Self {
        Self::with_output(HitsWriter::Other(writer))
    }

    pub fn with_output(writer: HitsWriter) -> Self {
        Self {
            writer: Mutex::new(writer),
            records: AtomicUsize::new(0),
            hits: AtomicUsize::new(0),
        }
    }

    /// Write out everything that is still buffered. Call once after the last record.
    pub fn finish(&self) -> Result<()> {
        self.writer.lock().unwrap().finish()?;
        Ok(())
    }

    /// Number of records seen.
    pub fn records(&self) -> usize {
        self.records.load(Ordering::Relaxed)
    }

    /// Number of hits written.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }
}

impl GraphNode for OutputHitsNode {
    fn run(&self, item: Option<RecordHits>) -> Result<(Option<RecordHits>, bool)> {
        let Some(item) = item else { panic!("Expected some record!") };

        let mut buf = Vec::new();
        for hit in &item.hits {
            hit.write_tsv(&mut buf)?;
        }

        if !buf.is_empty() {
            self.writer.lock().unwrap().write_all(&buf)?;
        }

        self.records.fetch_add(1, Ordering::Relaxed);
        self.hits.fetch_add(item.hits.len(), Ordering::Relaxed);

        Ok((Some(item), false))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
