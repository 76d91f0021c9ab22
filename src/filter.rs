//! Filter-file loading and live-stream classification.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::address::Address;
use crate::error::RangeError;
use crate::range::Range;
use crate::table::{RangeTable, RangeTableBuilder};
use crate::{Error, FilterMode, Result};

/// Longest line, line ending excluded, that is parsed as an entry.
pub const MAX_LINE_LEN: usize = 1024;

/// Counters for one filter-list load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Entries added to the table, before deduplication
    pub accepted: u64,
    /// Malformed entries that were skipped
    pub skipped: u64,
}

/// Counters for one pass over the live stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Records that parsed as an address
    pub read: u64,
    /// Records written to the output
    pub passed: u64,
    /// Malformed records that were skipped
    pub rejected: u64,
}

/// Classifies addresses of one family against a range table.
///
/// # Examples
/// ```
/// use ipfilter::{FilterMode, IpFilter};
///
/// let filter = IpFilter::<u32>::from_reader("10.0.0.0/24\n".as_bytes(), FilterMode::Intersect).unwrap();
///
/// let mut output = Vec::new();
/// filter.process("10.0.0.5\n10.0.1.5\n".as_bytes(), &mut output).unwrap();
/// assert_eq!(output, b"10.0.0.5\n");
/// ```
#[derive(Debug, Clone)]
pub struct IpFilter<A> {
    table: RangeTable<A>,
    mode: FilterMode,
    load_stats: LoadStats,
}

impl<A: Address> IpFilter<A> {
    /// Create a filter from a prepared table.
    pub fn new(table: RangeTable<A>, mode: FilterMode) -> Self {
        Self {
            table,
            mode,
            load_stats: LoadStats::default(),
        }
    }

    /// Load the filter list at `path`.
    pub fn load(path: &Path, mode: FilterMode) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::FilterFile {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loading filter list {}", path.display());
        Self::from_reader(file, mode)
    }

    /// Build the range table from filter-list lines.
    ///
    /// Malformed lines are logged and skipped.
    pub fn from_reader<R: Read>(reader: R, mode: FilterMode) -> Result<Self> {
        let mut builder = RangeTableBuilder::new();
        let mut stats = LoadStats::default();

        for_each_line(BufReader::new(reader), |line| {
            let (text, parsed) = match line {
                Ok(text) => (text, Range::<A>::parse(text)),
                Err(e) => ("...", Err(e)),
            };
            match parsed {
                Ok(range) => {
                    builder.push(range)?;
                    stats.accepted += 1;
                }
                Err(e) => {
                    log::warn!("bad filter entry : {} ({})", text, e);
                    stats.skipped += 1;
                }
            }
            Ok(())
        })?;

        log::debug!(
            "filter list: {} entries accepted, {} skipped",
            stats.accepted,
            stats.skipped
        );

        Ok(Self {
            table: builder.build(),
            mode,
            load_stats: stats,
        })
    }

    /// Counters from building the table with [`IpFilter::from_reader`].
    pub fn load_stats(&self) -> LoadStats {
        self.load_stats
    }

    /// The range table.
    pub fn table(&self) -> &RangeTable<A> {
        &self.table
    }

    /// The verdict polarity.
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Check if `addr` should be passed through.
    pub fn check(&self, addr: A) -> bool {
        self.mode.verdict(self.table.contains(addr))
    }

    /// Classify every record of `input`, writing passing addresses to `output`.
    ///
    /// Addresses are written in canonical form, one per line, in arrival
    /// order. Malformed records are logged and skipped.
    pub fn process<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<FilterStats> {
        let mut output = BufWriter::new(output);
        let mut stats = FilterStats::default();

        for_each_line(input, |line| {
            let (text, parsed) = match line {
                Ok(text) => (text, A::parse_host(text)),
                Err(e) => ("...", Err(e)),
            };
            match parsed {
                Ok(addr) => {
                    stats.read += 1;
                    if self.check(addr) {
                        writeln!(output, "{}", addr.to_ip())?;
                        stats.passed += 1;
                    }
                }
                Err(e) => {
                    log::warn!("bad ip : {} ({})", text, e);
                    stats.rejected += 1;
                }
            }
            Ok(())
        })?;

        output.flush()?;
        Ok(stats)
    }
}

/// Call `f` with every line of `reader`, line endings stripped.
///
/// Invalid UTF-8 is replaced rather than failing the read, so such lines
/// end up as malformed entries. Lines longer than [`MAX_LINE_LEN`] are
/// passed as [`RangeError::TooLong`] without being buffered.
fn for_each_line<R, F>(mut reader: R, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(std::result::Result<&str, RangeError>) -> Result<()>,
{
    // Room for the longest line plus "\r\n".
    let limit = MAX_LINE_LEN as u64 + 2;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.by_ref().take(limit).read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }

        let end = buf
            .iter()
            .rposition(|b| *b != b'\n' && *b != b'\r')
            .map_or(0, |i| i + 1);
        if end > MAX_LINE_LEN {
            if buf.last() != Some(&b'\n') {
                skip_line(&mut reader)?;
            }
            f(Err(RangeError::TooLong(MAX_LINE_LEN)))?;
            continue;
        }
        let line = String::from_utf8_lossy(&buf[..end]);
        f(Ok(&*line))?;
    }
}

/// Discard input up to and including the next newline.
fn skip_line<R: BufRead>(reader: &mut R) -> Result<()> {
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(());
        }
        match available.iter().position(|b| *b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(());
            }
            None => {
                let len = available.len();
                reader.consume(len);
            }
        }
    }
}
