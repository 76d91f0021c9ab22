//! Sorted range table and membership lookup.

use crate::address::Address;
use crate::error::Result;
use crate::range::Range;

/// Number of entries the builder grows by at a time.
pub const ALLOC_STEP: usize = 16384;

/// Collects normalized ranges in arrival order.
#[derive(Debug)]
pub struct RangeTableBuilder<A> {
    ranges: Vec<Range<A>>,
}

impl<A: Address> RangeTableBuilder<A> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Append a range.
    ///
    /// Storage grows in steps of [`ALLOC_STEP`] entries. A failed
    /// reservation is reported as [`Error::OutOfMemory`](crate::Error::OutOfMemory).
    pub fn push(&mut self, range: Range<A>) -> Result<()> {
        if self.ranges.len() == self.ranges.capacity() {
            self.ranges.try_reserve_exact(ALLOC_STEP)?;
        }
        self.ranges.push(range);
        Ok(())
    }

    /// Number of ranges collected so far, duplicates included.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if no ranges were collected.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Sort, drop exact duplicates and freeze the table.
    pub fn build(self) -> RangeTable<A> {
        RangeTable::from_ranges(self.ranges)
    }
}

impl<A: Address> Default for RangeTableBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable table of ranges sorted by `(low, high)`.
///
/// Entries may overlap or touch; only bit-identical duplicates are removed.
/// Lookups go through a separate index in which overlapping entries are
/// merged, so that upper bounds grow monotonically along the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeTable<A> {
    ranges: Vec<Range<A>>,
    index: Vec<Range<A>>,
}

impl<A: Address> RangeTable<A> {
    /// Build a table from ranges in any order.
    pub fn from_ranges(mut ranges: Vec<Range<A>>) -> Self {
        ranges.sort_unstable();
        ranges.dedup();
        ranges.shrink_to_fit();

        let index = merge_overlapping(&ranges);
        log::debug!(
            "range table built: {} entries, {} merged intervals",
            ranges.len(),
            index.len()
        );

        Self { ranges, index }
    }

    /// Number of distinct ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if the table holds no ranges.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The sorted, deduplicated ranges.
    pub fn ranges(&self) -> &[Range<A>] {
        &self.ranges
    }

    /// Iterate over the sorted, deduplicated ranges.
    pub fn iter(&self) -> std::slice::Iter<'_, Range<A>> {
        self.ranges.iter()
    }

    /// Check if `addr` lies within any range of the table.
    ///
    /// The search starts at the middle of the window `[start, end)`. A slot
    /// whose low bound is above `addr` closes the window there and moves to
    /// the middle of the lower part; a slot that ends below `addr` opens the
    /// window after it and moves forward by half the remaining distance, at
    /// least one slot.
    pub fn contains(&self, addr: A) -> bool {
        let index = &self.index;
        let mut end = index.len();
        let mut start = 0;
        let mut pos = end / 2;

        while pos < end {
            let range = &index[pos];
            if addr < range.low() {
                end = pos;
                pos = start + (pos - start) / 2;
            } else if addr <= range.high() {
                return true;
            } else {
                start = pos + 1;
                pos += ((end - pos) / 2).max(1);
            }
        }

        false
    }
}

impl<'a, A: Address> IntoIterator for &'a RangeTable<A> {
    type Item = &'a Range<A>;
    type IntoIter = std::slice::Iter<'a, Range<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<A: Address> FromIterator<Range<A>> for RangeTable<A> {
    fn from_iter<I: IntoIterator<Item = Range<A>>>(iter: I) -> Self {
        Self::from_ranges(iter.into_iter().collect())
    }
}

/// Merge sorted ranges whose intervals overlap.
///
/// Adjacent but disjoint ranges stay separate.
fn merge_overlapping<A: Address>(sorted: &[Range<A>]) -> Vec<Range<A>> {
    let mut merged: Vec<Range<A>> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if range.low() <= last.high() => *last = last.union(range),
            _ => merged.push(*range),
        }
    }
    merged
}
