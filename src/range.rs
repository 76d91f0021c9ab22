//! Closed address intervals and filter-line normalization.

use std::fmt;
use std::str::FromStr;

use crate::address::{check_trailing, split_digits, Address};
use crate::error::RangeError;

/// Closed interval `[low, high]` of addresses, `low <= high`.
///
/// The derived ordering compares `low` first and `high` second, which is
/// the order a [`RangeTable`](crate::RangeTable) is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Range<A> {
    low: A,
    high: A,
}

impl<A: Address> Range<A> {
    /// Create a range, rejecting `high < low`.
    pub fn new(low: A, high: A) -> Result<Self, RangeError> {
        if high < low {
            return Err(RangeError::Inverted {
                low: low.display(),
                high: high.display(),
            });
        }
        Ok(Self { low, high })
    }

    /// Range covering a single address.
    pub fn host(addr: A) -> Self {
        Self {
            low: addr,
            high: addr,
        }
    }

    /// Range covering the subnet `addr/prefix_len`.
    ///
    /// Host bits of `addr` are cleared for the low bound and set for the
    /// high bound.
    pub fn subnet(addr: A, prefix_len: u8) -> Result<Self, RangeError> {
        let (mask, host) = A::prefix_mask(prefix_len)
            .zip(A::host_mask(prefix_len))
            .ok_or_else(|| RangeError::InvalidPrefix(prefix_len.to_string()))?;
        let low = addr & mask;
        Ok(Self {
            low,
            high: low | host,
        })
    }

    /// Parse one filter-file entry.
    ///
    /// Accepted forms are `A`, `A1-A2` and `A/P`. Text after the entry is
    /// ignored when separated from it by whitespace.
    pub fn parse(line: &str) -> Result<Self, RangeError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(RangeError::Empty);
        }

        let (addr, rest) = A::scan(line)?;
        let (range, rest) = if let Some(prefix) = rest.strip_prefix('/') {
            let (digits, rest) = split_digits(prefix);
            let prefix_len = digits
                .parse::<u8>()
                .map_err(|_| RangeError::InvalidPrefix(prefix.to_string()))?;
            (Self::subnet(addr, prefix_len)?, rest)
        } else if let Some(last) = rest.strip_prefix('-') {
            let (high, rest) = A::scan(last)?;
            (Self::new(addr, high)?, rest)
        } else {
            (Self::host(addr), rest)
        };
        check_trailing(rest)?;
        Ok(range)
    }

    /// Lower bound.
    pub fn low(&self) -> A {
        self.low
    }

    /// Upper bound.
    pub fn high(&self) -> A {
        self.high
    }

    /// Smallest range covering both `self` and `other`.
    pub(crate) fn union(&self, other: &Self) -> Self {
        Self {
            low: self.low.min(other.low),
            high: self.high.max(other.high),
        }
    }

    /// Check if `addr` lies within this range.
    pub fn contains(&self, addr: A) -> bool {
        self.low <= addr && addr <= self.high
    }
}

impl<A: Address> FromStr for Range<A> {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<A: Address> fmt::Display for Range<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low.to_ip(), self.high.to_ip())
    }
}
