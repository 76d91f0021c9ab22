//! ipfilter - Classify IP address lists against a set of address ranges.
//!
//! A filter list of single addresses, address pairs (`A1-A2`) and CIDR
//! subnets (`A/P`) is normalized into closed intervals, sorted and
//! deduplicated once. Every address of the live stream is then looked up in
//! the resulting table and passed through or dropped depending on the
//! [`FilterMode`].
//!
//! # Quick Start
//!
//! ```
//! use ipfilter::{FilterMode, IpFilter, RangeTable};
//!
//! let table: RangeTable<u32> = ["10.0.0.0/24", "192.168.1.10-192.168.1.20"]
//!     .iter()
//!     .map(|line| line.parse().unwrap())
//!     .collect();
//!
//! let filter = IpFilter::new(table, FilterMode::Exclude);
//! assert!(!filter.check(u32::from(std::net::Ipv4Addr::new(10, 0, 0, 5))));
//! assert!(filter.check(u32::from(std::net::Ipv4Addr::new(10, 0, 1, 5))));
//! ```
//!
//! # Address Families
//!
//! - **IPv4**: addresses are `u32`
//! - **IPv6**: addresses are `u128`, ordered as network-order integers
//!
//! One run handles one family; lines of the other family are malformed.

mod address;
mod config;
mod error;
mod filter;
mod mode;
mod range;
mod table;

use std::io::{BufRead, Write};

// Re-export core types
pub use address::Address;
pub use config::{Family, FilterConfig};
pub use error::{Error, RangeError, Result};
pub use filter::{FilterStats, IpFilter, LoadStats, MAX_LINE_LEN};
pub use mode::FilterMode;
pub use range::Range;
pub use table::{RangeTable, RangeTableBuilder, ALLOC_STEP};

/// Load the configured filter list and classify every record of `input`.
///
/// The filter list is read completely before the first input record.
pub fn run<R: BufRead, W: Write>(config: &FilterConfig, input: R, output: W) -> Result<FilterStats> {
    log::debug!(
        "{} filter, mode {}, list {}",
        config.family.as_str(),
        config.mode,
        config.filter_path.display()
    );

    match config.family {
        Family::V4 => IpFilter::<u32>::load(&config.filter_path, config.mode)?.process(input, output),
        Family::V6 => IpFilter::<u128>::load(&config.filter_path, config.mode)?.process(input, output),
    }
}
