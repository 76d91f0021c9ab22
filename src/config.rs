//! Run configuration types.

use std::path::PathBuf;

use crate::FilterMode;

/// Address family of both the filter file and the live stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Family {
    /// 32-bit addresses
    #[default]
    V4,
    /// 128-bit addresses
    V6,
}

impl Family {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::V4 => "ipv4",
            Family::V6 => "ipv6",
        }
    }
}

/// Configuration for a filter run.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Address family
    pub family: Family,
    /// Verdict polarity
    pub mode: FilterMode,
    /// Filter list location
    pub filter_path: PathBuf,
}

impl FilterConfig {
    /// Create a new FilterConfig.
    pub fn new(family: Family, mode: FilterMode, filter_path: impl Into<PathBuf>) -> Self {
        Self {
            family,
            mode,
            filter_path: filter_path.into(),
        }
    }
}
