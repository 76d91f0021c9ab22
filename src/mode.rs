//! Filter mode selection.

use std::fmt;

/// Polarity of the membership verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum FilterMode {
    /// Pass addresses outside the range table
    Exclude,
    /// Pass addresses inside the range table
    Intersect,
}

impl FilterMode {
    /// Turn a table lookup result into a pass/drop decision.
    pub fn verdict(self, hit: bool) -> bool {
        match self {
            FilterMode::Exclude => !hit,
            FilterMode::Intersect => hit,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Exclude => "exclude",
            FilterMode::Intersect => "intersect",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FilterMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exclude" => Ok(FilterMode::Exclude),
            "intersect" => Ok(FilterMode::Intersect),
            _ => Err(crate::Error::Config(format!("bad value for mode : {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict() {
        assert!(FilterMode::Intersect.verdict(true));
        assert!(!FilterMode::Intersect.verdict(false));
        assert!(!FilterMode::Exclude.verdict(true));
        assert!(FilterMode::Exclude.verdict(false));
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("exclude".parse::<FilterMode>().unwrap(), FilterMode::Exclude);
        assert_eq!("intersect".parse::<FilterMode>().unwrap(), FilterMode::Intersect);

        let err = "union".parse::<FilterMode>().unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(FilterMode::Exclude.to_string(), "exclude");
        assert_eq!(FilterMode::Intersect.to_string(), "intersect");
    }
}
