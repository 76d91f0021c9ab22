//! ipfilter: keep or drop stdin IP addresses that fall inside a filter list.

use clap::{ArgGroup, Parser};
use ipfilter::{Family, FilterConfig, FilterMode};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ipfilter")]
#[command(version)]
#[command(about = "Intersect or exclude an IP address list with a filter subnet list", long_about = None)]
#[command(after_help = "Input must be an IP address list read from stdin; subnets are not allowed.\n\
Filter may contain IP addresses, ranges ip1-ip2 and ip/prefixlen.\n\
Output goes to stdout.")]
#[command(group(ArgGroup::new("family").args(["ipv4", "ipv6"])))]
struct Cli {
    /// IPv4 list (default)
    #[arg(short = '4')]
    ipv4: bool,

    /// IPv6 list
    #[arg(short = '6')]
    ipv6: bool,

    /// Keep addresses inside (intersect) or outside (exclude) the filter list
    #[arg(long, value_enum)]
    mode: FilterMode,

    /// Filter subnet list file
    #[arg(long)]
    filter: PathBuf,
}

impl Cli {
    fn config(&self) -> FilterConfig {
        let family = if self.ipv6 { Family::V6 } else { Family::V4 };
        FilterConfig::new(family, self.mode, self.filter.clone())
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.config();

    let stdin = io::stdin();
    let stdout = io::stdout();
    match ipfilter::run(&config, stdin.lock(), stdout.lock()) {
        Ok(stats) => {
            log::debug!(
                "{} addresses read, {} passed, {} rejected",
                stats.read,
                stats.passed,
                stats.rejected
            );
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_v6_intersect() {
        let cli = Cli::try_parse_from(["ipfilter", "-6", "--mode", "intersect", "--filter", "list.txt"]).unwrap();
        let config = cli.config();
        assert_eq!(config.family, Family::V6);
        assert_eq!(config.mode, FilterMode::Intersect);
        assert_eq!(config.filter_path, PathBuf::from("list.txt"));
    }

    #[test]
    fn test_default_family_is_v4() {
        let cli = Cli::try_parse_from(["ipfilter", "--mode", "exclude", "--filter", "list.txt"]).unwrap();
        assert_eq!(cli.config().family, Family::V4);
    }

    #[test]
    fn test_mode_is_required() {
        assert!(Cli::try_parse_from(["ipfilter", "--filter", "list.txt"]).is_err());
        assert!(Cli::try_parse_from(["ipfilter", "--mode", "union", "--filter", "list.txt"]).is_err());
        assert!(Cli::try_parse_from(["ipfilter", "--mode", "exclude"]).is_err());
    }

    #[test]
    fn test_families_conflict() {
        assert!(Cli::try_parse_from(["ipfilter", "-4", "-6", "--mode", "exclude", "--filter", "x"]).is_err());
    }
}
