//! Command-line interface for the WEAO cache refresher
//!
//! The refresher takes no operational arguments; endpoints and output paths
//! are fixed. clap still provides `--help` and `--version` and rejects
//! anything else.

use clap::Parser;

/// Refresh the cached WEAO API documents in .well-known/weao
///
/// Fetches the current, future and past version documents and the executor
/// status document, then writes versions.json and executors.json under
/// .well-known/weao in the working directory.
#[derive(Parser, Debug)]
#[command(name = "weao-cache")]
#[command(about = "Refresh the cached WEAO API documents in .well-known/weao")]
#[command(version)]
pub struct Cli {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        assert!(Cli::try_parse_from(["weao-cache"]).is_ok());
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["weao-cache", "--dest", "out"]).is_err());
    }

    #[test]
    fn test_cli_rejects_positional_args() {
        assert!(Cli::try_parse_from(["weao-cache", "extra"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
