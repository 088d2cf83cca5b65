//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for tagdir using the
//! `clap` crate. Every subcommand is a thin adapter over one core call: the
//! binary loads the tag record, runs one operation, optionally saves once,
//! and exits.
//!
//! # Commands
//!
//! - **set / remove / remove-all / autoremove**: mutate tags, then persist
//! - **tags / list / existing / nonexisting / unregistered**: print one name per line
//! - **counts**: print `tag: count` pairs, descending by count
//! - **filter / filter-re / filter-partial**: select files, moving matches
//!   into the result subdirectory unless `--no-move` is given
//! - **reset**: restore the flat layout
//! - **completions**: generate a shell completion script

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

/// Tag files in a directory and pick them back out with tag filters
#[derive(Parser, Debug)]
#[command(name = "tagdir", version, about)]
pub struct Cli {
    /// Directory to operate on
    #[arg(short = 'd', long = "dir", global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Suppress informational output (results only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Attach tags to a file
    #[command(visible_alias = "s")]
    Set {
        /// File to tag (does not have to exist yet)
        file: String,

        /// Tags to attach
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Detach tags from a file
    #[command(visible_alias = "rm")]
    Remove {
        /// File to untag
        file: String,

        /// Tags to detach
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Detach every tag from a file
    #[command(name = "remove-all")]
    RemoveAll {
        /// File to untag completely
        file: String,
    },

    /// Drop tag entries whose file no longer exists
    Autoremove,

    /// Show the tags attached to a file
    Tags {
        /// File to inspect
        file: String,
    },

    /// List all tagged files
    #[command(visible_alias = "ls")]
    List,

    /// List taggable files present on disk
    Existing,

    /// List tagged files missing from disk
    Nonexisting,

    /// List files on disk that carry no tags
    Unregistered,

    /// Show per-tag usage counts
    Counts {
        /// Only count tags containing this substring
        #[arg(default_value = "")]
        search: String,
    },

    /// Select files by exact tags and move them into the result directory
    #[command(visible_alias = "f")]
    Filter {
        /// Tags to match
        #[arg(required = true)]
        tags: Vec<String>,

        /// How to combine multiple tags: 'any' or 'all'
        #[arg(short, long, default_value = "any")]
        mode: String,

        /// Only print matches, do not move files
        #[arg(long = "no-move")]
        no_move: bool,
    },

    /// Select files whose tags start with a regular expression match
    #[command(name = "filter-re")]
    FilterRe {
        /// Regular expression, anchored at the start of each tag
        pattern: String,

        /// Only print matches, do not move files
        #[arg(long = "no-move")]
        no_move: bool,
    },

    /// Select files with a tag containing any of the given substrings
    #[command(name = "filter-partial")]
    FilterPartial {
        /// Substrings to look for inside tags
        #[arg(required = true)]
        tags: Vec<String>,

        /// Only print matches, do not move files
        #[arg(long = "no-move")]
        no_move: bool,
    },

    /// Move filtered files back and remove the result directory
    Reset,

    /// Generate a shell completion script on stdout
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Write a completion script for `shell` to stdout
    pub fn print_completions(shell: Shell) {
        let mut command = Self::command();
        clap_complete::generate(shell, &mut command, "tagdir", &mut io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_parse_set() {
        let cli = parse(&["tagdir", "set", "a.txt", "red", "big"]);
        match cli.command {
            Commands::Set { file, tags } => {
                assert_eq!(file, "a.txt");
                assert_eq!(tags, vec!["red", "big"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_set_requires_tags() {
        assert!(Cli::try_parse_from(["tagdir", "set", "a.txt"]).is_err());
    }

    #[test]
    fn test_filter_defaults() {
        let cli = parse(&["tagdir", "filter", "red"]);
        match cli.command {
            Commands::Filter { tags, mode, no_move } => {
                assert_eq!(tags, vec!["red"]);
                assert_eq!(mode, "any");
                assert!(!no_move);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_filter_flags() {
        let cli = parse(&["tagdir", "filter", "red", "--mode", "all", "--no-move"]);
        match cli.command {
            Commands::Filter { mode, no_move, .. } => {
                assert_eq!(mode, "all");
                assert!(no_move);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_dir_flag() {
        let cli = parse(&["tagdir", "reset", "--dir", "/tmp/somewhere"]);
        assert_eq!(cli.dir, PathBuf::from("/tmp/somewhere"));
    }

    #[test]
    fn test_aliases() {
        assert!(matches!(parse(&["tagdir", "ls"]).command, Commands::List));
        assert!(matches!(
            parse(&["tagdir", "f", "red"]).command,
            Commands::Filter { .. }
        ));
    }
}
