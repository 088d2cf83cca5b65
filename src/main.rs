//! Tagdir CLI application entry point
//!
//! Each invocation loads the tag record of the chosen directory fresh,
//! performs one operation, and persists at most once before exiting.
//!
//! # Usage
//!
//! ```bash
//! # Tag a file
//! tagdir set report.pdf work urgent
//!
//! # Show what carries which tags
//! tagdir tags report.pdf
//! tagdir counts
//!
//! # Move everything tagged 'work' into the result directory
//! tagdir filter work
//!
//! # Put the files back
//! tagdir reset
//!
//! # Drop entries for deleted files
//! tagdir autoremove
//! ```
//!
//! # Configuration
//!
//! Defaults (quiet mode, the record filename and the result directory name)
//! are read from the user's config directory
//! (`~/.config/tagdir/config.toml` on Linux).

use tagdir::{
    TagdirError,
    cli::{Cli, Commands},
    config::TagdirConfig,
    dir::{DirOptions, FilterMode, TaggedDirectory},
    output,
};

type Result<T> = std::result::Result<T, TagdirError>;

/// Open the directory named on the command line with the configured
/// reserved names
fn open_directory(cli: &Cli, config: &TagdirConfig) -> Result<TaggedDirectory> {
    let options = DirOptions {
        record_filename: config.record_filename.clone(),
        result_directory: config.result_directory.clone(),
    };

    Ok(TaggedDirectory::open(&cli.dir, options)?)
}

/// Print filter matches line by line, plus a summary unless quiet
fn handle_filter_output(matches: &[String], moved: bool, quiet: bool, dir: &TaggedDirectory) {
    for filename in matches {
        println!("{filename}");
    }

    if !quiet {
        if moved {
            println!(
                "{} file(s) matched, moved into {}",
                matches.len(),
                dir.result_path().display()
            );
        } else {
            println!("{} file(s) matched", matches.len());
        }
    }
}

/// Handle the listing commands - print one filename per line
///
/// The `nonexisting` listing is colored red since those files are gone.
///
/// # Errors
///
/// Returns `TagdirError` if a directory listing fails.
fn handle_listing(dir: &TaggedDirectory, command: &Commands) -> Result<()> {
    match command {
        Commands::List => {
            for filename in dir.tracked_files() {
                println!("{filename}");
            }
        }
        Commands::Existing => {
            for filename in dir.existing_files()? {
                println!("{filename}");
            }
        }
        Commands::Nonexisting => {
            for filename in dir.nonexisting_tracked()? {
                println!("{}", output::colorize_filename(&filename, false));
            }
        }
        Commands::Unregistered => {
            for filename in dir.unregistered_files()? {
                println!("{filename}");
            }
        }
        _ => unreachable!(),
    }

    Ok(())
}

/// Main entry point for the tagdir application
///
/// Loads configuration, parses command-line arguments, and dispatches to
/// the matching operation. Mutating commands persist the record exactly
/// once, after the mutation succeeded.
///
/// # Errors
///
/// Returns `TagdirError` if configuration loading fails, the directory
/// cannot be opened, or the operation fails.
fn main() -> Result<()> {
    let config = TagdirConfig::load()?;

    let cli = Cli::parse_args();

    let quiet = cli.quiet || config.quiet;

    if let Commands::Completions { shell } = &cli.command {
        Cli::print_completions(*shell);
        return Ok(());
    }

    let mut dir = open_directory(&cli, &config)?;

    match &cli.command {
        Commands::Set { file, tags } => {
            dir.set_tags(file, tags);
            dir.save()?;
            if !quiet {
                println!("Tagged '{file}' with {} tag(s)", tags.len());
            }
        }
        Commands::Remove { file, tags } => {
            dir.remove_tags(file, tags);
            dir.save()?;
            if !quiet {
                println!("Removed {} tag(s) from '{file}'", tags.len());
            }
        }
        Commands::RemoveAll { file } => {
            let removed = dir.remove_all_tags(file);
            dir.save()?;
            if !quiet {
                if removed {
                    println!("Removed all tags from '{file}'");
                } else {
                    println!("'{file}' had no tags");
                }
            }
        }
        Commands::Autoremove => {
            let removed = dir.autoremove()?;
            dir.save()?;
            for filename in &removed {
                println!("{}", output::colorize_filename(filename, false));
            }
            if !quiet {
                println!("Dropped {} stale entry(s)", removed.len());
            }
        }
        Commands::Tags { file } => {
            for tag in dir.tags_of(file) {
                println!("{tag}");
            }
        }
        Commands::List | Commands::Existing | Commands::Nonexisting | Commands::Unregistered => {
            handle_listing(&dir, &cli.command)?;
        }
        Commands::Counts { search } => {
            for (tag, count) in dir.count_tags(search) {
                println!("{}", output::tag_with_count(&tag, count));
            }
        }
        Commands::Filter { tags, mode, no_move } => {
            let mode: FilterMode = mode.parse()?;
            let apply = !*no_move;
            let matches = dir.filter_by_tags(tags, mode, apply)?;
            handle_filter_output(&matches, apply, quiet, &dir);
        }
        Commands::FilterRe { pattern, no_move } => {
            let apply = !*no_move;
            let matches = dir.filter_by_pattern(pattern, apply)?;
            handle_filter_output(&matches, apply, quiet, &dir);
        }
        Commands::FilterPartial { tags, no_move } => {
            let apply = !*no_move;
            let matches = dir.filter_by_partial_tags(tags, apply)?;
            handle_filter_output(&matches, apply, quiet, &dir);
        }
        Commands::Reset => {
            dir.reset()?;
            if !quiet {
                println!("Restored flat layout in {}", dir.path().display());
            }
        }
        Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}
