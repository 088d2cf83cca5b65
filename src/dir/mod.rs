//! Directory state machine for tagdir
//!
//! A managed directory is always in one of two layouts: flat (every tracked
//! file directly under the base directory) or filtered (the current filter's
//! matches relocated into a result subdirectory). [`TaggedDirectory`] owns
//! the base path and the tag store and performs the moves between the two
//! layouts.
//!
//! Physical filters are mutually exclusive, never additive: every filter
//! with `apply = true` resets the layout to flat before moving its own
//! matches, so repeated filters never compound. Pure-query filters
//! (`apply = false`) never touch the filesystem.
//!
//! File moves are best-effort batches: a file that fails to move is reported
//! on stderr and skipped, files already moved stay moved, and the batch
//! continues. There is no rollback.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use regex::Regex;

use crate::store::TagStore;

pub mod error;

pub use error::DirError;

/// How multiple tags combine in an exact-tag filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Match files carrying at least one of the tags (OR logic)
    Any,
    /// Match files carrying every one of the tags (AND logic)
    All,
}

impl FromStr for FilterMode {
    type Err = DirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Self::Any),
            "all" => Ok(Self::All),
            other => Err(DirError::InvalidMode(other.to_string())),
        }
    }
}

/// Names reserved inside the managed directory
#[derive(Debug, Clone)]
pub struct DirOptions {
    /// Filename of the JSON tag record
    pub record_filename: String,
    /// Name of the result subdirectory filters move matches into
    pub result_directory: String,
}

impl Default for DirOptions {
    fn default() -> Self {
        Self {
            record_filename: "tagdir.json".to_string(),
            result_directory: "tagdir_result".to_string(),
        }
    }
}

/// A directory whose files carry tags in a sidecar record
///
/// Owns the [`TagStore`] for the directory. Tag mutations stay in memory
/// until [`TaggedDirectory::save`]; filters and [`TaggedDirectory::reset`]
/// move files on disk but never touch the record, so a file's tags are
/// independent of whether it currently sits in the base directory or in the
/// result subdirectory.
#[derive(Debug)]
pub struct TaggedDirectory {
    path: PathBuf,
    result_path: PathBuf,
    record_filename: String,
    store: TagStore,
}

impl TaggedDirectory {
    /// Open a directory for tag management
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not an existing directory or the tag
    /// record is present but malformed.
    pub fn open<P: AsRef<Path>>(path: P, options: DirOptions) -> Result<Self, DirError> {
        let path = path.as_ref().to_path_buf();
        let store = TagStore::load(&path, &options.record_filename)?;
        let result_path = path.join(&options.result_directory);

        Ok(Self {
            path,
            result_path,
            record_filename: options.record_filename,
            store,
        })
    }

    /// The managed base directory
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The result subdirectory (whether or not it currently exists)
    #[must_use]
    pub fn result_path(&self) -> &Path {
        &self.result_path
    }

    /// The underlying tag store
    #[must_use]
    pub fn store(&self) -> &TagStore {
        &self.store
    }

    /// Attach tags to a filename (see [`TagStore::set_tags`])
    pub fn set_tags(&mut self, filename: &str, tags: &[String]) {
        self.store.set_tags(filename, tags);
    }

    /// Detach tags from a filename (see [`TagStore::remove_tags`])
    pub fn remove_tags(&mut self, filename: &str, tags: &[String]) {
        self.store.remove_tags(filename, tags);
    }

    /// Delete every tag of a filename (see [`TagStore::remove_all_tags`])
    pub fn remove_all_tags(&mut self, filename: &str) -> bool {
        self.store.remove_all_tags(filename)
    }

    /// Tags attached to a filename, in insertion order
    #[must_use]
    pub fn tags_of(&self, filename: &str) -> &[String] {
        self.store.tags_of(filename)
    }

    /// All tracked filenames, in sorted order
    #[must_use]
    pub fn tracked_files(&self) -> Vec<&String> {
        self.store.tracked_files()
    }

    /// Tag occurrence counts (see [`TagStore::count_tags`])
    #[must_use]
    pub fn count_tags(&self, search: &str) -> Vec<(String, usize)> {
        self.store.count_tags(search)
    }

    /// Persist the tag record (see [`TagStore::save`])
    ///
    /// # Errors
    ///
    /// Returns an error if the record file cannot be written.
    pub fn save(&self) -> Result<(), DirError> {
        Ok(self.store.save()?)
    }

    /// Regular files physically present in the directory
    ///
    /// Lists files directly under the base directory plus, if it exists,
    /// directly under the result subdirectory. The tag record itself and any
    /// directories are excluded. Sorted order.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory listing fails.
    pub fn existing_files(&self) -> Result<Vec<String>, DirError> {
        let mut files = self.files_directly_under(&self.path)?;

        if self.result_path.is_dir() {
            files.extend(self.files_directly_under(&self.result_path)?);
        }

        files.sort();
        Ok(files)
    }

    /// Tracked filenames with no physical file in either location
    ///
    /// # Errors
    ///
    /// Returns an error if a directory listing fails.
    pub fn nonexisting_tracked(&self) -> Result<Vec<String>, DirError> {
        let existing: HashSet<String> = self.existing_files()?.into_iter().collect();

        Ok(self
            .store
            .tracked_files()
            .into_iter()
            .filter(|filename| !existing.contains(*filename))
            .cloned()
            .collect())
    }

    /// Physical files that carry no tags
    ///
    /// # Errors
    ///
    /// Returns an error if a directory listing fails.
    pub fn unregistered_files(&self) -> Result<Vec<String>, DirError> {
        Ok(self
            .existing_files()?
            .into_iter()
            .filter(|filename| !self.store.contains(filename))
            .collect())
    }

    /// Drop every tracked filename whose file no longer exists
    ///
    /// Returns the filenames that were dropped. Does not persist; the caller
    /// decides when to [`TaggedDirectory::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if a directory listing fails.
    pub fn autoremove(&mut self) -> Result<Vec<String>, DirError> {
        let stale = self.nonexisting_tracked()?;

        for filename in &stale {
            self.store.remove_all_tags(filename);
        }

        Ok(stale)
    }

    /// Select files by exact tag membership
    ///
    /// With [`FilterMode::Any`] a file matches if at least one of `tags` is
    /// among its tags; with [`FilterMode::All`] every listed tag must be.
    /// When `apply` is true the layout is reset and the physically present
    /// matches are moved into the result subdirectory. The match list is
    /// returned either way.
    ///
    /// # Errors
    ///
    /// Returns an error if resetting or listing fails. Individual move
    /// failures are reported on stderr and skipped.
    pub fn filter_by_tags(
        &self,
        tags: &[String],
        mode: FilterMode,
        apply: bool,
    ) -> Result<Vec<String>, DirError> {
        let matches: Vec<String> = self
            .store
            .entries()
            .filter(|(_, file_tags)| match mode {
                FilterMode::Any => tags.iter().any(|tag| file_tags.contains(tag)),
                FilterMode::All => tags.iter().all(|tag| file_tags.contains(tag)),
            })
            .map(|(filename, _)| filename.clone())
            .collect();

        if apply {
            self.apply_result(&matches)?;
        }

        Ok(matches)
    }

    /// Select files whose tags match a regular expression
    ///
    /// The pattern is anchored at the start of each tag but does not have to
    /// consume the whole tag, so `fi` matches the tag `fiction` while
    /// `ction` matches nothing. Same move semantics as
    /// [`TaggedDirectory::filter_by_tags`].
    ///
    /// # Errors
    ///
    /// Returns [`DirError::BadPattern`] for an invalid expression, before
    /// any file is moved.
    pub fn filter_by_pattern(&self, pattern: &str, apply: bool) -> Result<Vec<String>, DirError> {
        let regex = Regex::new(&format!("^(?:{pattern})"))?;

        let matches: Vec<String> = self
            .store
            .entries()
            .filter(|(_, file_tags)| file_tags.iter().any(|tag| regex.is_match(tag)))
            .map(|(filename, _)| filename.clone())
            .collect();

        if apply {
            self.apply_result(&matches)?;
        }

        Ok(matches)
    }

    /// Select files with a tag containing any of the query strings
    ///
    /// A file matches if at least one of its tags contains at least one of
    /// `queries` as a substring. Same move semantics as
    /// [`TaggedDirectory::filter_by_tags`].
    ///
    /// # Errors
    ///
    /// Returns an error if resetting or listing fails.
    pub fn filter_by_partial_tags(
        &self,
        queries: &[String],
        apply: bool,
    ) -> Result<Vec<String>, DirError> {
        let matches: Vec<String> = self
            .store
            .entries()
            .filter(|(_, file_tags)| {
                file_tags
                    .iter()
                    .any(|tag| queries.iter().any(|query| tag.contains(query.as_str())))
            })
            .map(|(filename, _)| filename.clone())
            .collect();

        if apply {
            self.apply_result(&matches)?;
        }

        Ok(matches)
    }

    /// Restore the flat layout
    ///
    /// Moves every regular file directly under the result subdirectory back
    /// into the base directory, then removes the subdirectory. A no-op when
    /// the subdirectory does not exist. If the subdirectory cannot be
    /// removed because something is still in it, it is left in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the result subdirectory cannot be listed.
    pub fn reset(&self) -> Result<(), DirError> {
        if !self.result_path.is_dir() {
            return Ok(());
        }

        for entry in fs::read_dir(&self.result_path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let target = self.path.join(entry.file_name());
            if let Err(e) = fs::rename(entry.path(), &target) {
                eprintln!(
                    "Warning: could not move '{}' back to {}: {e}",
                    entry.file_name().to_string_lossy(),
                    self.path.display()
                );
            }
        }

        // Leftover entries keep the directory alive; that is not an error.
        let _ = fs::remove_dir(&self.result_path);

        Ok(())
    }

    /// Reset, then move the physically present `files` into the result
    /// subdirectory, creating it on the first move
    fn apply_result(&self, files: &[String]) -> Result<(), DirError> {
        self.reset()?;

        let mut created = false;
        for filename in files {
            let source = self.path.join(filename);
            if !source.is_file() {
                continue;
            }

            if !created {
                fs::create_dir_all(&self.result_path)?;
                created = true;
            }

            if let Err(e) = fs::rename(&source, self.result_path.join(filename)) {
                eprintln!(
                    "Warning: could not move '{filename}' into {}: {e}",
                    self.result_path.display()
                );
            }
        }

        Ok(())
    }

    fn files_directly_under(&self, dir: &Path) -> Result<Vec<String>, DirError> {
        let mut files = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if name == self.record_filename {
                continue;
            }

            files.push(name);
        }

        Ok(files)
    }
}
