//! Tag store module for tagdir
//!
//! Provides the in-memory mapping from filename to tags, loaded from and
//! persisted to a sidecar JSON record inside the managed directory.
//!
//! The mapping is an owned value created once per invocation and threaded
//! through every operation; mutations stay in memory until [`TagStore::save`]
//! is called explicitly. Each tag list is kept duplicate-free and preserves
//! insertion order, while filenames enumerate in sorted order.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

pub mod error;

pub use error::StoreError;

/// In-memory tag record backed by a JSON file
///
/// Keys are filenames relative to the managed directory, values are the tags
/// attached to that filename. An entry never holds an empty tag list; the
/// entry is deleted instead.
#[derive(Debug)]
pub struct TagStore {
    record_path: PathBuf,
    data: BTreeMap<String, Vec<String>>,
}

impl TagStore {
    /// Load the tag record from `dir`, or start empty if no record exists
    ///
    /// # Arguments
    /// * `dir` - The managed directory
    /// * `record_filename` - Name of the JSON record file inside `dir`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotADirectory`] if `dir` is not an existing
    /// directory (checked before any read), or [`StoreError::Json`] if a
    /// record is present but cannot be parsed.
    pub fn load<P: AsRef<Path>>(dir: P, record_filename: &str) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(StoreError::NotADirectory(dir.to_path_buf()));
        }

        let record_path = dir.join(record_filename);
        let data = if record_path.is_file() {
            let content = fs::read_to_string(&record_path)?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };

        Ok(Self { record_path, data })
    }

    /// Attach tags to a filename, creating its entry on demand
    ///
    /// Union semantics: tags already present are not duplicated. An empty
    /// `tags` slice is a no-op, so an entry with zero tags is never created.
    /// The file itself does not have to exist yet.
    pub fn set_tags(&mut self, filename: &str, tags: &[String]) {
        if tags.is_empty() {
            return;
        }

        let entry = self.data.entry(filename.to_string()).or_default();
        for tag in tags {
            if !entry.contains(tag) {
                entry.push(tag.clone());
            }
        }
    }

    /// Detach the listed tags from a filename
    ///
    /// Unknown filenames and tags not present are ignored. When the last tag
    /// goes, the entry is deleted entirely.
    pub fn remove_tags(&mut self, filename: &str, tags: &[String]) {
        let Some(entry) = self.data.get_mut(filename) else {
            return;
        };

        entry.retain(|tag| !tags.contains(tag));

        if entry.is_empty() {
            self.data.remove(filename);
        }
    }

    /// Delete the entry for a filename, if present
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove_all_tags(&mut self, filename: &str) -> bool {
        self.data.remove(filename).is_some()
    }

    /// Tags attached to a filename, in insertion order
    ///
    /// Returns an empty slice for untracked filenames.
    #[must_use]
    pub fn tags_of(&self, filename: &str) -> &[String] {
        self.data.get(filename).map_or(&[], Vec::as_slice)
    }

    /// Whether a filename has at least one tag
    #[must_use]
    pub fn contains(&self, filename: &str) -> bool {
        self.data.contains_key(filename)
    }

    /// All tracked filenames, in sorted order
    #[must_use]
    pub fn tracked_files(&self) -> Vec<&String> {
        self.data.keys().collect()
    }

    /// Iterate over all entries as (filename, tags) pairs, in sorted order
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.data.iter()
    }

    /// Number of tracked filenames
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no filename is tracked
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Count tag occurrences across all entries
    ///
    /// Only tags containing `search` as a substring are reported (an empty
    /// `search` matches every tag). Sorted descending by count; ties keep
    /// first-seen order.
    #[must_use]
    pub fn count_tags(&self, search: &str) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();

        for tags in self.data.values() {
            for tag in tags {
                match counts.iter_mut().find(|(name, _)| name == tag) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((tag.clone(), 1)),
                }
            }
        }

        // Stable sort keeps the enumeration order between equal counts.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.retain(|(tag, _)| tag.contains(search));
        counts
    }

    /// Write the record back to disk, fully overwriting it
    ///
    /// Uses 4-space indentation and leaves non-ASCII characters unescaped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the record file cannot be written.
    pub fn save(&self) -> Result<(), StoreError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.data.serialize(&mut serializer)?;

        fs::write(&self.record_path, buf)?;
        Ok(())
    }

    /// Path of the JSON record file
    #[must_use]
    pub fn record_path(&self) -> &Path {
        &self.record_path
    }
}
