use crate::{models::Repository, Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A repository the user wants to come back to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub repo: Repository,
    pub bookmarked_at: DateTime<Utc>,
    #[serde(default)]
    pub note: String,
}

/// Bookmarked repositories, in the order they were added.
///
/// Keyed by repository id; adding the same id twice is a no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Bookmarks {
    entries: Vec<Bookmark>,
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|b| b.repo.id == id)
    }

    pub fn get(&self, id: u64) -> Option<&Bookmark> {
        self.entries.iter().find(|b| b.repo.id == id)
    }

    /// Look up by `owner/name`, ignoring case like GitHub does
    pub fn find_by_name(&self, full_name: &str) -> Option<&Bookmark> {
        self.entries
            .iter()
            .find(|b| b.repo.full_name.eq_ignore_ascii_case(full_name))
    }

    /// Returns false if the repository was already bookmarked
    pub fn add(&mut self, repo: Repository, note: impl Into<String>, now: DateTime<Utc>) -> bool {
        if self.contains(repo.id) {
            return false;
        }

        debug!("Bookmarking {}", repo.full_name);
        self.entries.push(Bookmark {
            repo,
            bookmarked_at: now,
            note: note.into(),
        });
        true
    }

    pub fn remove(&mut self, id: u64) -> Option<Bookmark> {
        let index = self.entries.iter().position(|b| b.repo.id == id)?;
        let removed = self.entries.remove(index);
        debug!("Removed bookmark {}", removed.repo.full_name);
        Some(removed)
    }

    /// Add if absent, remove if present. Returns whether it is now bookmarked.
    pub fn toggle(&mut self, repo: &Repository, now: DateTime<Utc>) -> bool {
        if self.remove(repo.id).is_some() {
            false
        } else {
            self.add(repo.clone(), String::new(), now)
        }
    }

    pub fn set_note(&mut self, id: u64, note: impl Into<String>) -> Result<()> {
        let bookmark = self
            .entries
            .iter_mut()
            .find(|b| b.repo.id == id)
            .ok_or_else(|| Error::NotFound(format!("no bookmark with id {}", id)))?;
        bookmark.note = note.into();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.entries.iter()
    }

    /// The result list shown on the Bookmarks tab
    pub fn repositories(&self) -> Vec<Repository> {
        self.entries.iter().map(|b| b.repo.clone()).collect()
    }
}

/// JSON file holding bookmarks between runs
pub struct BookmarkStore {
    path: PathBuf,
}

impl BookmarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/gitseek/bookmarks.json`
    pub fn default_location() -> Result<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| Error::ConfigError("Could not find data directory".into()))?;
        Ok(Self::new(dir.join("gitseek").join("bookmarks.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file means no bookmarks yet
    pub fn load(&self) -> Result<Bookmarks> {
        if !self.path.exists() {
            return Ok(Bookmarks::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let bookmarks: Bookmarks = serde_json::from_str(&contents)?;
        debug!("Loaded {} bookmarks from {}", bookmarks.len(), self.path.display());
        Ok(bookmarks)
    }

    pub fn save(&self, bookmarks: &Bookmarks) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(bookmarks)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}
