//! 面板列表：单层目录的条目、高亮与多选

use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub const PARENT_PLACEHOLDER: &str = "..";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMeta {
    /// Always 0 for directories.
    pub size: u64,
    pub modified: Option<SystemTime>,
    pub is_dir: bool,
}

impl FileMeta {
    pub fn file(size: u64, modified: Option<SystemTime>) -> Self {
        Self {
            size,
            modified,
            is_dir: false,
        }
    }

    pub fn dir(modified: Option<SystemTime>) -> Self {
        Self {
            size: 0,
            modified,
            is_dir: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub path: PathBuf,
    pub meta: FileMeta,
}

impl ListingEntry {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, meta: FileMeta) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            meta,
        }
    }

    /// The `..` entry pointing at `parent`.
    pub fn parent(parent: impl Into<PathBuf>) -> Self {
        Self::new(PARENT_PLACEHOLDER, parent, FileMeta::dir(None))
    }

    pub fn is_parent_placeholder(&self) -> bool {
        self.name == PARENT_PLACEHOLDER
    }

    pub fn is_dir(&self) -> bool {
        self.meta.is_dir
    }
}

fn listing_order(a: &ListingEntry, b: &ListingEntry) -> Ordering {
    b.is_parent_placeholder()
        .cmp(&a.is_parent_placeholder())
        .then_with(|| b.is_dir().cmp(&a.is_dir()))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

#[derive(Debug, Clone)]
pub struct PaneListing {
    dir: PathBuf,
    entries: Vec<ListingEntry>,
    highlighted: usize,
    selected: FxHashSet<String>,
}

impl PaneListing {
    /// Builds a listing for `dir`, prepending `..` when `dir` has a parent.
    pub fn from_entries(dir: impl Into<PathBuf>, entries: Vec<ListingEntry>) -> Self {
        let mut listing = Self {
            dir: dir.into(),
            entries: Vec::new(),
            highlighted: 0,
            selected: FxHashSet::default(),
        };
        listing.set_entries(entries);
        listing
    }

    /// Replaces the entries of the current directory, keeping the highlight on the same name
    /// where possible and dropping selections that no longer exist.
    pub fn set_entries(&mut self, mut entries: Vec<ListingEntry>) {
        let keep = self.highlighted().map(|e| e.name.clone());

        entries.retain(|e| !e.is_parent_placeholder());
        if let Some(parent) = self.dir.parent() {
            entries.push(ListingEntry::parent(parent));
        }
        entries.sort_by(listing_order);
        self.entries = entries;

        self.selected
            .retain(|name| self.entries.iter().any(|e| &e.name == name));
        self.highlighted = keep
            .and_then(|name| self.entries.iter().position(|e| e.name == name))
            .unwrap_or(0);
        self.clamp_highlight();
    }

    /// Switches to a new directory: highlight back to the top, selection cleared.
    pub fn change_dir(&mut self, dir: impl Into<PathBuf>, entries: Vec<ListingEntry>) {
        self.dir = dir.into();
        self.highlighted = 0;
        self.selected.clear();
        self.entries.clear();
        self.set_entries(entries);
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub fn highlighted(&self) -> Option<&ListingEntry> {
        self.entries.get(self.highlighted)
    }

    pub fn move_highlight(&mut self, delta: isize) {
        if self.entries.is_empty() {
            self.highlighted = 0;
            return;
        }
        let last = self.entries.len() - 1;
        self.highlighted = self.highlighted.saturating_add_signed(delta).min(last);
    }

    pub fn highlight_name(&mut self, name: &str) -> bool {
        match self.entries.iter().position(|e| e.name == name) {
            Some(idx) => {
                self.highlighted = idx;
                true
            }
            None => false,
        }
    }

    /// Toggles the highlighted entry in the selection set and moves the highlight down.
    /// The `..` placeholder can't be selected.
    pub fn toggle_selection(&mut self) -> bool {
        let Some(entry) = self.highlighted() else {
            return false;
        };
        if entry.is_parent_placeholder() {
            return false;
        }
        let name = entry.name.clone();
        if !self.selected.remove(&name) {
            self.selected.insert(name);
        }
        self.move_highlight(1);
        true
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Selected entries in listing order.
    pub fn selected_entries(&self) -> Vec<&ListingEntry> {
        self.entries
            .iter()
            .filter(|e| self.selected.contains(&e.name))
            .collect()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Entries without the `..` placeholder.
    pub fn real_entries(&self) -> impl Iterator<Item = &ListingEntry> {
        self.entries.iter().filter(|e| !e.is_parent_placeholder())
    }

    fn clamp_highlight(&mut self) {
        if self.highlighted >= self.entries.len() {
            self.highlighted = self.entries.len().saturating_sub(1);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/listing.rs"]
mod tests;
