//! Previously computed answers, injected from a JSON file.
//!
//! Expensive machines can be skipped on later runs by supplying a file
//! mapping 1-based machine indices to known minimum press counts, e.g.
//! `{"1": 49, "2": 60}`. The cache is consulted before the search runs; it
//! never alters a computed result.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Known answers keyed by 1-based machine index.
#[derive(Debug, Clone, Default)]
pub struct AnswerCache {
    entries: HashMap<usize, u64>,
}

impl AnswerCache {
    /// Read a cache from a JSON object file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(&path).with_context(|| {
            format!("Failed to read answer cache({}).", path.as_ref().display())
        })?;
        let entries = serde_json::from_str(&text).with_context(|| {
            format!("Failed to parse answer cache({}).", path.as_ref().display())
        })?;

        Ok(Self { entries })
    }

    pub fn from_entries(entries: HashMap<usize, u64>) -> Self {
        Self { entries }
    }

    pub fn get(&self, machine_index: usize) -> Option<u64> {
        self.entries.get(&machine_index).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
