//! Option list with case-insensitive uniqueness
//!
//! Serialized as a plain JSON array of strings so the stored value stays
//! readable and compatible with earlier saves.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an option-list change was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionRejected {
    #[error("option is empty")]
    Empty,
    #[error("option already exists: {0}")]
    Duplicate(String),
    #[error("options cannot change while the wheel is spinning")]
    Spinning,
    #[error("no option at position {index} (have {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Result of adding a newline-separated batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Labels that made it into the list, in order
    pub added: Vec<String>,
    /// Lines skipped as duplicates (of the list or of earlier lines)
    pub duplicates: usize,
}

/// Ordered list of wheel options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionList {
    items: Vec<String>,
}

impl OptionList {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build from arbitrary labels, keeping the first of any duplicates and
    /// dropping blanks.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for label in labels {
            if let Err(e) = list.add(label.as_ref()) {
                log::debug!("Skipped label {:?}: {}", label.as_ref(), e);
            }
        }
        list
    }

    /// Seed list used on first launch
    pub fn defaults() -> Self {
        Self::from_labels(crate::consts::DEFAULT_OPTIONS)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    /// Case-insensitive membership test
    pub fn contains(&self, label: &str) -> bool {
        let needle = label.trim().to_lowercase();
        self.items.iter().any(|s| s.to_lowercase() == needle)
    }

    /// Append a single option. The label is trimmed first.
    pub fn add(&mut self, label: &str) -> Result<&str, OptionRejected> {
        let label = label.trim();
        if label.is_empty() {
            return Err(OptionRejected::Empty);
        }
        if self.contains(label) {
            return Err(OptionRejected::Duplicate(label.to_string()));
        }
        self.items.push(label.to_string());
        Ok(self.items.last().map(String::as_str).unwrap_or_default())
    }

    /// Append every non-blank line of `text`, skipping duplicates.
    pub fn add_batch(&mut self, text: &str) -> BatchReport {
        let mut report = BatchReport::default();
        for line in text.lines() {
            match self.add(line) {
                Ok(label) => report.added.push(label.to_string()),
                Err(OptionRejected::Duplicate(_)) => report.duplicates += 1,
                Err(_) => {}
            }
        }
        report
    }

    /// Remove the option at `index`, returning its label
    pub fn remove(&mut self, index: usize) -> Result<String, OptionRejected> {
        if index >= self.items.len() {
            return Err(OptionRejected::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }
}
