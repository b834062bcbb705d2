//! Label vocabularies.
//!
//! Two tab-separated formats are supported:
//!
//! - label vocab (`intent.label.vocab`, `slot_tag.label.vocab`): `symbol<TAB>id`,
//!   the first entry is a reserved symbol and is dropped;
//! - slot value vocab (`slot_value.label.vocab`): `slot_tag<TAB>{'v1', 'v2', ...}`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::error::{Result, ScgError};

/// Characters removed from a slot value literal list before splitting.
const LITERAL_LIST_NOISE: &[char] = &['{', '}', '\'', '"'];

/// Split a right-trimmed line into exactly two tab-separated columns.
fn split_pair<'a>(line: &'a str, source: &Path, line_no: usize) -> Result<(&'a str, &'a str)> {
    let mut columns = line.split('\t');
    match (columns.next(), columns.next(), columns.next()) {
        (Some(first), Some(second), None) => Ok((first, second)),
        (_, None, _) => Err(ScgError::parse(source, line_no, "missing tab separator")),
        _ => Err(ScgError::parse(source, line_no, "expected exactly two columns")),
    }
}

/// Open a vocabulary file, mapping a missing file to [`ScgError::FileNotFound`].
fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| ScgError::open(path, e))?;
    Ok(BufReader::new(file))
}

/// An ordered list of labels (intents or slot tags).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelVocab {
    labels: Vec<String>,
}

impl LabelVocab {
    /// Load a label vocab from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let vocab = Self::from_reader(open(path)?, path)?;
        debug!("Loaded {} labels from {}", vocab.len(), path.display());
        Ok(vocab)
    }

    /// Parse a label vocab. `source` only names the input in errors.
    ///
    /// The first parsed entry is dropped unconditionally.
    pub fn from_reader<R: BufRead>(reader: R, source: &Path) -> Result<Self> {
        let mut labels = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let (symbol, _id) = split_pair(line, source, idx + 1)?;
            labels.push(symbol.to_string());
        }
        if !labels.is_empty() {
            labels.remove(0);
        }
        Ok(Self { labels })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

/// Allowed values of one slot tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotValues {
    pub tag: String,
    pub values: Vec<String>,
}

/// Slot tag to sorted value list, in first-seen tag order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotValueVocab {
    entries: Vec<SlotValues>,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl SlotValueVocab {
    /// Load a slot value vocab from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let vocab = Self::from_reader(open(path)?, path)?;
        debug!("Loaded {} slot tags from {}", vocab.len(), path.display());
        Ok(vocab)
    }

    /// Parse a slot value vocab. A repeated tag replaces the earlier entry.
    pub fn from_reader<R: BufRead>(reader: R, source: &Path) -> Result<Self> {
        let mut vocab = Self::default();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let (tag, literal) = split_pair(line, source, idx + 1)?;
            vocab.insert(tag.to_string(), parse_literal_list(literal));
        }
        Ok(vocab)
    }

    fn insert(&mut self, tag: String, values: Vec<String>) {
        match self.positions.get(&tag) {
            Some(&pos) => self.entries[pos].values = values,
            None => {
                self.positions.insert(tag.clone(), self.entries.len());
                self.entries.push(SlotValues { tag, values });
            }
        }
    }

    /// Sorted values for `tag`.
    pub fn get(&self, tag: &str) -> Option<&[String]> {
        self.positions
            .get(tag)
            .map(|&pos| self.entries[pos].values.as_slice())
    }

    pub fn entries(&self) -> &[SlotValues] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Turn `{'a', 'b'}` into a sorted `["a", "b"]`.
///
/// Empty items are dropped, so `{}` yields an empty list rather than `[""]`.
fn parse_literal_list(literal: &str) -> Vec<String> {
    let stripped: String = literal
        .chars()
        .filter(|c| !LITERAL_LIST_NOISE.contains(c))
        .collect();
    let mut values: Vec<String> = stripped
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    values.sort();
    values
}
