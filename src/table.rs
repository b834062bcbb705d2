//! Pre-generated reranking tables and exact-match lookup.
//!
//! Tables are tab-separated with a header row and at least the columns
//! `query`, `generated_texts` and `train_texts`. They are read from disk on every
//! lookup; nothing is cached between requests.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::DemoConfig;
use crate::error::{Result, ScgError};
use crate::model::Model;

/// Display label of the `generated_texts` column.
pub const GENERATED_TEXT_LABEL: &str = "생성 문장";

/// Message shown when zero results are requested.
pub const ZERO_COUNT_MESSAGE: &str = "Please set the number of return sequences to more than one";

/// One row of a reranking table. Other columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Grammar string the row was generated from.
    pub query: String,
    pub generated_texts: String,
    /// Nearest training sentence.
    pub train_texts: String,
}

/// A fully loaded reranking table, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationTable {
    records: Vec<GenerationRecord>,
}

impl GenerationTable {
    /// Load a table from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ScgError::open(path, e))?;
        let table = Self::from_reader(file)?;
        debug!("Read {} rows from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse a tab-separated table. `"`-quoted fields are unquoted and may hold tabs.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(reader);

        let records = csv_reader
            .deserialize()
            .collect::<std::result::Result<Vec<GenerationRecord>, csv::Error>>()?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows whose `query` equals `key` byte for byte, with their table positions.
    pub fn matching<'a>(
        &'a self,
        key: &'a str,
    ) -> impl Iterator<Item = (usize, &'a GenerationRecord)> + 'a {
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, record)| record.query == key)
    }

    /// First `count` matches of `key`, in table order.
    pub fn select(&self, key: &str, count: usize) -> Vec<LookupRow> {
        self.matching(key)
            .take(count)
            .map(|(index, record)| LookupRow {
                index,
                generated: record.generated_texts.clone(),
                train_texts: record.train_texts.clone(),
            })
            .collect()
    }
}

/// A matched row, reduced to the displayed columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRow {
    /// Position of the row in the table.
    pub index: usize,
    #[serde(rename = "생성 문장")]
    pub generated: String,
    pub train_texts: String,
}

/// One "Generate" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRequest {
    pub model: Model,
    /// Exact lookup key, see [`crate::grammar::SemanticControlGrammar::lookup_key`].
    pub key: String,
    pub count: usize,
}

impl LookupRequest {
    pub fn new<K: Into<String>>(model: Model, key: K, count: usize) -> Self {
        LookupRequest {
            model,
            key: key.into(),
            count,
        }
    }
}

/// Rows returned for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    pub model: Model,
    pub query: String,
    pub requested: usize,
    /// Matches in the table before truncation.
    pub total_matches: usize,
    pub rows: Vec<LookupRow>,
}

/// Stateless lookup against the per-model tables of a data directory.
#[derive(Debug, Clone)]
pub struct TableLookup {
    config: DemoConfig,
}

impl TableLookup {
    pub fn new(config: DemoConfig) -> Self {
        TableLookup { config }
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Reject counts outside `1..=max_count` without touching the disk.
    pub fn validate(&self, request: &LookupRequest) -> Result<()> {
        if request.count == 0 {
            warn!("Rejected lookup for '{}': count is zero", request.key);
            return Err(ScgError::validation(ZERO_COUNT_MESSAGE));
        }
        if request.count > self.config.max_count {
            return Err(ScgError::validation(format!(
                "The number of return sequences must be at most {}",
                self.config.max_count
            )));
        }
        Ok(())
    }

    /// Run a request: validate, read the model's table, select and truncate.
    pub fn lookup(&self, request: &LookupRequest) -> Result<LookupResult> {
        self.validate(request)?;

        let path = self.config.table_path(request.model);
        let table = GenerationTable::load(&path)?;
        let total_matches = table.matching(&request.key).count();
        let rows = table.select(&request.key, request.count);
        debug!(
            "Lookup '{}' on {}: {} of {} matches",
            request.key,
            request.model,
            rows.len(),
            total_matches
        );

        Ok(LookupResult {
            model: request.model,
            query: request.key.clone(),
            requested: request.count,
            total_matches,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "query\tgenerated_texts\ttrain_texts\n\
                         A(x=1)\tfirst\ttrain one\n\
                         A(x=1)\tsecond\ttrain two\n\
                         B(y=2)\tthird\ttrain three\n";

    fn table() -> GenerationTable {
        GenerationTable::from_reader(TABLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_select_preserves_order() {
        let rows = table().select("A(x=1)", 10);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].generated, "first");
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[1].generated, "second");
        assert_eq!(rows[1].index, 1);
    }

    #[test]
    fn test_select_truncates() {
        let rows = table().select("A(x=1)", 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].generated, "first");
    }

    #[test]
    fn test_exact_match_only() {
        let table = table();
        assert!(table.select("A(x=1) ", 10).is_empty());
        assert!(table.select("a(x=1)", 10).is_empty());
        assert!(table.select("A(x=\\1)", 10).is_empty());
        assert_eq!(table.select("B(y=2)", 10)[0].index, 2);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let input = "id\tquery\tscore\tgenerated_texts\ttrain_texts\n\
                     0\tA(x=1)\t0.9\thello\tworld\n";
        let table = GenerationTable::from_reader(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].generated_texts, "hello");
    }

    #[test]
    fn test_missing_column_is_error() {
        let input = "query\tgenerated_texts\nA(x=1)\thello\n";
        assert!(matches!(
            GenerationTable::from_reader(input.as_bytes()),
            Err(ScgError::Csv(_))
        ));
    }

    #[test]
    fn test_ragged_row_is_error() {
        let input = "query\tgenerated_texts\ttrain_texts\nA(x=1)\thello\n";
        assert!(GenerationTable::from_reader(input.as_bytes()).is_err());
    }

    #[test]
    fn test_quoted_fields_are_unquoted() {
        let input = "query\tgenerated_texts\ttrain_texts\nA(x=1)\t\"비 와?\"\tx\n";
        let table = GenerationTable::from_reader(input.as_bytes()).unwrap();
        assert_eq!(table.records()[0].generated_texts, "비 와?");
    }

    #[test]
    fn test_quoted_field_keeps_inner_tab() {
        let input = "query\tgenerated_texts\ttrain_texts\nA(x=1)\t\"비 와?\"\t\"a\tb\"\n";
        let table = GenerationTable::from_reader(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].generated_texts, "비 와?");
        assert_eq!(table.records()[0].train_texts, "a\tb");
        assert_eq!(table.select("A(x=1)", 5)[0].train_texts, "a\tb");
    }

    #[test]
    fn test_zero_count_fails_before_reading() {
        let lookup = TableLookup::new(DemoConfig::with_data_dir("/nonexistent"));
        for model in Model::ALL {
            let err = lookup
                .lookup(&LookupRequest::new(model, "A(x=1)", 0))
                .unwrap_err();
            match err {
                ScgError::Validation(msg) => assert_eq!(msg, ZERO_COUNT_MESSAGE),
                other => panic!("Expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_count_above_bound_is_rejected() {
        let lookup = TableLookup::new(DemoConfig::with_data_dir("/nonexistent"));
        let err = lookup
            .lookup(&LookupRequest::new(Model::T5, "A(x=1)", 101))
            .unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_missing_table_is_not_found() {
        let lookup = TableLookup::new(DemoConfig::with_data_dir("/nonexistent"));
        let err = lookup
            .lookup(&LookupRequest::new(Model::Bart, "A(x=1)", 5))
            .unwrap_err();
        assert!(matches!(err, ScgError::FileNotFound(_)));
    }

    #[test]
    fn test_row_serializes_with_display_label() {
        let row = &table().select("B(y=2)", 1)[0];
        let value = serde_json::to_value(row).unwrap();
        assert_eq!(value[GENERATED_TEXT_LABEL], "third");
        assert_eq!(value["train_texts"], "train three");
    }
}
