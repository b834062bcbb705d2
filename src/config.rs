//! Data layout configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::Model;

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Upper bound of the result count selector.
pub const DEFAULT_MAX_COUNT: usize = 100;

/// Where vocabularies and per-model tables live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfig {
    pub data_dir: PathBuf,
    pub intent_vocab_file: String,
    pub slot_tag_vocab_file: String,
    pub slot_value_vocab_file: String,
    /// Table file name inside each model directory.
    pub table_file: String,
    pub max_count: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            intent_vocab_file: "intent.label.vocab".to_string(),
            slot_tag_vocab_file: "slot_tag.label.vocab".to_string(),
            slot_value_vocab_file: "slot_value.label.vocab".to_string(),
            table_file: "reranking_100.csv".to_string(),
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

impl DemoConfig {
    /// Default layout rooted at `data_dir`.
    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        DemoConfig {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn intent_vocab_path(&self) -> PathBuf {
        self.data_dir.join(&self.intent_vocab_file)
    }

    pub fn slot_tag_vocab_path(&self) -> PathBuf {
        self.data_dir.join(&self.slot_tag_vocab_file)
    }

    pub fn slot_value_vocab_path(&self) -> PathBuf {
        self.data_dir.join(&self.slot_value_vocab_file)
    }

    pub fn table_path(&self, model: Model) -> PathBuf {
        model.table_path(&self.data_dir, &self.table_file)
    }
}
