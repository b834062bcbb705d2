//! Generation models with a pre-computed reranking table.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ScgError;

/// Models whose generations were persisted.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Model {
    /// T5 encoder-decoder
    T5,
    /// BART encoder-decoder
    Bart,
    /// GPT-2 decoder
    Gpt2,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::T5, Model::Bart, Model::Gpt2];

    /// Directory name under the data directory.
    pub fn name(&self) -> &'static str {
        match self {
            Model::T5 => "t5",
            Model::Bart => "bart",
            Model::Gpt2 => "gpt2",
        }
    }

    /// `<data_dir>/<model>/<table_file>`.
    pub fn table_path(&self, data_dir: &Path, table_file: &str) -> PathBuf {
        data_dir.join(self.name()).join(table_file)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Model {
    type Err = ScgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| ScgError::validation(format!("unknown model '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_path() {
        let path = Model::Gpt2.table_path(Path::new("data"), "reranking_100.csv");
        assert_eq!(path, PathBuf::from("data/gpt2/reranking_100.csv"));
    }

    #[test]
    fn test_parse_model() {
        assert_eq!("bart".parse::<Model>().unwrap(), Model::Bart);
        assert!("BART".parse::<Model>().is_err());
        for model in Model::ALL {
            assert_eq!(model.to_string().parse::<Model>().unwrap(), model);
        }
    }
}
