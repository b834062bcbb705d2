//! # scgview
//!
//! Browse sentences that were generated offline from semantic control grammars.
//!
//! A grammar such as `weather.general(day.p=*,location=*)` is composed from an
//! intent and slot constraints, then matched exactly against the `query` column
//! of a per-model reranking table. Nothing is generated or ranked here.
//!
//! ```no_run
//! use scgview::catalog::Catalog;
//! use scgview::config::DemoConfig;
//! use scgview::model::Model;
//!
//! let catalog = Catalog::load(DemoConfig::with_data_dir("data")).unwrap();
//! let grammar = catalog.compose("weather.general", "day.p=*,location=*").unwrap();
//! let result = catalog.generate(Model::T5, &grammar, 10).unwrap();
//! for row in &result.rows {
//!     println!("{} | {}", row.generated, row.train_texts);
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod grammar;
pub mod model;
pub mod table;
pub mod vocab;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
