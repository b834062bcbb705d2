use std::fs;
use std::path::Path;

use clap::Parser;
use scgview::catalog::Catalog;
use scgview::cli::args::ScgArgs;
use scgview::cli::commands::execute_command_to;
use scgview::config::DemoConfig;
use scgview::error::ScgError;
use scgview::grammar::SemanticControlGrammar;
use scgview::model::Model;
use scgview::table::{LookupRequest, TableLookup};
use tempfile::{TempDir, tempdir};

const INTENTS: &str = "<unk>\t0\nweather.general\t1\nweather.uv\t2\nweather.temperature\t3\n";
const SLOT_TAGS: &str = "<unk>\t0\nday.p\t1\nlocation\t2\ntime\t3\n";
const SLOT_VALUES: &str = "day.p\t{'오늘', '내일', ' 모레 '}\nlocation\t{'서울', '논산', '울산'}\n";
const TABLE: &str = "query\tgenerated_texts\ttrain_texts\n\
weather.general(day.p=*,location=*)\t날씨 알려줘\t오늘 날씨 알려줘\n\
weather.uv(day.p=*,location=*)\t자외선 어때\t자외선 지수 알려줘\n\
weather.general(day.p=*,location=*)\t날씨 어때\t서울 날씨 어때\n\
weather.general(day.p=*,location=*)\t밖에 날씨 좋아\t날씨 좋아?\n";

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn data_dir() -> TempDir {
    let dir = tempdir().unwrap();
    let config = DemoConfig::with_data_dir(dir.path());
    write(&config.intent_vocab_path(), INTENTS);
    write(&config.slot_tag_vocab_path(), SLOT_TAGS);
    write(&config.slot_value_vocab_path(), SLOT_VALUES);
    write(&config.table_path(Model::T5), TABLE);
    dir
}

fn run(dir: &Path, argv: &[&str]) -> Result<String, ScgError> {
    let data_dir = dir.to_str().unwrap();
    let mut full = vec!["scgview", "--data-dir", data_dir];
    full.extend_from_slice(argv);
    let args = ScgArgs::try_parse_from(full).unwrap();
    let mut out = Vec::new();
    execute_command_to(&args, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_catalog_loads_vocabularies() {
    let dir = data_dir();
    let catalog = Catalog::load(DemoConfig::with_data_dir(dir.path())).unwrap();

    assert_eq!(
        catalog.intents().labels(),
        &["weather.general", "weather.uv", "weather.temperature"]
    );
    assert_eq!(catalog.slot_tags().labels(), &["day.p", "location", "time"]);
    assert_eq!(
        catalog.slot_values().get("day.p").unwrap(),
        &["내일", "모레", "오늘"]
    );
}

#[test]
fn test_generate_returns_matches_in_table_order() {
    let dir = data_dir();
    let catalog = Catalog::load(DemoConfig::with_data_dir(dir.path())).unwrap();
    let grammar = catalog
        .compose("weather.general", "day.p=*,location=*")
        .unwrap();

    let result = catalog.generate(Model::T5, &grammar, 10).unwrap();
    assert_eq!(result.total_matches, 3);
    let generated: Vec<&str> = result.rows.iter().map(|r| r.generated.as_str()).collect();
    assert_eq!(generated, vec!["날씨 알려줘", "날씨 어때", "밖에 날씨 좋아"]);
    let indices: Vec<usize> = result.rows.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![0, 2, 3]);

    let result = catalog.generate(Model::T5, &grammar, 2).unwrap();
    assert_eq!(result.rows.len(), 2);
    assert_eq!(result.total_matches, 3);
}

#[test]
fn test_lookup_is_idempotent() {
    let dir = data_dir();
    let lookup = TableLookup::new(DemoConfig::with_data_dir(dir.path()));
    let request = LookupRequest::new(Model::T5, "weather.uv(day.p=*,location=*)", 5);

    let first = lookup.lookup(&request).unwrap();
    let second = lookup.lookup(&request).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.rows.len(), 1);
}

#[test]
fn test_escaped_key_finds_nothing() {
    let dir = data_dir();
    let lookup = TableLookup::new(DemoConfig::with_data_dir(dir.path()));
    let grammar = SemanticControlGrammar::with_default_slots("weather.general");

    let escaped = LookupRequest::new(Model::T5, grammar.display_key(), 10);
    assert!(lookup.lookup(&escaped).unwrap().rows.is_empty());

    let spaced = LookupRequest::new(Model::T5, format!("{} ", grammar.lookup_key()), 10);
    assert!(lookup.lookup(&spaced).unwrap().rows.is_empty());
}

#[test]
fn test_table_is_reread_per_request() {
    let dir = data_dir();
    let config = DemoConfig::with_data_dir(dir.path());
    let lookup = TableLookup::new(config.clone());
    let request = LookupRequest::new(Model::T5, "weather.uv(day.p=*,location=*)", 5);
    assert_eq!(lookup.lookup(&request).unwrap().rows.len(), 1);

    write(&config.table_path(Model::T5), "query\tgenerated_texts\ttrain_texts\n");
    assert!(lookup.lookup(&request).unwrap().rows.is_empty());
}

#[test]
fn test_missing_model_table() {
    let dir = data_dir();
    let catalog = Catalog::load(DemoConfig::with_data_dir(dir.path())).unwrap();
    let grammar = catalog.compose("weather.uv", "day.p=*").unwrap();
    let err = catalog.generate(Model::Bart, &grammar, 5).unwrap_err();
    assert!(matches!(err, ScgError::FileNotFound(_)));
}

#[test]
fn test_malformed_vocab_fails_startup() {
    let dir = data_dir();
    let config = DemoConfig::with_data_dir(dir.path());
    write(&config.intent_vocab_path(), "<unk>\t0\nweather.uv\n");
    assert!(matches!(
        Catalog::load(config),
        Err(ScgError::Parse { line: 2, .. })
    ));
}

#[test]
fn test_cli_generate_human() {
    let dir = data_dir();
    let out = run(
        dir.path(),
        &["generate", "-n", "1", "-i", "weather.general"],
    )
    .unwrap();
    assert!(out.starts_with("t5 : weather.general(day.p=\\*,location=\\*)"));
    assert!(out.contains("날씨 알려줘"));
    assert!(!out.contains("날씨 어때"));
    assert!(out.contains("Showing 1 of 3 matching rows"));
}

#[test]
fn test_cli_generate_zero_count() {
    let dir = data_dir();
    let err = run(dir.path(), &["generate", "-i", "weather.general"]).unwrap_err();
    assert!(err.is_recoverable());
}

#[test]
fn test_cli_compose_json() {
    let dir = data_dir();
    let out = run(dir.path(), &["-f", "json", "compose", "-i", "weather.uv"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["lookup_key"], "weather.uv(day.p=*,location=*)");
    assert_eq!(value["display_key"], "weather.uv(day.p=\\*,location=\\*)");
}

#[test]
fn test_cli_slots_csv() {
    let dir = data_dir();
    let out = run(dir.path(), &["-f", "csv", "slots"]).unwrap();
    assert_eq!(
        out,
        "Slot tag,Slot value\nday.p,\"내일, 모레, 오늘\"\nlocation,\"논산, 서울, 울산\"\n"
    );
}

#[test]
fn test_cli_templates_need_no_data() {
    let out = run(Path::new("/nonexistent"), &["-q", "templates"]).unwrap();
    assert!(out.contains("weather.windchill(location=\\*)"));
}
