//! Output formatting for CLI commands.

use std::io::Write;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::cli::args::{OutputFormat, ScgArgs};
use crate::error::Result;
use crate::grammar::{SemanticControlGrammar, escape_wildcards};
use crate::table::{GENERATED_TEXT_LABEL, LookupResult};
use crate::vocab::{LabelVocab, SlotValueVocab};

/// A result that can be laid out as rows of text cells.
pub trait Tabular {
    /// Heading printed above the table in human output.
    fn title(&self) -> String;
    fn headers(&self) -> Vec<String>;
    fn rows(&self) -> Vec<Vec<String>>;

    /// Line printed below the table in human output.
    fn footer(&self) -> Option<String> {
        None
    }
}

/// A list of labels from one vocabulary.
#[derive(Debug, Serialize)]
pub struct LabelList {
    pub kind: String,
    pub labels: Vec<String>,
}

impl LabelList {
    pub fn from_vocab(kind: &str, vocab: &LabelVocab) -> Self {
        LabelList {
            kind: kind.to_string(),
            labels: vocab.labels().to_vec(),
        }
    }
}

impl Tabular for LabelList {
    fn title(&self) -> String {
        format!("{} ({})", self.kind, self.labels.len())
    }

    fn headers(&self) -> Vec<String> {
        vec![self.kind.clone()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.labels.iter().map(|l| vec![l.clone()]).collect()
    }
}

/// Slot tags with comma-joined values.
#[derive(Debug, Serialize)]
pub struct SlotTable<'a> {
    pub slots: &'a SlotValueVocab,
}

impl Tabular for SlotTable<'_> {
    fn title(&self) -> String {
        "Slot tags and values".to_string()
    }

    fn headers(&self) -> Vec<String> {
        vec!["Slot tag".to_string(), "Slot value".to_string()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.slots
            .entries()
            .iter()
            .map(|entry| vec![entry.tag.clone(), entry.values.join(", ")])
            .collect()
    }
}

/// Sample grammars.
#[derive(Debug, Serialize)]
pub struct TemplateList {
    pub templates: Vec<String>,
}

impl Tabular for TemplateList {
    fn title(&self) -> String {
        "Template".to_string()
    }

    fn headers(&self) -> Vec<String> {
        vec!["#".to_string(), "grammar".to_string()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.templates
            .iter()
            .enumerate()
            .map(|(i, t)| vec![(i + 1).to_string(), escape_wildcards(t)])
            .collect()
    }
}

/// A composed grammar in both of its forms.
#[derive(Debug, Serialize)]
pub struct Composition {
    pub intent: String,
    pub slots: String,
    pub lookup_key: String,
    pub display_key: String,
}

impl From<&SemanticControlGrammar> for Composition {
    fn from(grammar: &SemanticControlGrammar) -> Self {
        Composition {
            intent: grammar.intent().to_string(),
            slots: grammar.slots().to_string(),
            lookup_key: grammar.lookup_key(),
            display_key: grammar.display_key(),
        }
    }
}

impl Tabular for Composition {
    fn title(&self) -> String {
        format!("semantic control grammar : {}", self.display_key)
    }

    fn headers(&self) -> Vec<String> {
        vec!["field".to_string(), "value".to_string()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        vec![
            vec!["intent".to_string(), self.intent.clone()],
            vec!["slots".to_string(), self.slots.clone()],
            vec!["lookup_key".to_string(), self.lookup_key.clone()],
        ]
    }
}

impl Tabular for LookupResult {
    fn title(&self) -> String {
        format!("{} : {}", self.model, escape_wildcards(&self.query))
    }

    fn headers(&self) -> Vec<String> {
        vec![
            "index".to_string(),
            GENERATED_TEXT_LABEL.to_string(),
            "train_texts".to_string(),
        ]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                vec![
                    row.index.to_string(),
                    row.generated.clone(),
                    row.train_texts.clone(),
                ]
            })
            .collect()
    }

    fn footer(&self) -> Option<String> {
        Some(format!(
            "Showing {} of {} matching rows",
            self.rows.len(),
            self.total_matches
        ))
    }
}

/// Output a result in the format selected on the command line.
pub fn output_result<T, W>(out: &mut W, result: &T, args: &ScgArgs) -> Result<()>
where
    T: Serialize + Tabular,
    W: Write,
{
    match args.output_format {
        OutputFormat::Human => output_human(out, result, args.verbosity()),
        OutputFormat::Json => output_json(out, result, args.pretty),
        OutputFormat::Csv => output_csv(out, result),
    }
}

/// Output an aligned table with title and footer.
fn output_human<T: Tabular, W: Write>(out: &mut W, result: &T, verbosity: u8) -> Result<()> {
    if verbosity > 0 {
        writeln!(out, "{}", result.title())?;
        writeln!(out)?;
    }

    let headers = result.headers();
    let rows = result.rows();
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(cell));
        }
    }

    write_row(out, &headers, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    write_row(out, &rule, &widths)?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }

    if verbosity > 0
        && let Some(footer) = result.footer()
    {
        writeln!(out)?;
        writeln!(out, "{footer}")?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(display_width(cell));
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    writeln!(out, "{}", padded.join("  ").trim_end())?;
    Ok(())
}

/// Terminal columns taken by `text`.
fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Output in JSON format.
fn output_json<T: Serialize, W: Write>(out: &mut W, result: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, result)?;
    } else {
        serde_json::to_writer(&mut *out, result)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Output headers and rows as CSV.
fn output_csv<T: Tabular, W: Write>(out: &mut W, result: &T) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(result.headers())?;
    for row in result.rows() {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
