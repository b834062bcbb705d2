//! Command implementations for the scgview CLI.

use std::io::{self, Write};

use log::debug;

use crate::catalog::Catalog;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::grammar::TEMPLATES;
use crate::model::Model;
use crate::vocab::LabelVocab;

/// Execute a CLI command, writing its result to stdout.
pub fn execute_command(args: ScgArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_command_to(&args, &mut out)
}

/// Execute a CLI command against `out`.
pub fn execute_command_to<W: Write>(args: &ScgArgs, out: &mut W) -> Result<()> {
    if let Command::Templates = args.command {
        return show_templates(out, args);
    }

    let catalog = Catalog::load(args.config())?;
    match &args.command {
        Command::Intents => list_labels(out, "intent", catalog.intents(), args),
        Command::SlotTags => list_labels(out, "slot tag", catalog.slot_tags(), args),
        Command::Slots => show_slots(out, &catalog, args),
        Command::Templates => show_templates(out, args),
        Command::Compose(compose_args) => compose(out, &catalog, compose_args, args),
        Command::Generate(generate_args) => generate(out, &catalog, generate_args, args),
    }
}

fn list_labels<W: Write>(out: &mut W, kind: &str, vocab: &LabelVocab, args: &ScgArgs) -> Result<()> {
    output_result(out, &LabelList::from_vocab(kind, vocab), args)
}

fn show_slots<W: Write>(out: &mut W, catalog: &Catalog, args: &ScgArgs) -> Result<()> {
    let table = SlotTable {
        slots: catalog.slot_values(),
    };
    output_result(out, &table, args)
}

fn show_templates<W: Write>(out: &mut W, args: &ScgArgs) -> Result<()> {
    let list = TemplateList {
        templates: TEMPLATES.iter().map(|t| t.to_string()).collect(),
    };
    output_result(out, &list, args)
}

fn compose<W: Write>(
    out: &mut W,
    catalog: &Catalog,
    compose_args: &ComposeArgs,
    args: &ScgArgs,
) -> Result<()> {
    let grammar = catalog.compose(&compose_args.intent, &compose_args.slots)?;
    output_result(out, &Composition::from(&grammar), args)
}

/// The "Generate" action: compose, then look up.
fn generate<W: Write>(
    out: &mut W,
    catalog: &Catalog,
    generate_args: &GenerateArgs,
    args: &ScgArgs,
) -> Result<()> {
    let grammar = catalog.compose(&generate_args.grammar.intent, &generate_args.grammar.slots)?;
    let model: Model = generate_args.model;
    debug!(
        "Generate: model={model} count={} grammar={grammar}",
        generate_args.count
    );

    let result = catalog.generate(model, &grammar, generate_args.count)?;
    output_result(out, &result, args)
}
