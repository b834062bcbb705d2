//! scgview CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use scgview::cli::args::*;
use scgview::cli::commands::*;
use scgview::error::ScgError;

fn main() {
    let args = ScgArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    match execute_command(args) {
        Ok(()) => {}
        // Rejected input is reported inline; the session itself did not fail.
        Err(ScgError::Validation(msg)) => eprintln!("{msg}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
