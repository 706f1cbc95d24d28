/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! `pgconvert`: reads a parity game, computes a behavioural-equivalence
//! quotient, writes it back out (§6.5, §11).

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

/// Compute a behavioural-equivalence quotient of a parity game.
#[derive(Parser)]
#[command(name = "pgconvert")]
struct Args {
    /// scc | bisim | fmib | stut | gstut | gstut2 | wgstut
    #[arg(short = 'e', long = "equivalence")]
    equivalence: String,

    /// Input PGSolver file (defaults to stdin).
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Output file (defaults to stdout).
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(short = 'f', long = "format", default_value = "pgsolver")]
    format: String,

    /// Raise log verbosity; repeatable.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(pgquotient::verbosity_to_filter(args.verbose))
        .format_timestamp(None)
        .init();

    let input: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(File::open(path).with_context(|| format!("opening {}", path.display()))?),
        None => Box::new(io::stdin()),
    };
    let graph = pgquotient::parse::pgsolver::read(BufReader::new(input))
        .context("reading parity game")?;

    let quotient = pgquotient::quotient_by_name(graph, &args.equivalence)?;

    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path).with_context(|| format!("creating {}", path.display()))?),
        None => Box::new(io::stdout()),
    };
    let mut writer = BufWriter::new(output);
    match args.format.as_str() {
        "pgsolver" => pgquotient::dump::pgsolver::write(&quotient, &mut writer)?,
        "dot" => pgquotient::dump::dot::write(&quotient, &mut writer)?,
        other => bail!("unknown output format '{}' (expected pgsolver or dot)", other),
    }
    writer.flush().context("flushing output")?;
    Ok(())
}
