/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! `autscc`: reads an Aldebaran `.aut` file and prints one line per
//! equal-label SCC (§6.5, §11). A thin diagnostic wrapper around the
//! SCC collapser; it does not emit a quotient graph.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// List the strongly-connected components of an Aldebaran transition system.
#[derive(Parser)]
#[command(name = "autscc")]
struct Args {
    /// Input .aut file (defaults to stdin).
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

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
    let graph = pgquotient::parse::aut::read(BufReader::new(input)).context("reading .aut input")?;
    let scc_id = pgquotient::scc::compute_scc_ids(&graph);

    let k = scc_id.iter().copied().max().map_or(0, |m| m + 1);
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); k];
    for (v, &id) in scc_id.iter().enumerate() {
        members[id].push(v);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for group in &members {
        let line: Vec<String> = group.iter().map(|v| v.to_string()).collect();
        writeln!(out, "{}", line.join(" ")).context("writing SCC listing")?;
    }
    Ok(())
}
