/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Aldebaran (`.aut`) transition-system reader (§10.2), used only by
//! `autscc`. Labels carry no priority/player information, so every
//! vertex gets the uniform placeholder label `(prio=0, player=even)` —
//! just enough for the shared `Graph`/SCC machinery to apply unchanged.

use std::io::BufRead;

use anyhow::{bail, Context, Result};
use log::{info, warn};

use crate::graph::{Graph, Label, Player};

pub fn read(reader: impl BufRead) -> Result<Graph> {
    let mut lines = reader.lines();
    let header = lines
        .next()
        .context("empty .aut input")?
        .context("reading .aut header line")?;
    let inner = header
        .trim()
        .strip_prefix("des")
        .context("expected 'des (<initial>, <ntrans>, <nstates>)' header")?
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')');
    let parts: Vec<&str> = inner.split(',').map(|s| s.trim()).collect();
    if parts.len() != 3 {
        bail!("malformed .aut header: '{}'", header);
    }
    let ntrans: usize = parts[1].parse().context("invalid transition count in .aut header")?;
    let nstates: usize = parts[2].parse().context("invalid state count in .aut header")?;

    let placeholder = Label::new(0, Player::Even);
    let mut graph = Graph::new();
    graph.resize(nstates);
    for i in 0..nstates {
        graph.set_label(i, placeholder);
    }

    let mut count = 0usize;
    for (lineno, line) in lines.enumerate() {
        let line = line.with_context(|| format!("reading .aut transition line {}", lineno + 2))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let body = line.trim_start_matches('(').trim_end_matches(')').trim_end_matches(';');
        let first_quote = body
            .find('"')
            .with_context(|| format!("line {}: missing quoted label in '{}'", lineno + 2, line))?;
        let last_quote = body
            .rfind('"')
            .with_context(|| format!("line {}: missing quoted label in '{}'", lineno + 2, line))?;
        let from_str = body[..first_quote].trim().trim_end_matches(',').trim();
        let to_str = body[last_quote + 1..].trim().trim_start_matches(',').trim();
        let from: usize = from_str
            .parse()
            .with_context(|| format!("line {}: invalid source state '{}'", lineno + 2, from_str))?;
        let to: usize = to_str
            .parse()
            .with_context(|| format!("line {}: invalid target state '{}'", lineno + 2, to_str))?;
        graph.add_arc(from, to);
        count += 1;
    }

    if count != ntrans {
        warn!(".aut header declared {} transitions, but {} were read", ntrans, count);
    }
    info!("aut: read {} states, {} transitions", graph.size(), count);
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_small_transition_system() -> Result<()> {
        let text = "des (0, 3, 3)\n(0,\"a\",1)\n(1,\"b\",2)\n(2,\"a\",0)\n";
        let g = read(text.as_bytes())?;
        assert_eq!(g.size(), 3);
        assert!(g.vertex(0).out.contains(&1));
        assert!(g.vertex(1).out.contains(&2));
        assert!(g.vertex(2).out.contains(&0));
        Ok(())
    }

    #[test]
    fn tolerates_transition_count_mismatch() -> Result<()> {
        let text = "des (0, 5, 2)\n(0,\"a\",1)\n";
        let g = read(text.as_bytes())?;
        assert_eq!(g.size(), 2);
        Ok(())
    }
}
