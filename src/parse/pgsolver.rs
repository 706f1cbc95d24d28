/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! PGSolver parity-game reader (§10.1).

use std::io::BufRead;

use anyhow::{bail, Context, Result};
use log::info;

use crate::graph::{Graph, Label, Player};

/// Parses a PGSolver-format parity game from any `BufRead`. Vertex
/// indices may arrive out of order and exceed the declared `parity <N>`
/// count; the graph grows to fit. The final statement's trailing `;`
/// may be omitted.
pub fn read(reader: impl BufRead) -> Result<Graph> {
    let lines: Vec<String> = reader.lines().collect::<std::io::Result<_>>().context("reading pgsolver input")?;
    let last_non_blank = lines.iter().enumerate().filter(|(_, l)| !l.trim().is_empty()).map(|(i, _)| i).last();

    let mut graph = Graph::new();
    let mut saw_header = false;
    let mut records = 0usize;

    for (lineno, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if !saw_header {
            let body = line
                .strip_prefix("parity")
                .with_context(|| format!("line {}: expected 'parity <N>;' header", lineno + 1))?;
            let body = body.trim().trim_end_matches(';').trim();
            let n: usize = body
                .parse()
                .with_context(|| format!("line {}: invalid parity header count '{}'", lineno + 1, body))?;
            graph.resize(n + 1);
            saw_header = true;
            continue;
        }

        let has_semi = line.ends_with(';');
        if !has_semi && Some(lineno) != last_non_blank {
            bail!("line {}: missing ';' terminator", lineno + 1);
        }
        let body = line.trim_end_matches(';').trim();
        if body.is_empty() {
            continue;
        }

        let parts: Vec<&str> = body.split_whitespace().collect();
        if parts.len() < 3 {
            bail!("line {}: expected '<index> <priority> <player> ...'", lineno + 1);
        }
        let index: usize = parts[0]
            .parse()
            .with_context(|| format!("line {}: invalid vertex index '{}'", lineno + 1, parts[0]))?;
        let prio: u32 = parts[1]
            .parse()
            .with_context(|| format!("line {}: invalid priority '{}'", lineno + 1, parts[1]))?;
        let player = match parts[2] {
            "0" => Player::Even,
            "1" => Player::Odd,
            other => bail!("line {}: invalid player '{}' (expected 0 or 1)", lineno + 1, other),
        };
        graph.set_label(index, Label::new(prio, player));

        if parts.len() > 3 && !parts[3].starts_with('"') {
            for succ in parts[3].split(',') {
                let dst: usize = succ
                    .parse()
                    .with_context(|| format!("line {}: invalid successor index '{}'", lineno + 1, succ))?;
                graph.add_arc(index, dst);
            }
        }
        records += 1;
    }

    if !saw_header {
        bail!("empty input: expected a 'parity <N>;' header");
    }
    info!("pgsolver: read {} records into a {}-vertex graph", records, graph.size());
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_small_game() -> Result<()> {
        let text = "parity 2;\n0 1 0 1,2;\n1 2 1 0;\n2 0 0 0 \"sink\";\n";
        let g = read(text.as_bytes())?;
        assert_eq!(g.size(), 3);
        assert_eq!(g.vertex(0).label().prio, 1);
        assert_eq!(g.vertex(0).label().player, Player::Even);
        assert!(g.vertex(0).out.contains(&1));
        assert!(g.vertex(0).out.contains(&2));
        assert_eq!(g.vertex(1).label().player, Player::Odd);
        Ok(())
    }

    #[test]
    fn tolerates_missing_final_semicolon() -> Result<()> {
        let text = "parity 1;\n0 0 0 1;\n1 1 1 0";
        let g = read(text.as_bytes())?;
        assert_eq!(g.size(), 2);
        Ok(())
    }

    #[test]
    fn accepts_no_outgoing_edges_marker() -> Result<()> {
        let text = "parity 0;\n0 3 0 \"no outgoing edges!\";\n";
        let g = read(text.as_bytes())?;
        assert_eq!(g.size(), 1);
        assert!(g.vertex(0).out.is_empty());
        Ok(())
    }

    #[test]
    fn rejects_bad_player_token() {
        let text = "parity 0;\n0 3 2 0;\n";
        assert!(read(text.as_bytes()).is_err());
    }

    #[test]
    fn resizes_past_the_declared_count() -> Result<()> {
        let text = "parity 0;\n0 0 0 5;\n5 1 1 0;\n";
        let g = read(text.as_bytes())?;
        assert_eq!(g.size(), 6);
        Ok(())
    }
}
