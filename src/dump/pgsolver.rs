/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! PGSolver writer (§10.3).

use std::io::Write;

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::graph::{Graph, Player};

pub fn write(graph: &Graph, mut out: impl Write) -> Result<()> {
    let n = graph.size();
    writeln!(out, "parity {};", n.saturating_sub(1)).context("writing pgsolver header")?;
    for i in 0..n {
        let label = graph.vertex(i).label();
        let player = match label.player {
            Player::Even => 0,
            Player::Odd => 1,
        };
        if graph.vertex(i).out.is_empty() {
            writeln!(out, "{} {} {} \"no outgoing edges!\";", i, label.prio, player)
                .with_context(|| format!("writing record for vertex {}", i))?;
        } else {
            let succs = graph.vertex(i).out.iter().map(|d| d.to_string()).join(",");
            writeln!(out, "{} {} {} {};", i, label.prio, player, succs)
                .with_context(|| format!("writing record for vertex {}", i))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Label;

    #[test]
    fn writes_successors_and_terminal_marker() -> Result<()> {
        let mut g = Graph::new();
        g.set_label(0, Label::new(1, Player::Even));
        g.set_label(1, Label::new(2, Player::Odd));
        g.add_arc(0, 1);

        let mut buf = Vec::new();
        write(&g, &mut buf)?;
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("parity 1;\n"));
        assert!(text.contains("0 1 0 1;"));
        assert!(text.contains("1 2 1 \"no outgoing edges!\";"));
        Ok(())
    }
}
