/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! GraphViz `.dot` writer (§6.4, §10.4).

use std::io::Write;

use anyhow::{Context, Result};

use crate::graph::{Graph, Player};

pub fn write(graph: &Graph, mut out: impl Write) -> Result<()> {
    writeln!(out, "digraph g {{").context("writing dot preamble")?;
    for i in 0..graph.size() {
        let label = graph.vertex(i).label();
        let shape = match label.player {
            Player::Even => "diamond",
            Player::Odd => "box",
        };
        writeln!(out, "  N{} [shape={}, label=\"{}\"];", i, shape, label.prio)
            .with_context(|| format!("writing node {}", i))?;
    }
    for i in 0..graph.size() {
        for &j in &graph.vertex(i).out {
            writeln!(out, "  N{} -> N{};", i, j).with_context(|| format!("writing edge {} -> {}", i, j))?;
        }
    }
    writeln!(out, "}}").context("writing dot postamble")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Label;

    #[test]
    fn wraps_nodes_and_edges_in_a_digraph() -> Result<()> {
        let mut g = Graph::new();
        g.set_label(0, Label::new(1, Player::Even));
        g.set_label(1, Label::new(2, Player::Odd));
        g.add_arc(0, 1);

        let mut buf = Vec::new();
        write(&g, &mut buf)?;
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("digraph g {\n"));
        assert!(text.contains("N0 [shape=diamond, label=\"1\"];"));
        assert!(text.contains("N1 [shape=box, label=\"2\"];"));
        assert!(text.contains("N0 -> N1;"));
        assert!(text.trim_end().ends_with('}'));
        Ok(())
    }
}
