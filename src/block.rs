/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The block model (component C3): a conjectured equivalence class plus
//! the bookkeeping every splitter needs to decide whether it still holds.

use std::collections::BTreeSet;

use crate::graph::Graph;
use crate::scratch::ScratchPool;

/// A block: a set of vertices currently conjectured to be equivalent,
/// plus the per-equivalence metadata `update` recomputes on demand.
#[derive(Debug, Clone)]
pub struct Block {
    pub index: usize,
    /// Member vertex indices, in insertion order (oldest first).
    pub vertices: Vec<usize>,
    /// Sources of edges entering this block from any other block.
    pub incoming: Vec<usize>,
    /// Members with at least one outgoing edge leaving the block (fmib/gstut).
    pub exit: Vec<usize>,
    /// Members with no outgoing edge into the block itself (stut).
    pub bottom: Vec<usize>,
    pub size: usize,
    pub mixed_players: bool,
    /// No other block is known to split this one.
    pub stable: bool,
    /// This block has been proven not to split itself.
    pub divstable: bool,
}

impl Block {
    pub fn new(index: usize) -> Self {
        Block {
            index,
            vertices: Vec::new(),
            incoming: Vec::new(),
            exit: Vec::new(),
            bottom: Vec::new(),
            size: 0,
            mixed_players: false,
            stable: false,
            divstable: false,
        }
    }

    /// Recomputes `incoming`, `exit`, `bottom`, `size`, `mixed_players` and
    /// (via `scratch`) each member's `external` counter, from the current
    /// `vertices` list, the graph, and the current block assignment.
    ///
    /// If `has_edge_from` is given, returns `true` iff some source in the
    /// freshly recomputed `incoming` list belongs to that block — this is
    /// how `refine` learns whether a split created new cross-block work.
    pub fn update(
        &mut self,
        graph: &Graph,
        scratch: &mut ScratchPool,
        block_of: &[usize],
        has_edge_from: Option<usize>,
    ) -> bool {
        self.incoming.clear();
        self.exit.clear();
        self.bottom.clear();
        self.size = self.vertices.len();
        self.mixed_players = false;
        let mut result = false;

        let repr_player = self
            .vertices
            .first()
            .map(|&v| graph.vertex(v).label().player);

        let mut reach_blocks: BTreeSet<usize> = BTreeSet::new();
        for &v in &self.vertices {
            let vertex = graph.vertex(v);
            if let Some(rp) = repr_player {
                if vertex.label().player != rp {
                    self.mixed_players = true;
                }
            }

            reach_blocks.clear();
            let mut has_internal_out = false;
            for &dst in &vertex.out {
                let dst_block = block_of[dst];
                if dst_block != self.index {
                    reach_blocks.insert(dst_block);
                } else {
                    has_internal_out = true;
                }
            }
            scratch.get_mut(v).external = reach_blocks.len() as u32;
            if !has_internal_out {
                self.bottom.push(v);
            }
            if !reach_blocks.is_empty() {
                self.exit.push(v);
            }

            for &src in &vertex.in_ {
                self.incoming.push(src);
                if let Some(hef) = has_edge_from {
                    if block_of[src] == hef {
                        result = true;
                    }
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Label, Player};

    #[test]
    fn update_populates_exit_and_bottom() {
        let mut g = Graph::new();
        g.set_label(0, Label::new(0, Player::Even));
        g.set_label(1, Label::new(0, Player::Odd));
        g.add_arc(0, 1);
        g.add_arc(1, 1);

        let block_of = vec![0usize, 1usize];
        let mut scratch = ScratchPool::new(2);

        let mut b0 = Block::new(0);
        b0.vertices.push(0);
        b0.update(&g, &mut scratch, &block_of, None);
        assert_eq!(b0.exit, vec![0]);
        assert_eq!(b0.bottom, vec![0]);
        assert!(b0.mixed_players == false);

        let mut b1 = Block::new(1);
        b1.vertices.push(1);
        b1.update(&g, &mut scratch, &block_of, None);
        assert!(b1.exit.is_empty());
        assert!(b1.bottom.is_empty()); // self-loop is an in-block successor
    }

    #[test]
    fn update_reports_edge_from_given_block() {
        let mut g = Graph::new();
        g.set_label(0, Label::new(0, Player::Even));
        g.set_label(1, Label::new(0, Player::Even));
        g.add_arc(0, 1);

        let block_of = vec![0usize, 1usize];
        let mut scratch = ScratchPool::new(2);
        let mut b1 = Block::new(1);
        b1.vertices.push(1);
        assert!(b1.update(&g, &mut scratch, &block_of, Some(0)));
        assert!(!b1.update(&g, &mut scratch, &block_of, Some(99)));
    }
}
