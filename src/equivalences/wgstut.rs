/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! "Paradise" equivalence (component C9, §4.10): a single-pass variant
//! of [`super::gstut`] keyed by priority parity, reachable only through
//! the `pgconvert -e wgstut` CLI path. Reuses gstut's attractor shape
//! but drives it through a one-shot procedure instead of the generic
//! fixed-point driver, so it intentionally does not implement
//! [`crate::driver::Equivalence`].

use log::debug;

use super::gstut::attractor_split;
use super::{finalize_initial_blocks, initial_partition_by_key};
use crate::block::Block;
use crate::driver::refine_block;
use crate::graph::{Graph, Player};
use crate::scratch::{DivBits, ScratchPool};

/// Attempts one self-split of `block` using the attractor for the
/// player opposite to the block's own parity key, pre-seeding `div = 3`
/// on every member. Unlike gstut there is no fallback to the other
/// player.
fn split_self(graph: &Graph, scratch: &mut ScratchPool, block: &Block, block_of: &[usize]) -> bool {
    for &v in &block.vertices {
        scratch.get_mut(v).div = DivBits::EVEN | DivBits::ODD;
    }
    let even_key = graph.vertex(block.vertices[0]).label().prio % 2 == 0;
    let p = if even_key { Player::Odd } else { Player::Even };
    let touches = |scratch: &ScratchPool, v: usize| scratch.get(v).external > 0;
    let result = attractor_split(graph, scratch, block, block_of, p, touches);
    for &v in &block.vertices {
        scratch.get_mut(v).clear_visit();
    }
    result
}

/// Runs the full single-pass wgstut procedure and returns the quotient.
pub fn run(graph: &Graph) -> Graph {
    let mut blocks: Vec<Block> = Vec::new();
    let mut block_of: Vec<usize> = Vec::new();
    let mut scratch = ScratchPool::new(graph.size());

    initial_partition_by_key(graph, &mut blocks, &mut block_of, |g, v| g.vertex(v).label().prio % 2);
    finalize_initial_blocks(graph, &mut scratch, &mut blocks, &block_of);
    debug!("wgstut: {} initial parity-keyed blocks", blocks.len());

    let n_initial = blocks.len();
    for b in 0..n_initial {
        if split_self(graph, &mut scratch, &blocks[b], &block_of) {
            refine_block(graph, &mut scratch, &mut blocks, &mut block_of, b);
        }
    }

    let mut final_blocks: Vec<Block> = Vec::new();
    let mut final_block_of = vec![usize::MAX; graph.size()];
    for b in &blocks {
        if b.vertices.is_empty() {
            continue;
        }
        let is_paradise = scratch.get(b.vertices[0]).div == (DivBits::EVEN | DivBits::ODD);
        if is_paradise {
            let idx = final_blocks.len();
            let mut nb = Block::new(idx);
            nb.vertices = b.vertices.clone();
            for &v in &nb.vertices {
                final_block_of[v] = idx;
            }
            final_blocks.push(nb);
        } else {
            for &v in &b.vertices {
                let idx = final_blocks.len();
                let mut nb = Block::new(idx);
                nb.vertices = vec![v];
                final_block_of[v] = idx;
                final_blocks.push(nb);
            }
        }
    }
    for nb in final_blocks.iter_mut() {
        nb.update(graph, &mut scratch, &final_block_of, None);
    }
    debug!("wgstut: {} final blocks after singleton explosion", final_blocks.len());

    quotient(graph, &scratch, &mut final_blocks, &mut final_block_of)
}

/// Swaps vertex 0 into block 0 and emits the quotient graph, per
/// `quotient()`'s representative/self-loop rule in §4.10.
fn quotient(graph: &Graph, scratch: &ScratchPool, blocks: &mut [Block], block_of: &mut [usize]) -> Graph {
    let b0 = block_of[0];
    if b0 != 0 {
        blocks.swap(0, b0);
        blocks[0].index = 0;
        blocks[b0].index = b0;
        for &v in blocks[0].vertices.clone().iter() {
            block_of[v] = 0;
        }
        for &v in blocks[b0].vertices.clone().iter() {
            block_of[v] = b0;
        }
    }

    let n = blocks.len();
    let mut out = Graph::with_capacity(n);
    for (b, block) in blocks.iter().enumerate() {
        let repr = block.vertices[0];
        let is_paradise = scratch.get(repr).div == (DivBits::EVEN | DivBits::ODD);
        let mut label = graph.vertex(repr).label();
        if is_paradise {
            label.player = if label.prio % 2 == 0 { Player::Even } else { Player::Odd };
        }
        out.set_label(b, label);
        let had_self_loop = graph.vertex(repr).out.contains(&repr);
        if is_paradise || had_self_loop {
            out.add_arc(b, b);
        }
    }
    for (b, block) in blocks.iter().enumerate() {
        for &src in &block.incoming {
            out.add_arc(block_of[src], b);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Label;

    #[test]
    fn single_self_looping_vertex_is_its_own_paradise() {
        // S7: one vertex (0, even) with a self-loop.
        let mut g = Graph::new();
        g.set_label(0, Label::new(0, Player::Even));
        g.add_arc(0, 0);

        let q = run(&g);
        assert_eq!(q.size(), 1);
        assert!(q.vertex(0).out.contains(&0));
    }

    #[test]
    fn disjoint_vertices_with_differing_parity_never_merge() {
        let mut g = Graph::new();
        g.set_label(0, Label::new(0, Player::Even));
        g.set_label(1, Label::new(1, Player::Odd));
        let q = run(&g);
        assert_eq!(q.size(), 2);
    }
}
