/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Governed stuttering equivalence (component C8, §4.8): priority-keyed
//! blocks, per-player attractor splits, with per-block divergence bits
//! tracked through the refinement.

use std::collections::BTreeSet;

use anyhow::{bail, Result};

use super::{finalize_initial_blocks, initial_partition_by_key};
use crate::block::Block;
use crate::driver::Equivalence;
use crate::graph::{Graph, Player};
use crate::scratch::{DivBits, ScratchPool};

/// Attracts `todo` (already forced or choosing) outward within `block`
/// for player `p`, classic attractor expansion: an opponent-owned vertex
/// joins only once *every* successor has been attracted; a `p`-owned
/// vertex joins as soon as *any* successor has.
fn attractor(
    graph: &Graph,
    scratch: &mut ScratchPool,
    block: &Block,
    block_of: &[usize],
    p: Player,
    todo: Vec<usize>,
) -> usize {
    for &v in &todo {
        scratch.get_mut(v).pos = true;
    }
    let mut stack = todo;
    let mut result = 0usize;
    while let Some(v) = stack.pop() {
        scratch.get_mut(v).div.remove(DivBits::for_player(p.opponent()));
        result += 1;
        for &w in &graph.vertex(v).in_ {
            if block_of[w] != block.index || scratch.get(w).pos {
                continue;
            }
            scratch.get_mut(w).visit();
            let forced = scratch.get(w).visit_counter == graph.out_degree(w) as u32;
            let chooses = graph.vertex(w).label().player == p && scratch.get(w).visited();
            if forced || chooses {
                scratch.get_mut(w).pos = true;
                stack.push(w);
            }
        }
    }
    for &v in &block.vertices {
        scratch.get_mut(v).clear_visit();
    }
    result
}

/// Seeds `todo` from vertices that are forced out of the block (no
/// in-block successor, i.e. members of `block.bottom`) or that choose to
/// leave under `touches`, then runs the attractor. A strict, non-trivial
/// result is a successful split. Shared between [`GStut`] and the
/// single-pass `wgstut` routine (§4.10), which drives the identical
/// attractor shape through a different outer control flow.
pub(crate) fn attractor_split(
    graph: &Graph,
    scratch: &mut ScratchPool,
    block: &Block,
    block_of: &[usize],
    p: Player,
    touches: impl Fn(&ScratchPool, usize) -> bool,
) -> bool {
    let bottom: BTreeSet<usize> = block.bottom.iter().copied().collect();
    let todo: Vec<usize> = block
        .vertices
        .iter()
        .copied()
        .filter(|&v| bottom.contains(&v) || (graph.vertex(v).label().player == p && touches(scratch, v)))
        .collect();
    let result = attractor(graph, scratch, block, block_of, p, todo);
    if result > 0 && result < block.vertices.len() {
        true
    } else {
        for &v in &block.vertices {
            scratch.get_mut(v).pos = false;
        }
        false
    }
}

pub struct GStut;

impl GStut {
    fn split_players(
        &self,
        graph: &Graph,
        scratch: &mut ScratchPool,
        blocks: &[Block],
        block_of: &[usize],
        b1: usize,
        b2: usize,
    ) -> bool {
        let sources = blocks[b2].incoming.clone();
        let touches = |scratch: &ScratchPool, v: usize| scratch.get(v).visited();

        for &src in &sources {
            scratch.get_mut(src).visit();
        }
        let even_ok = attractor_split(graph, scratch, &blocks[b1], block_of, Player::Even, touches);
        for &src in &sources {
            scratch.get_mut(src).clear_visit();
        }
        if even_ok {
            return true;
        }

        for &src in &sources {
            scratch.get_mut(src).visit();
        }
        let odd_ok = attractor_split(graph, scratch, &blocks[b1], block_of, Player::Odd, touches);
        for &src in &sources {
            scratch.get_mut(src).clear_visit();
        }
        odd_ok
    }
}

impl Equivalence for GStut {
    fn create_initial_partition(
        &mut self,
        graph: &Graph,
        scratch: &mut ScratchPool,
        blocks: &mut Vec<Block>,
        block_of: &mut Vec<usize>,
    ) {
        initial_partition_by_key(graph, blocks, block_of, |g, v| g.vertex(v).label().prio);
        finalize_initial_blocks(graph, scratch, blocks, block_of);
    }

    fn split_self(
        &mut self,
        graph: &Graph,
        scratch: &mut ScratchPool,
        blocks: &[Block],
        block_of: &[usize],
        b: usize,
    ) -> bool {
        for &v in &blocks[b].vertices {
            scratch.get_mut(v).div = DivBits::EVEN | DivBits::ODD;
        }
        let touches = |scratch: &ScratchPool, v: usize| scratch.get(v).external > 0;
        if attractor_split(graph, scratch, &blocks[b], block_of, Player::Even, touches) {
            return true;
        }
        attractor_split(graph, scratch, &blocks[b], block_of, Player::Odd, touches)
    }

    fn split_cross(
        &mut self,
        graph: &Graph,
        scratch: &mut ScratchPool,
        blocks: &[Block],
        block_of: &[usize],
        b1: usize,
        b2: usize,
    ) -> Result<bool> {
        let repr_div = scratch.get(blocks[b1].vertices[0]).div;
        if repr_div == (DivBits::EVEN | DivBits::ODD) {
            bail!(
                "gstut: block {} carries div==3 (no player was ever disproved divergent) \
                 but was offered as a cross-splitter — the block has no exits",
                b1
            );
        }
        if repr_div.is_empty() {
            let sources_visited = |v: usize| scratch.get(v).visited();
            let bottom_error = blocks[b1].exit.iter().any(|&v| !sources_visited(v));
            let even_rules = blocks[b1]
                .exit
                .iter()
                .any(|&v| graph.vertex(v).label().player == Player::Even);
            let odd_rules = blocks[b1]
                .exit
                .iter()
                .any(|&v| graph.vertex(v).label().player == Player::Odd);
            if bottom_error || (even_rules && odd_rules) {
                return Ok(self.split_players(graph, scratch, blocks, block_of, b1, b2));
            }
            return Ok(false);
        }
        Ok(self.split_players(graph, scratch, blocks, block_of, b1, b2))
    }

    fn representative(&self, _graph: &Graph, scratch: &ScratchPool, blocks: &[Block], b: usize) -> usize {
        blocks[b]
            .vertices
            .iter()
            .copied()
            .find(|&v| scratch.get(v).external > 0)
            .unwrap_or(blocks[b].vertices[0])
    }

    fn is_divergent(&self, graph: &Graph, scratch: &ScratchPool, blocks: &[Block], b: usize, repr: usize) -> bool {
        let p = graph.vertex(repr).label().player;
        let bottom: BTreeSet<usize> = blocks[b].bottom.iter().copied().collect();
        blocks[b].vertices.iter().all(|&v| {
            scratch.get(v).external == 0 || (graph.vertex(v).label().player == p && !bottom.contains(&v))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Partitioner;
    use crate::graph::Label;

    #[test]
    fn even_attractor_splits_priority_zero_block() {
        // S5: labels (0,even),(0,even),(1,odd); edges 0->1,1->0,1->2,2->2.
        let mut g = Graph::new();
        g.set_label(0, Label::new(0, Player::Even));
        g.set_label(1, Label::new(0, Player::Even));
        g.set_label(2, Label::new(1, Player::Odd));
        g.add_arc(0, 1);
        g.add_arc(1, 0);
        g.add_arc(1, 2);
        g.add_arc(2, 2);

        let q = Partitioner::new(&g, GStut).partition().unwrap();
        assert!(q.size() >= 2);
        assert!(q.size() <= 3);
        // The (1,odd) priority-1 class always stays a singleton and
        // keeps its self-loop.
        let odd_vertex = (0..q.size()).find(|&i| q.vertex(i).label().player == Player::Odd);
        assert!(odd_vertex.is_some());
        let ov = odd_vertex.unwrap();
        assert!(q.vertex(ov).out.contains(&ov));
    }

    #[test]
    fn invariant_trap_raises_on_div3_block() {
        let mut g = Graph::new();
        g.set_label(0, Label::new(0, Player::Even));
        g.set_label(1, Label::new(0, Player::Even));
        g.add_arc(0, 1);
        g.add_arc(1, 0);

        let mut scratch = ScratchPool::new(2);
        for v in 0..2 {
            scratch.get_mut(v).div = DivBits::EVEN | DivBits::ODD;
        }
        let block_of = vec![0usize, 0usize];
        let mut b = Block::new(0);
        b.vertices = vec![0, 1];
        b.update(&g, &mut scratch, &block_of, None);
        let mut b2 = Block::new(1);
        b2.vertices = vec![];

        let blocks = vec![b, b2];
        let mut gstut = GStut;
        let result = gstut
            .split_cross(&g, &mut scratch, &blocks, &block_of, 0, 1)
            .unwrap_err();
        assert!(result.to_string().contains("div==3"));
    }
}
