/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Forced-move identifying bisimulation (component C6, §4.6):
//! priority-only initial blocks, split by per-player outgoing-block
//! fan-out.

use std::collections::BTreeSet;

use anyhow::Result;

use super::{finalize_initial_blocks, initial_partition_by_key, self_via_cross, visited_bitmap_split};
use crate::block::Block;
use crate::driver::Equivalence;
use crate::graph::{Graph, Player};
use crate::scratch::ScratchPool;

#[derive(Debug, Default)]
pub struct Fmib;

impl Fmib {
    /// The number of distinct blocks `v`'s out-edges reach, *including
    /// its own block* when `v` has an in-block out-edge. Per
    /// `fmib.h`'s `block_t::update` and §4.6's `|{dst.block : dst ∈
    /// v.out}|`, FMIB's fan-out test needs this count, which differs
    /// from the shared `Scratch::external` counter (other-blocks-only,
    /// correct for gstut/bisim but not for fmib — see DESIGN.md).
    fn reachable_blocks(graph: &Graph, block_of: &[usize], v: usize) -> usize {
        graph.vertex(v).out.iter().map(|&dst| block_of[dst]).collect::<BTreeSet<_>>().len()
    }

    fn split_by_player(
        &self,
        graph: &Graph,
        scratch: &mut ScratchPool,
        block: &Block,
        block_of: &[usize],
        p: Player,
    ) -> bool {
        let movers: Vec<usize> = block
            .vertices
            .iter()
            .copied()
            .filter(|&v| graph.vertex(v).label().player == p && Self::reachable_blocks(graph, block_of, v) > 1)
            .collect();
        if movers.is_empty() {
            return false;
        }
        for &v in &movers {
            scratch.get_mut(v).pos = true;
        }
        true
    }
}

impl Equivalence for Fmib {
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
        if !blocks[b].mixed_players {
            return false;
        }
        if self.split_by_player(graph, scratch, &blocks[b], block_of, Player::Even) {
            return true;
        }
        if self.split_by_player(graph, scratch, &blocks[b], block_of, Player::Odd) {
            return true;
        }
        let sources = blocks[b].incoming.clone();
        self_via_cross(scratch, &blocks[b].vertices, &sources)
    }

    fn split_cross(
        &mut self,
        _graph: &Graph,
        scratch: &mut ScratchPool,
        blocks: &[Block],
        _block_of: &[usize],
        b1: usize,
        _b2: usize,
    ) -> Result<bool> {
        Ok(visited_bitmap_split(scratch, &blocks[b1].vertices))
    }

    fn representative(&self, _graph: &Graph, _scratch: &ScratchPool, blocks: &[Block], b: usize) -> usize {
        blocks[b].vertices[0]
    }

    fn is_divergent(&self, _graph: &Graph, _scratch: &ScratchPool, _blocks: &[Block], _b: usize, _repr: usize) -> bool {
        false
    }
}
