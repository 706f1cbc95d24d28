/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Strong, label-preserving bisimulation (component C5, §4.5).

use anyhow::Result;

use super::{finalize_initial_blocks, initial_partition_by_key, self_via_cross, visited_bitmap_split};
use crate::block::Block;
use crate::driver::Equivalence;
use crate::graph::Graph;
use crate::scratch::ScratchPool;

#[derive(Debug, Default)]
pub struct Bisim;

impl Equivalence for Bisim {
    fn create_initial_partition(
        &mut self,
        graph: &Graph,
        scratch: &mut ScratchPool,
        blocks: &mut Vec<Block>,
        block_of: &mut Vec<usize>,
    ) {
        initial_partition_by_key(graph, blocks, block_of, |g, v| g.vertex(v).label());
        finalize_initial_blocks(graph, scratch, blocks, block_of);
    }

    fn split_self(
        &mut self,
        _graph: &Graph,
        scratch: &mut ScratchPool,
        blocks: &[Block],
        _block_of: &[usize],
        b: usize,
    ) -> bool {
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
