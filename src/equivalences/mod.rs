/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The five equivalence-specific splitters (C5–C9). `bisim`, `fmib`,
//! `stut` and `gstut` implement [`crate::driver::Equivalence`] and run
//! through the shared driver; `wgstut` is a standalone single-pass
//! routine (§4.10 of the design) and does not.

pub mod bisim;
pub mod fmib;
pub mod gstut;
pub mod stut;
pub mod wgstut;

use std::collections::BTreeMap;

use crate::block::Block;
use crate::graph::Graph;
use crate::scratch::ScratchPool;

/// Groups every vertex into a block keyed by `key_of`, inserting
/// members in descending vertex-index order (§4.5's "insertion order:
/// reverse vertex index", applied uniformly to every keyed initial
/// partition for determinism).
pub(crate) fn initial_partition_by_key<K: Ord + Copy>(
    graph: &Graph,
    blocks: &mut Vec<Block>,
    block_of: &mut Vec<usize>,
    key_of: impl Fn(&Graph, usize) -> K,
) {
    let n = graph.size();
    blocks.clear();
    block_of.clear();
    block_of.resize(n, usize::MAX);
    let mut index_by_key: BTreeMap<K, usize> = BTreeMap::new();
    for v in (0..n).rev() {
        let k = key_of(graph, v);
        let bi = *index_by_key.entry(k).or_insert_with(|| {
            let idx = blocks.len();
            blocks.push(Block::new(idx));
            idx
        });
        blocks[bi].vertices.push(v);
        block_of[v] = bi;
    }
}

/// Runs `update` on every freshly created initial block once the whole
/// partition is known, so `incoming`/`exit`/`bottom`/`external` are
/// populated before the first splitter search.
pub(crate) fn finalize_initial_blocks(
    graph: &Graph,
    scratch: &mut ScratchPool,
    blocks: &mut [Block],
    block_of: &[usize],
) {
    scratch.resize(graph.size());
    for b in blocks.iter_mut() {
        b.update(graph, scratch, block_of, None);
    }
}

/// The shared "visited bitmap" splitting rule used by both bisim and
/// fmib's `split_cross` (§4.5, §4.6): given that the caller has already
/// marked a subset of `members` as visited, split iff both a visited and
/// an unvisited member exist, marking `pos` on the visited side.
pub(crate) fn visited_bitmap_split(scratch: &mut ScratchPool, members: &[usize]) -> bool {
    let mut any_visited = false;
    let mut any_unvisited = false;
    for &v in members {
        if scratch.get(v).visited() {
            any_visited = true;
        } else {
            any_unvisited = true;
        }
    }
    let split = any_visited && any_unvisited;
    if split {
        for &v in members {
            if scratch.get(v).visited() {
                scratch.get_mut(v).pos = true;
            }
        }
    }
    split
}

/// Runs the visited-bitmap rule against a block's own incoming sources
/// (a self-split expressed as a cross-split of the block against
/// itself), marking and clearing the provisional visited bits itself.
pub(crate) fn self_via_cross(
    scratch: &mut ScratchPool,
    members: &[usize],
    sources: &[usize],
) -> bool {
    for &src in sources {
        scratch.get_mut(src).visit();
    }
    let split = visited_bitmap_split(scratch, members);
    for &src in sources {
        scratch.get_mut(src).clear_visit();
    }
    split
}
