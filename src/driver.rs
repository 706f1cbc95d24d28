/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The generic partition-refinement driver (component C4).
//!
//! The four core equivalences (bisim, fmib, stut, gstut) share this
//! driver and differ only in the [`Equivalence`] implementation they
//! supply: `create_initial_partition`, `split_self`, `split_cross`, and
//! the quotient-time `representative`/`is_divergent` queries. `wgstut`
//! does not implement this trait — its control flow does not fit the
//! fixed-point loop below (see `equivalences::wgstut`).

use std::collections::BTreeSet;

use anyhow::Result;
use dsi_progress_logger::prelude::*;
use log::{debug, info};

use crate::block::Block;
use crate::graph::Graph;
use crate::scratch::ScratchPool;

/// Moves every `pos`-marked vertex of `blocks[b1]` into a freshly created
/// block, updates both blocks' metadata, and returns whether the split
/// created new cross-block work elsewhere. Shared between [`Partitioner`]
/// and the single-pass `wgstut` routine (§4.10), which needs the same
/// move-and-relabel step without the rest of the fixed-point loop.
pub(crate) fn refine_block(
    graph: &Graph,
    scratch: &mut ScratchPool,
    blocks: &mut Vec<Block>,
    block_of: &mut [usize],
    b1: usize,
) -> bool {
    let c_index = blocks.len();
    let mut c = Block::new(c_index);
    let mut remaining = Vec::with_capacity(blocks[b1].vertices.len());
    for &v in &blocks[b1].vertices {
        if scratch.get(v).pos {
            c.vertices.push(v);
            block_of[v] = c_index;
            scratch.get_mut(v).pos = false;
        } else {
            remaining.push(v);
        }
    }
    debug_assert!(!remaining.is_empty(), "splitter must produce a strict split");
    debug_assert!(!c.vertices.is_empty(), "splitter must produce a strict split");
    blocks[b1].vertices = remaining;
    blocks.push(c);

    let r1 = blocks[b1].update(graph, scratch, block_of, Some(c_index));
    let r2 = blocks[c_index].update(graph, scratch, block_of, Some(b1));
    r1 || r2
}

/// The capability set an equivalence supplies to the generic driver.
pub trait Equivalence {
    /// Populates `blocks`/`block_of` with the coarsest starting guess.
    fn create_initial_partition(
        &mut self,
        graph: &Graph,
        scratch: &mut ScratchPool,
        blocks: &mut Vec<Block>,
        block_of: &mut Vec<usize>,
    );

    /// Attempts to split `blocks[b]` against itself. On success, marks
    /// `pos = true` (via `scratch`) on the vertices that should move to
    /// the new block and returns `true`.
    fn split_self(
        &mut self,
        graph: &Graph,
        scratch: &mut ScratchPool,
        blocks: &[Block],
        block_of: &[usize],
        b: usize,
    ) -> bool;

    /// Attempts to split `blocks[b1]` using `blocks[b2]` as a splitter.
    /// The driver has already marked every source of `b2`'s `incoming`
    /// list as visited (`scratch.visit()`) before calling this.
    fn split_cross(
        &mut self,
        graph: &Graph,
        scratch: &mut ScratchPool,
        blocks: &[Block],
        block_of: &[usize],
        b1: usize,
        b2: usize,
    ) -> Result<bool>;

    /// Picks the vertex whose label becomes the quotient vertex's label.
    fn representative(
        &self,
        graph: &Graph,
        scratch: &ScratchPool,
        blocks: &[Block],
        b: usize,
    ) -> usize;

    /// Whether the quotient vertex for `blocks[b]` gets a self-loop.
    fn is_divergent(
        &self,
        graph: &Graph,
        scratch: &ScratchPool,
        blocks: &[Block],
        b: usize,
        repr: usize,
    ) -> bool;
}

/// Drives a generic partition refinement to completion and emits the
/// quotient graph.
pub struct Partitioner<'g, E> {
    graph: &'g Graph,
    blocks: Vec<Block>,
    block_of: Vec<usize>,
    scratch: ScratchPool,
    equiv: E,
}

impl<'g, E: Equivalence> Partitioner<'g, E> {
    pub fn new(graph: &'g Graph, equiv: E) -> Self {
        let n = graph.size();
        Partitioner {
            graph,
            blocks: Vec::new(),
            block_of: vec![usize::MAX; n],
            scratch: ScratchPool::new(n),
            equiv,
        }
    }

    /// Runs `create_initial_partition → {split/refine}* → quotient_emit`
    /// and returns the resulting quotient graph.
    pub fn partition(mut self) -> Result<Graph> {
        self.equiv.create_initial_partition(
            self.graph,
            &mut self.scratch,
            &mut self.blocks,
            &mut self.block_of,
        );
        info!(
            "partitioner: initial partition has {} blocks over {} vertices",
            self.blocks.len(),
            self.graph.size()
        );

        let mut pl = ProgressLogger::default();
        pl.item_name("split").start("Refining partition...");

        loop {
            let mut splitter: Option<usize> = None;

            // Phase A: self-splits.
            for b in 0..self.blocks.len() {
                if self.blocks[b].divstable {
                    continue;
                }
                if self.equiv.split_self(
                    self.graph,
                    &mut self.scratch,
                    &self.blocks,
                    &self.block_of,
                    b,
                ) {
                    splitter = Some(b);
                    break;
                } else {
                    self.blocks[b].divstable = true;
                }
            }

            // Phase B: cross-splits.
            if splitter.is_none() {
                'outer: for b2 in 0..self.blocks.len() {
                    if self.blocks[b2].stable {
                        continue;
                    }
                    let sources = self.blocks[b2].incoming.clone();
                    for &src in &sources {
                        self.scratch.get_mut(src).visit();
                    }
                    let adjacent: BTreeSet<usize> = sources
                        .iter()
                        .map(|&src| self.block_of[src])
                        .filter(|&a| a != b2)
                        .collect();

                    let mut found_here = None;
                    for a in adjacent {
                        if self.equiv.split_cross(
                            self.graph,
                            &mut self.scratch,
                            &self.blocks,
                            &self.block_of,
                            a,
                            b2,
                        )? {
                            found_here = Some(a);
                            break;
                        }
                    }
                    for &src in &sources {
                        self.scratch.get_mut(src).clear_visit();
                    }
                    if let Some(a) = found_here {
                        splitter = Some(a);
                        break 'outer;
                    }
                    self.blocks[b2].stable = true;
                }
            }

            let Some(b1) = splitter else { break };
            debug!("partitioner: refining block {}", b1);
            if self.refine(b1) {
                self.blocks[b1].divstable = false;
                for b in self.blocks.iter_mut() {
                    b.stable = false;
                }
            }
            pl.light_update();
        }
        pl.done();

        Ok(self.quotient_emit())
    }

    /// Moves every `pos`-marked vertex of `blocks[b1]` into a freshly
    /// created block, updates both blocks' metadata, and returns whether
    /// the split created new cross-block work elsewhere.
    fn refine(&mut self, b1: usize) -> bool {
        refine_block(self.graph, &mut self.scratch, &mut self.blocks, &mut self.block_of, b1)
    }

    /// Builds the quotient graph: swaps vertex 0's block into position 0,
    /// copies a representative label per block, adds divergence
    /// self-loops, and wires up cross-block edges.
    fn quotient_emit(mut self) -> Graph {
        let b0 = self.block_of[0];
        if b0 != 0 {
            self.blocks.swap(0, b0);
            self.blocks[0].index = 0;
            self.blocks[b0].index = b0;
            for &v in self.blocks[0].vertices.clone().iter() {
                self.block_of[v] = 0;
            }
            for &v in self.blocks[b0].vertices.clone().iter() {
                self.block_of[v] = b0;
            }
        }

        let n = self.blocks.len();
        let mut out = Graph::with_capacity(n);
        for b in 0..n {
            let repr = self
                .equiv
                .representative(self.graph, &self.scratch, &self.blocks, b);
            out.set_label(b, self.graph.vertex(repr).label());
            if self
                .equiv
                .is_divergent(self.graph, &self.scratch, &self.blocks, b, repr)
            {
                out.add_arc(b, b);
            }
        }
        for b in 0..n {
            for &src in &self.blocks[b].incoming {
                out.add_arc(self.block_of[src], b);
            }
        }
        info!("partitioner: quotient has {} blocks", n);
        out
    }
}
