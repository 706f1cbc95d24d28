/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Stuttering equivalence (component C7, §4.7): label-keyed blocks,
//! splits driven by reverse reachability from visited bottom vertices,
//! divergence folded into ordinary reachability via a synthetic sink.

use anyhow::Result;

use super::{finalize_initial_blocks, initial_partition_by_key};
use crate::block::Block;
use crate::driver::Equivalence;
use crate::graph::{Graph, Label, Player};
use crate::scratch::ScratchPool;

/// A priority no real PGSolver input uses, reserved for the divergence
/// sink so it never shares an initial block with a real vertex.
const SINK_PRIO: u32 = u32::MAX;

/// Reroutes every divergent vertex to one freshly added sink vertex with
/// a self-loop, converting divergence into ordinary stuttering
/// reachability. Returns the graph with the sink appended.
pub fn encode_divergence(graph: &Graph) -> Graph {
    let mut g = graph.clone();
    let sink = g.size();
    g.set_label(sink, Label { prio: SINK_PRIO, player: Player::Even, div: true });
    g.add_arc(sink, sink);
    for v in 0..sink {
        if g.vertex(v).label().div {
            g.add_arc(v, sink);
        }
    }
    g
}

/// Inverse of [`encode_divergence`] applied to a quotient: finds the
/// sink by its reserved priority, gives every predecessor a self-loop in
/// its place, then removes the sink vertex, compacting indices.
pub fn decode_divergence(quotient: &Graph) -> Graph {
    let n = quotient.size();
    let sink = (0..n)
        .find(|&i| quotient.vertex(i).label().prio == SINK_PRIO)
        .expect("encoded stut quotients always retain the sink vertex");
    let preds: Vec<usize> = quotient
        .vertex(sink)
        .in_
        .iter()
        .copied()
        .filter(|&p| p != sink)
        .collect();

    let mut remap = vec![usize::MAX; n];
    let mut next = 0usize;
    for i in 0..n {
        if i == sink {
            continue;
        }
        remap[i] = next;
        next += 1;
    }

    let mut out = Graph::with_capacity(n - 1);
    for i in 0..n {
        if i == sink {
            continue;
        }
        out.set_label(remap[i], quotient.vertex(i).label());
    }
    for i in 0..n {
        if i == sink {
            continue;
        }
        for &d in &quotient.vertex(i).out {
            if d == sink {
                continue;
            }
            out.add_arc(remap[i], remap[d]);
        }
    }
    for &p in &preds {
        out.add_arc(remap[p], remap[p]);
    }
    out
}

#[derive(Debug, Default)]
pub struct Stut;

impl Equivalence for Stut {
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
        _scratch: &mut ScratchPool,
        _blocks: &[Block],
        _block_of: &[usize],
        _b: usize,
    ) -> bool {
        false
    }

    fn split_cross(
        &mut self,
        graph: &Graph,
        scratch: &mut ScratchPool,
        blocks: &[Block],
        block_of: &[usize],
        b1: usize,
        _b2: usize,
    ) -> Result<bool> {
        if blocks[b1].bottom.iter().all(|&v| scratch.get(v).visited()) {
            return Ok(false);
        }

        let mut stack: Vec<usize> = blocks[b1]
            .vertices
            .iter()
            .copied()
            .filter(|&v| scratch.get(v).visited())
            .collect();
        for &v in &stack {
            scratch.get_mut(v).pos = true;
        }
        while let Some(v) = stack.pop() {
            for &p in &graph.vertex(v).in_ {
                if block_of[p] == b1 && !scratch.get(p).pos {
                    scratch.get_mut(p).pos = true;
                    stack.push(p);
                }
            }
        }
        Ok(true)
    }

    fn representative(&self, _graph: &Graph, _scratch: &ScratchPool, blocks: &[Block], b: usize) -> usize {
        blocks[b].vertices[0]
    }

    fn is_divergent(&self, _graph: &Graph, _scratch: &ScratchPool, _blocks: &[Block], _b: usize, _repr: usize) -> bool {
        false
    }
}
