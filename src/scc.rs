/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Strongly-connected-component collapse restricted to equal-label edges
//! (component C2): an iterative Tarjan pass, followed by compaction of
//! each component down to a single representative vertex.

use std::collections::BTreeSet;

use dsi_progress_logger::prelude::*;
use log::debug;

use crate::graph::Graph;

struct Frame {
    v: usize,
    neighbors: Vec<usize>,
    pos: usize,
}

/// Neighbours of `v` reachable by an edge whose endpoints share a label,
/// in ascending order (the underlying adjacency set is already sorted).
fn same_label_out(graph: &Graph, v: usize) -> Vec<usize> {
    let label = graph.vertex(v).label();
    graph
        .vertex(v)
        .out
        .iter()
        .copied()
        .filter(|&w| graph.vertex(w).label() == label)
        .collect()
}

/// Computes `scc[i]` for every vertex via an iterative (non-recursive)
/// Tarjan's algorithm restricted to equal-label edges, such that
/// `scc[i] == scc[j]` iff `i` and `j` lie in the same equal-label SCC.
/// The id assigned to vertex 0's component is swapped with id 0 so that
/// vertex 0 always maps to component 0 (§4.2 step 2).
pub fn compute_scc_ids(graph: &Graph) -> Vec<usize> {
    let n = graph.size();
    let mut index: Vec<Option<u32>> = vec![None; n];
    let mut lowlink: Vec<u32> = vec![0; n];
    let mut on_stack: Vec<bool> = vec![false; n];
    let mut tarjan_stack: Vec<usize> = Vec::new();
    let mut scc_id: Vec<usize> = vec![usize::MAX; n];
    let mut next_index: u32 = 0;
    let mut next_scc: usize = 0;

    let mut pl = ProgressLogger::default();
    pl.item_name("vertex").expected_updates(Some(n));
    pl.start("Computing equal-label SCCs...");

    for start in 0..n {
        pl.light_update();
        if index[start].is_some() {
            continue;
        }
        let mut call_stack: Vec<Frame> = Vec::new();
        index[start] = Some(next_index);
        lowlink[start] = next_index;
        next_index += 1;
        tarjan_stack.push(start);
        on_stack[start] = true;
        call_stack.push(Frame {
            v: start,
            neighbors: same_label_out(graph, start),
            pos: 0,
        });

        while let Some(frame) = call_stack.last_mut() {
            let v = frame.v;
            if frame.pos < frame.neighbors.len() {
                let w = frame.neighbors[frame.pos];
                frame.pos += 1;
                match index[w] {
                    None => {
                        index[w] = Some(next_index);
                        lowlink[w] = next_index;
                        next_index += 1;
                        tarjan_stack.push(w);
                        on_stack[w] = true;
                        call_stack.push(Frame {
                            v: w,
                            neighbors: same_label_out(graph, w),
                            pos: 0,
                        });
                    }
                    Some(idx_w) if on_stack[w] => {
                        lowlink[v] = lowlink[v].min(idx_w);
                    }
                    _ => {}
                }
            } else {
                call_stack.pop();
                if let Some(parent) = call_stack.last() {
                    let p = parent.v;
                    lowlink[p] = lowlink[p].min(lowlink[v]);
                }
                if lowlink[v] == index[v].unwrap() {
                    loop {
                        let w = tarjan_stack.pop().unwrap();
                        on_stack[w] = false;
                        scc_id[w] = next_scc;
                        if w == v {
                            break;
                        }
                    }
                    next_scc += 1;
                }
            }
        }
    }

    if n > 0 {
        let id0 = scc_id[0];
        if id0 != 0 {
            for id in scc_id.iter_mut() {
                if *id == 0 {
                    *id = id0;
                } else if *id == id0 {
                    *id = 0;
                }
            }
        }
    }
    pl.done();

    scc_id
}

/// Collapses `graph` in place to its equal-label SCC quotient (§4.2
/// steps 3-5). Returns the `scc[i]` mapping from original vertex index
/// to collapsed index, which callers such as `autscc` use to report
/// component membership.
pub fn collapse(graph: &mut Graph) -> Vec<usize> {
    let scc_id = compute_scc_ids(graph);
    let n = graph.size();
    let k = scc_id.iter().copied().max().map_or(0, |m| m + 1);
    debug!("scc: collapsing {} vertices into {} components", n, k);

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); k];
    for v in 0..n {
        members[scc_id[v]].push(v);
    }

    let mut new_out: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); k];
    let mut new_in: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); k];
    let mut new_label = vec![None; k];

    for v in 0..n {
        let sid = scc_id[v];
        if new_label[sid].is_none() {
            new_label[sid] = Some(graph.vertex(v).label());
        }
        for &dst in &graph.vertex(v).out {
            new_out[sid].insert(scc_id[dst]);
        }
        for &src in &graph.vertex(v).in_ {
            new_in[sid].insert(scc_id[src]);
        }
    }

    let mut collapsed = Graph::with_capacity(k);
    for sid in 0..k {
        let mut label = new_label[sid].expect("every component has at least one member");
        let is_collapse_induced_loop = members[sid].len() > 1 && new_out[sid].contains(&sid);
        if is_collapse_induced_loop {
            new_out[sid].remove(&sid);
            label.div = true;
            new_out[sid].insert(sid);
            new_in[sid].insert(sid);
        }
        collapsed.set_label(sid, label);
    }
    for sid in 0..k {
        for &dst in &new_out[sid] {
            collapsed.add_arc(sid, dst);
        }
    }

    *graph = collapsed;
    scc_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Label, Player};

    #[test]
    fn three_cycle_same_label_collapses_with_self_loop() {
        let mut g = Graph::new();
        for i in 0..3 {
            g.set_label(i, Label::new(1, Player::Even));
        }
        g.add_arc(0, 1);
        g.add_arc(1, 2);
        g.add_arc(2, 0);

        collapse(&mut g);

        assert_eq!(g.size(), 1);
        assert_eq!(g.vertex(0).label().prio, 1);
        assert_eq!(g.vertex(0).label().player, Player::Even);
        assert!(g.vertex(0).label().div);
        assert!(g.vertex(0).out.contains(&0));
    }

    #[test]
    fn differing_labels_block_scc_collapse() {
        let mut g = Graph::new();
        g.set_label(0, Label::new(1, Player::Even));
        g.set_label(1, Label::new(2, Player::Even));
        g.add_arc(0, 1);
        g.add_arc(1, 0);

        collapse(&mut g);

        assert_eq!(g.size(), 2);
    }

    #[test]
    fn vertex_zero_lands_in_component_zero() {
        let mut g = Graph::new();
        g.set_label(0, Label::new(1, Player::Even));
        g.set_label(1, Label::new(1, Player::Even));
        g.set_label(2, Label::new(1, Player::Even));
        // vertex 0 is a singleton; 1 and 2 cycle together.
        g.add_arc(1, 2);
        g.add_arc(2, 1);
        g.add_arc(0, 1);

        let ids = compute_scc_ids(&g);
        assert_eq!(ids[0], 0);
    }

    #[test]
    fn collapse_is_idempotent() {
        let mut g = Graph::new();
        for i in 0..3 {
            g.set_label(i, Label::new(1, Player::Even));
        }
        g.add_arc(0, 1);
        g.add_arc(1, 2);
        g.add_arc(2, 0);
        collapse(&mut g);
        let once = format!("{:?}", g);
        collapse(&mut g);
        let twice = format!("{:?}", g);
        assert_eq!(once, twice);
    }
}
