/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! A partition-refinement engine computing behavioural-equivalence
//! quotients of parity games and labelled transition graphs.
//!
//! The graph store and generic refinement driver live in [`graph`],
//! [`block`], [`scratch`] and [`driver`]; the per-equivalence splitters
//! live under [`equivalences`]; text I/O lives under [`parse`] and
//! [`dump`]. [`quotient_by_name`] ties a named equivalence to the
//! driver the way the `pgconvert` CLI does.

pub mod block;
pub mod driver;
pub mod dump;
pub mod equivalences;
pub mod graph;
pub mod parse;
pub mod scc;
pub mod scratch;

use anyhow::{bail, Result};

use crate::driver::Partitioner;
use crate::graph::Graph;

/// Maps a `-v` repeat count to a log level, the floor `env_logger`'s
/// `RUST_LOG` may still raise (§9).
pub fn verbosity_to_filter(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Runs the named equivalence to completion, mirroring `pgconvert`'s
/// dispatch (§11): `scc`/`gstut2` run the SCC collapser first, `stut`
/// wraps the driver in divergence encode/decode, `wgstut` bypasses the
/// driver entirely, and a bare `scc` needs no further refinement pass.
pub fn quotient_by_name(mut graph: Graph, name: &str) -> Result<Graph> {
    match name {
        "scc" => {
            scc::collapse(&mut graph);
            Ok(graph)
        }
        "bisim" => Partitioner::new(&graph, equivalences::bisim::Bisim).partition(),
        "fmib" => Partitioner::new(&graph, equivalences::fmib::Fmib).partition(),
        "stut" => {
            let encoded = equivalences::stut::encode_divergence(&graph);
            let q = Partitioner::new(&encoded, equivalences::stut::Stut).partition()?;
            Ok(equivalences::stut::decode_divergence(&q))
        }
        "gstut" => Partitioner::new(&graph, equivalences::gstut::GStut).partition(),
        "gstut2" => {
            scc::collapse(&mut graph);
            Partitioner::new(&graph, equivalences::gstut::GStut).partition()
        }
        "wgstut" => Ok(equivalences::wgstut::run(&graph)),
        other => bail!("unknown equivalence '{}' (expected one of scc, bisim, fmib, stut, gstut, gstut2, wgstut)", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Label, Player};

    #[test]
    fn rejects_unknown_equivalence_names() {
        let mut g = Graph::new();
        g.set_label(0, Label::new(0, Player::Even));
        assert!(quotient_by_name(g, "nonsense").is_err());
    }
}
