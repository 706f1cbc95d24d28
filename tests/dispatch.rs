/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! End-to-end coverage of `quotient_by_name` (the library entry point
//! `pgconvert` dispatches through, §11) for every equivalence name,
//! starting from literal PGSolver text.

use anyhow::Result;
use pgquotient::parse::pgsolver;
use pgquotient::quotient_by_name;

const THREE_CYCLE: &str = "parity 2;\n0 1 0 1;\n1 1 0 2;\n2 1 0 0;\n";

#[test]
fn scc_collapses_the_equal_label_cycle() -> Result<()> {
    let g = pgsolver::read(THREE_CYCLE.as_bytes())?;
    let q = quotient_by_name(g, "scc")?;
    assert_eq!(q.size(), 1);
    assert!(q.vertex(0).label().div);
    Ok(())
}

#[test]
fn gstut2_runs_scc_then_gstut() -> Result<()> {
    let g = pgsolver::read(THREE_CYCLE.as_bytes())?;
    let q = quotient_by_name(g, "gstut2")?;
    assert_eq!(q.size(), 1);
    Ok(())
}

#[test]
fn every_named_equivalence_preserves_vertex_zero() -> Result<()> {
    let text = "parity 3;\n0 1 0 1;\n1 2 1 2,0;\n2 1 0 1;\n";
    for name in ["scc", "bisim", "fmib", "stut", "gstut", "gstut2", "wgstut"] {
        let g = pgsolver::read(text.as_bytes())?;
        let q = quotient_by_name(g, name)?;
        assert!(q.size() >= 1, "{name}: expected a non-empty quotient");
        assert!(q.size() <= 3, "{name}: quotient should never grow the graph");
    }
    Ok(())
}

#[test]
fn unknown_equivalence_name_is_rejected() -> Result<()> {
    let g = pgsolver::read(THREE_CYCLE.as_bytes())?;
    assert!(quotient_by_name(g, "not-a-real-equivalence").is_err());
    Ok(())
}
