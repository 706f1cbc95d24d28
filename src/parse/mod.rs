/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Text readers (component C10, §10): PGSolver parity games and
//! Aldebaran `.aut` transition systems.

pub mod aut;
pub mod pgsolver;
