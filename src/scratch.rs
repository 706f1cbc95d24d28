/*
 * SPDX-FileCopyrightText: 2026 pgquotient contributors
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Transient per-vertex scratch state used by the splitters.
//!
//! Every routine that sets one of these fields must clear it before
//! returning, unless the following phase explicitly consumes it (design
//! note, §9 / §14 of the spec). Grouping the fields into one record (as
//! opposed to four parallel `Vec`s) matches how the original tagged each
//! vertex directly rather than threading separate maps through every
//! splitter.

use bitflags::bitflags;

bitflags! {
    /// Per-player divergence bits. Bit assignment is internal to this
    /// crate: `EVEN` is set when the block may still be even-divergent,
    /// `ODD` when it may still be odd-divergent. Both set (`EVEN | ODD`)
    /// is the pre-seeded "unknown" state gstut starts a self-split from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DivBits: u8 {
        const EVEN = 0b01;
        const ODD  = 0b10;
    }
}

impl DivBits {
    pub fn for_player(p: crate::graph::Player) -> DivBits {
        match p {
            crate::graph::Player::Even => DivBits::EVEN,
            crate::graph::Player::Odd => DivBits::ODD,
        }
    }
}

/// One scratch record per vertex, indexed in parallel with the graph's
/// vertex vector.
#[derive(Debug, Clone, Default)]
pub struct Scratch {
    pub visit_counter: u32,
    pub external: u32,
    pub div: DivBits,
    pub pos: bool,
}

impl Default for DivBits {
    fn default() -> Self {
        DivBits::empty()
    }
}

impl Scratch {
    pub fn visit(&mut self) {
        self.visit_counter += 1;
    }

    pub fn visited(&self) -> bool {
        self.visit_counter > 0
    }

    pub fn clear_visit(&mut self) {
        self.visit_counter = 0;
    }
}

/// A parallel array of [`Scratch`] records, one per vertex.
#[derive(Debug, Clone, Default)]
pub struct ScratchPool {
    records: Vec<Scratch>,
}

impl ScratchPool {
    pub fn new(n: usize) -> Self {
        ScratchPool {
            records: vec![Scratch::default(); n],
        }
    }

    pub fn resize(&mut self, n: usize) {
        if n > self.records.len() {
            self.records.resize(n, Scratch::default());
        }
    }

    pub fn get(&self, i: usize) -> &Scratch {
        &self.records[i]
    }

    pub fn get_mut(&mut self, i: usize) -> &mut Scratch {
        &mut self.records[i]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_bits_for_player_round_trips() {
        use crate::graph::Player;
        assert_eq!(DivBits::for_player(Player::Even), DivBits::EVEN);
        assert_eq!(DivBits::for_player(Player::Odd), DivBits::ODD);
    }

    #[test]
    fn visit_counter_tracks_visited() {
        let mut s = Scratch::default();
        assert!(!s.visited());
        s.visit();
        assert!(s.visited());
        assert_eq!(s.visit_counter, 1);
        s.clear_visit();
        assert!(!s.visited());
    }
}
