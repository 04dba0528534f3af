//! Table safety verification.
//!
//! The phase table is checked once, when the firmware is compiled.  Each
//! check is a `const fn` evaluated by a `const` assertion at the bottom of
//! this module, so a table edit that breaks an invariant fails the build
//! instead of reaching an intersection.  Nothing here runs in the control
//! loop.
//!
//! ## Checks
//!
//! | Check                 | Rejects                                           |
//! |-----------------------|---------------------------------------------------|
//! | `rows_in_order`       | row `i` whose `id` is not `PhaseId` number `i`    |
//! | `no_conflicting_green`| green on the primary and secondary road together  |
//! | `one_aspect_per_road` | a dark head, or two lamps lit on one head         |
//! | `no_reserved_bits`    | a pattern driving an unwired channel bit          |
//! | `all_reachable`       | a phase no input sequence can reach from start    |
//!
//! Totality needs no check: every row is a `[PhaseId; 16]`, so each of the
//! sixteen conditions has exactly one successor and it is always a phase.

use crate::fsm::lamps::{RoadAspect, primary_aspect, secondary_aspect};
use crate::fsm::{InputCondition, PHASE_TABLE, Phase, PhaseId};
use crate::pins;

type Table = [Phase; PhaseId::COUNT];

pub const fn rows_in_order(table: &Table) -> bool {
    let mut i = 0;
    while i < PhaseId::COUNT {
        if table[i].id as usize != i {
            return false;
        }
        i += 1;
    }
    true
}

/// True when this phase shows green to both roads at once.
pub const fn shows_conflicting_green(phase: &Phase) -> bool {
    phase.chan_a & pins::PRIMARY_GREEN_BIT != 0 && phase.chan_b & pins::SECONDARY_GREEN_BIT != 0
}

pub const fn no_conflicting_green(table: &Table) -> bool {
    let mut i = 0;
    while i < PhaseId::COUNT {
        if shows_conflicting_green(&table[i]) {
            return false;
        }
        i += 1;
    }
    true
}

const fn is_single_aspect(a: RoadAspect) -> bool {
    matches!(a, RoadAspect::Red | RoadAspect::Yellow | RoadAspect::Green)
}

pub const fn one_aspect_per_road(table: &Table) -> bool {
    let mut i = 0;
    while i < PhaseId::COUNT {
        if !is_single_aspect(primary_aspect(table[i].chan_a))
            || !is_single_aspect(secondary_aspect(table[i].chan_b))
        {
            return false;
        }
        i += 1;
    }
    true
}

pub const fn no_reserved_bits(table: &Table) -> bool {
    let mut i = 0;
    while i < PhaseId::COUNT {
        if table[i].chan_a & !pins::CHANNEL_A_MASK != 0
            || table[i].chan_b & !pins::CHANNEL_B_MASK != 0
        {
            return false;
        }
        i += 1;
    }
    true
}

/// Phases reachable from `start` under some finite condition sequence.
/// Iterates to a fixed point over the 7×16 edges.
pub const fn reachable_from(table: &Table, start: PhaseId) -> [bool; PhaseId::COUNT] {
    let mut seen = [false; PhaseId::COUNT];
    seen[start as usize] = true;
    let mut changed = true;
    while changed {
        changed = false;
        let mut i = 0;
        while i < PhaseId::COUNT {
            if seen[i] {
                let mut c = 0;
                while c < InputCondition::COUNT {
                    let next = table[i].transitions[c] as usize;
                    if !seen[next] {
                        seen[next] = true;
                        changed = true;
                    }
                    c += 1;
                }
            }
            i += 1;
        }
    }
    seen
}

pub const fn all_reachable(table: &Table, start: PhaseId) -> bool {
    let seen = reachable_from(table, start);
    let mut i = 0;
    while i < PhaseId::COUNT {
        if !seen[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Every check at once.
pub const fn table_is_sound(table: &Table) -> bool {
    rows_in_order(table)
        && no_conflicting_green(table)
        && one_aspect_per_road(table)
        && no_reserved_bits(table)
        && all_reachable(table, PhaseId::START)
}

const _: () = assert!(rows_in_order(&PHASE_TABLE), "phase rows out of order");
const _: () = assert!(no_conflicting_green(&PHASE_TABLE), "green shown to both roads");
const _: () = assert!(one_aspect_per_road(&PHASE_TABLE), "signal head dark or doubled");
const _: () = assert!(no_reserved_bits(&PHASE_TABLE), "pattern drives a reserved bit");
const _: () = assert!(all_reachable(&PHASE_TABLE, PhaseId::START), "orphan phase");
