//! The intersection's timing policy, as data.
//!
//! ```text
//!  main cycle:   SECONDARY_GO ─▶ SECONDARY_WAIT ─▶ PRIMARY_GO ─▶ PRIMARY_WAIT ─▶ SECONDARY_GO
//!
//!  walk requests:
//!    SECONDARY_GO ┐
//!  SECONDARY_WAIT ├──▶ PRIMARY_WALK ──[any]──▶ SECONDARY_GO_SHORT ──▶ SECONDARY_GO | SECONDARY_WAIT
//!      PRIMARY_GO │
//!    PRIMARY_WAIT ┘
//!    PRIMARY_WAIT ───▶ SECONDARY_WALK ──▶ SECONDARY_GO | PRIMARY_GO
//! ```
//!
//! Every row is literal: patterns, dwell times and all sixteen successors.
//! Rows are checked at compile time by [`crate::safety`].

use super::{Phase, PhaseId};

const SG: PhaseId = PhaseId::SecondaryGo;
const SWT: PhaseId = PhaseId::SecondaryWait;
const PG: PhaseId = PhaseId::PrimaryGo;
const PWT: PhaseId = PhaseId::PrimaryWait;
const SWK: PhaseId = PhaseId::SecondaryWalk;
const PWK: PhaseId = PhaseId::PrimaryWalk;
const SGS: PhaseId = PhaseId::SecondaryGoShort;

/// One row per [`PhaseId`], in discriminant order.
#[rustfmt::skip]
pub const PHASE_TABLE: [Phase; PhaseId::COUNT] = [
    //                                                 condition:  0    1    2    3    4    5    6    7    8    9    A    B    C    D    E    F
    Phase { id: SG,  name: "SecondaryGo",      dwell_secs: 7, chan_a: 0x10, chan_b: 0x02, transitions: [SG,  PWK, SWT, SWT, SWT, PWK, SWT, SWT, SG,  PWK, SWT, SWT, SWT, PWK, SWT, SWT] },
    Phase { id: SWT, name: "SecondaryWait",    dwell_secs: 2, chan_a: 0x10, chan_b: 0x04, transitions: [PG,  PG,  PWK, PWK, PG,  PG,  PWK, PWK, PG,  PG,  PWK, PWK, PG,  PG,  PG,  PWK] },
    Phase { id: PG,  name: "PrimaryGo",        dwell_secs: 7, chan_a: 0x04, chan_b: 0x08, transitions: [PWT, PWT, PWT, PWT, PWK, PWT, PWT, PWT, PWT, PWT, PWT, PWT, PWT, PWT, PWT, PWT] },
    Phase { id: PWT, name: "PrimaryWait",      dwell_secs: 2, chan_a: 0x08, chan_b: 0x08, transitions: [SG,  PWK, SWK, SWK, SG,  PWK, SWK, SWK, SG,  PWK, SWK, SG,  SG,  PWK, SWK, PWK] },
    Phase { id: SWK, name: "SecondaryWalk",    dwell_secs: 4, chan_a: 0x10, chan_b: 0x38, transitions: [SG,  SG,  SG,  SG,  PG,  PG,  PG,  PG,  SG,  SG,  SG,  SG,  SG,  PG,  SG,  PG ] },
    Phase { id: PWK, name: "PrimaryWalk",      dwell_secs: 4, chan_a: 0x10, chan_b: 0x12, transitions: [SGS, SGS, SGS, SGS, SGS, SGS, SGS, SGS, SGS, SGS, SGS, SGS, SGS, SGS, SGS, SGS] },
    Phase { id: SGS, name: "SecondaryGoShort", dwell_secs: 3, chan_a: 0x10, chan_b: 0x02, transitions: [SG,  SWT, SWT, SWT, SWT, SWT, SWT, SWT, SG,  SG,  SWT, SWT, SWT, SWT, SWT, SWT] },
];
