//! Ballots — one member's vote choice for one action.

use crate::voter::VoterClass;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single vote choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Yes,
    No,
    Abstain,
    /// The member casts no ballot at all. A skipped ballot must be excluded
    /// from submission — the ledger itself decides how a missing vote
    /// counts, never this code.
    Skip,
}

impl Choice {
    /// Whether this choice produces a ballot on chain.
    pub fn is_cast(&self) -> bool {
        !matches!(self, Choice::Skip)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Choice::Yes => "yes",
            Choice::No => "no",
            Choice::Abstain => "abstain",
            Choice::Skip => "skip",
        };
        write!(f, "{s}")
    }
}

/// One (member, choice) pair produced by ballot assignment.
///
/// Generated fresh per action per class and consumed immediately by the
/// submitter; never persisted beyond submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub class: VoterClass,
    /// 1-based position of the member in its class's stable order.
    pub member_ix: usize,
    pub member_id: String,
    pub choice: Choice,
}
