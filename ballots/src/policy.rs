//! Named threshold policies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How many members of a voter class should vote Yes.
///
/// A pure function of class size; the policies carry no state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThresholdPolicy {
    /// Strictly more than half, with a safety margin of two. Approves
    /// regardless of parity.
    Majority,
    /// The smallest majority-achieving split. Lets two competing actions
    /// tie (even class size) or nearly tie (odd).
    EqualSplit,
    /// Fewer than the simple majority by a margin of two. Never approves.
    Insufficient,
}

impl ThresholdPolicy {
    /// The number of Yes ballots this policy assigns for a class of
    /// `class_size` members.
    ///
    /// `Insufficient` clamps at zero for tiny classes: everyone votes No.
    /// `Majority` can exceed `class_size` for tiny classes; assignment
    /// simply marks every member Yes in that case.
    pub fn required_yes_count(&self, class_size: usize) -> usize {
        match self {
            ThresholdPolicy::Majority => class_size / 2 + 2,
            ThresholdPolicy::EqualSplit => (class_size + 1) / 2,
            ThresholdPolicy::Insufficient => (class_size / 2).saturating_sub(2),
        }
    }

    /// Whether this policy's assigned Yes votes clear a simple majority of
    /// a `class_size` class when every ballot is cast.
    ///
    /// This is the prediction side of the tally rule `yes * 2 > class_size`;
    /// parity matters: `EqualSplit` clears odd-sized classes and ties even
    /// ones. Empty classes clear vacuously, matching ledger auto-approval.
    pub fn clears(&self, class_size: usize) -> bool {
        if class_size == 0 {
            return true;
        }
        self.required_yes_count(class_size).min(class_size) * 2 > class_size
    }
}

impl fmt::Display for ThresholdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ThresholdPolicy::Majority => "majority",
            ThresholdPolicy::EqualSplit => "equal",
            ThresholdPolicy::Insufficient => "insufficient",
        };
        write!(f, "{s}")
    }
}
