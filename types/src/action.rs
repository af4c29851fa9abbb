//! Governance-action identity and lifecycle types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a governance action: the transaction that proposed it plus
/// the action's index within that transaction.
///
/// Produced once the proposal transaction is accepted; immutable afterward,
/// and the key for every subsequent lifecycle query.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId {
    pub txid: String,
    pub ix: u32,
}

impl ActionId {
    pub fn new(txid: impl Into<String>, ix: u32) -> Self {
        Self {
            txid: txid.into(),
            ix,
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.txid, self.ix)
    }
}

/// The kind of ledger-level change a governance action proposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionTag {
    ParameterChange,
    NewConstitution,
    TreasuryWithdrawals,
    NoConfidence,
    UpdateCommittee,
    HardForkInitiation,
    InfoAction,
}

impl ActionTag {
    /// The previous-action linkage slot this action competes for, if any.
    ///
    /// Treasury withdrawals and info actions are not chained: any number of
    /// them can be enacted without updating a pointer.
    pub fn purpose(&self) -> Option<ActionPurpose> {
        match self {
            ActionTag::ParameterChange => Some(ActionPurpose::ParamUpdate),
            ActionTag::NewConstitution => Some(ActionPurpose::Constitution),
            ActionTag::NoConfidence | ActionTag::UpdateCommittee => {
                Some(ActionPurpose::Committee)
            }
            ActionTag::HardForkInitiation => Some(ActionPurpose::HardFork),
            ActionTag::TreasuryWithdrawals | ActionTag::InfoAction => None,
        }
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionTag::ParameterChange => "ParameterChange",
            ActionTag::NewConstitution => "NewConstitution",
            ActionTag::TreasuryWithdrawals => "TreasuryWithdrawals",
            ActionTag::NoConfidence => "NoConfidence",
            ActionTag::UpdateCommittee => "UpdateCommittee",
            ActionTag::HardForkInitiation => "HardForkInitiation",
            ActionTag::InfoAction => "InfoAction",
        };
        write!(f, "{s}")
    }
}

/// Previous-action pointer groups. Exactly one enacted action can hold each
/// slot at a time; a new action must name the current holder as its
/// predecessor to be ratifiable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionPurpose {
    ParamUpdate,
    Constitution,
    Committee,
    HardFork,
}

/// Where an action currently stands in its lifecycle.
///
/// Transitions are driven entirely by the external ledger; the harness only
/// samples state snapshots and classifies them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Not visible anywhere in the governance state.
    NotFound,
    /// Pending a ratification decision.
    Proposed,
    /// Approved; state mutation happens one epoch later.
    Ratified,
    /// The action's effect has been applied.
    Enacted,
    /// Lifetime elapsed without ratification.
    Expired,
}
