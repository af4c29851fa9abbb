//! Structured governance-state snapshot.
//!
//! Mirrors the external node's governance-state query: pending proposals
//! with their recorded votes, the next-ratification state (including the
//! nested next-enactment state), the expired-action list, and the current
//! protocol parameters.

use govdrill_types::{ActionId, ActionPurpose, ActionTag, Choice, Coin};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One pending proposal as reported by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalEntry {
    pub action_id: ActionId,
    pub tag: ActionTag,
    pub deposit: Coin,
    pub return_stake_vkey: String,
    pub prev_action: Option<ActionId>,
    /// Epoch the proposal landed in.
    pub proposed_in: u64,
    /// Last epoch the action can still be ratified in.
    pub expires_after: u64,
    /// Action payload, opaque to the harness.
    pub contents: serde_json::Value,
    /// Recorded votes, keyed by voter id. Latest vote wins on the ledger,
    /// so each voter appears at most once.
    pub committee_votes: BTreeMap<String, Choice>,
    pub drep_votes: BTreeMap<String, Choice>,
    pub pool_votes: BTreeMap<String, Choice>,
}

impl ProposalEntry {
    /// Recorded votes of one class.
    pub fn votes_of(&self, class: govdrill_types::VoterClass) -> &BTreeMap<String, Choice> {
        match class {
            govdrill_types::VoterClass::Committee => &self.committee_votes,
            govdrill_types::VoterClass::Drep => &self.drep_votes,
            govdrill_types::VoterClass::Spo => &self.pool_votes,
        }
    }
}

/// An action removed from the pending set because its lifetime elapsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiredAction {
    pub action_id: ActionId,
    /// The `expires_after` the ledger recorded for the action.
    pub expired_after: u64,
}

/// The state that will be enacted at the next epoch boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnactState {
    /// Current holder of each previous-action linkage slot.
    pub prev_actions: BTreeMap<ActionPurpose, ActionId>,
    /// Protocol parameters after enactment.
    pub params: serde_json::Value,
}

/// The ledger's pending ratification decision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextRatifyState {
    /// Actions ratified this epoch; enacted one epoch later.
    pub ratified: Vec<ActionId>,
    /// Actions removed this epoch because they expired.
    pub expired: Vec<ExpiredAction>,
    pub next_enact: EnactState,
    pub ratification_delayed: bool,
}

/// Full governance-state snapshot at one point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovSnapshot {
    pub epoch: u64,
    pub proposals: Vec<ProposalEntry>,
    pub next_ratify: NextRatifyState,
    pub current_params: serde_json::Value,
    pub treasury: Coin,
}
