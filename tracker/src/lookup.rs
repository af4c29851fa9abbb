//! Snapshot lookups keyed by action identity.

use govdrill_client::{GovSnapshot, ProposalEntry};
use govdrill_types::{ActionId, ActionPurpose};

/// The pending proposal for an action, while it awaits a ratification
/// decision.
pub fn lookup_proposal<'a>(snapshot: &'a GovSnapshot, action: &ActionId) -> Option<&'a ProposalEntry> {
    snapshot.proposals.iter().find(|p| &p.action_id == action)
}

/// Whether the next-ratification state records the action as approved.
///
/// A ratified action is not yet enacted — the state mutation happens one
/// epoch boundary later.
pub fn lookup_ratified(snapshot: &GovSnapshot, action: &ActionId) -> bool {
    snapshot.next_ratify.ratified.iter().any(|a| a == action)
}

/// Whether the action's lifetime elapsed without ratification.
pub fn lookup_expired(snapshot: &GovSnapshot, action: &ActionId) -> bool {
    snapshot
        .next_ratify
        .expired
        .iter()
        .any(|e| &e.action_id == action)
}

/// Current holder of a previous-action linkage slot.
pub fn prev_action(snapshot: &GovSnapshot, purpose: ActionPurpose) -> Option<ActionId> {
    snapshot
        .next_ratify
        .next_enact
        .prev_actions
        .get(&purpose)
        .cloned()
}
