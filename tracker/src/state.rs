//! Lifecycle classification from a single snapshot.

use crate::lookup::{lookup_expired, lookup_proposal, lookup_ratified, prev_action};
use govdrill_client::GovSnapshot;
use govdrill_types::{ActionId, ActionPurpose, LifecycleState};

/// Classify where an action stands, given one governance-state snapshot.
///
/// `purpose` is the action's linkage slot; enactment is detected by the
/// slot's previous-action pointer recording the action. Actions without a
/// slot (treasury withdrawals, info) report `NotFound` once the ledger
/// drops them — their enactment is observable only through side effects
/// (reward balances), which the scenario driver checks separately.
pub fn classify(
    snapshot: &GovSnapshot,
    action: &ActionId,
    purpose: Option<ActionPurpose>,
) -> LifecycleState {
    if lookup_ratified(snapshot, action) {
        return LifecycleState::Ratified;
    }
    if lookup_expired(snapshot, action) {
        return LifecycleState::Expired;
    }
    if lookup_proposal(snapshot, action).is_some() {
        return LifecycleState::Proposed;
    }
    if let Some(purpose) = purpose {
        if prev_action(snapshot, purpose).as_ref() == Some(action) {
            return LifecycleState::Enacted;
        }
    }
    LifecycleState::NotFound
}
