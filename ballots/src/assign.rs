//! Ballot assignment — turn a strategy into concrete per-member ballots.

use crate::policy::ThresholdPolicy;
use crate::strategy::{FixedThreshold, VoteStrategy};
use govdrill_types::{Ballot, VoterClass, VoterMember};

/// Assign one ballot per member, in stable member order.
///
/// Deterministic and idempotent: identical inputs yield identical ballot
/// sequences. Skipped members still appear in the output (with
/// [`Choice::Skip`](govdrill_types::Choice)); filtering happens at
/// submission time.
pub fn assign(
    class: VoterClass,
    members: &[VoterMember],
    strategy: &dyn VoteStrategy,
) -> Vec<Ballot> {
    let total = members.len();
    members
        .iter()
        .enumerate()
        .map(|(i, member)| {
            let member_ix = i + 1;
            Ballot {
                class,
                member_ix,
                member_id: member.id.clone(),
                choice: strategy.classify(member_ix, total),
            }
        })
        .collect()
}

/// Assign ballots under a named threshold policy: the policy's yes-count is
/// evaluated against the class size and the first `yes_count` members vote
/// Yes, the remainder No.
pub fn assign_for_policy(
    class: VoterClass,
    members: &[VoterMember],
    policy: ThresholdPolicy,
) -> Vec<Ballot> {
    let yes_count = policy.required_yes_count(members.len());
    assign(class, members, &FixedThreshold::new(yes_count))
}
