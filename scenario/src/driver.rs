//! Scenario operations — propose, vote, and verify lifecycle outcomes.
//!
//! Every operation queries the chain back after acting and asserts the
//! observable result, so a scenario failure points at the first divergence
//! rather than at a downstream symptom.

use crate::context::ScenarioContext;
use crate::error::ScenarioError;
use govdrill_ballots::{
    assign, assign_for_policy, FixedThreshold, NoAbstainProbe, SkipEveryThird, ThresholdPolicy,
    VoteStrategy, YesAbstainProbe,
};
use govdrill_client::{Certificate, ChainClient, ProposalFile, TxHandle, VoteFile};
use govdrill_submit::{
    submit_certificates, submit_proposals, submit_votes, DEFAULT_CERT_CHUNK, DEFAULT_VOTE_CHUNK,
};
use govdrill_tracker::{
    classify, lookup_proposal, lookup_ratified, poll_until, prev_action, single_removal_anomaly,
    PollOpts,
};
use govdrill_types::{
    ActionId, ActionPurpose, ActionTag, Ballot, Coin, LifecycleState, PoolUser, SigningKey,
    VoterClass,
};

const ANCHOR_DATA_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// One batch of proposals submitted together in a single transaction.
pub struct ProposalRound {
    pub txid: String,
    /// Action identities in intra-transaction index order.
    pub actions: Vec<ActionId>,
    /// The linkage pointer every proposal in the round was anchored to.
    pub prev_action: Option<ActionId>,
    /// Per-action deposit at submission time.
    pub deposit: Coin,
}

/// Outcome of a full ratification race.
pub struct RaceOutcome {
    pub round: ProposalRound,
    /// Actions of the round that ratified, in ledger order.
    pub ratified: Vec<ActionId>,
    /// The action that won the linkage slot, if any policy approved.
    pub enacted: Option<ActionId>,
}

/// Propose `count` parameter-change actions in one transaction, all
/// anchored to the current previous-action pointer and all carrying the
/// same `updates` payload.
///
/// Deposit refunds are routed to `ctx.proposers` in order, one user per
/// action. Verifies afterwards that every action is visible in the
/// governance state with the right tag.
pub fn propose_param_updates(
    ctx: &ScenarioContext,
    client: &dyn ChainClient,
    updates: &serde_json::Value,
    count: usize,
) -> Result<ProposalRound, ScenarioError> {
    if ctx.proposers.len() < count {
        return Err(ScenarioError::assertion(format!(
            "{count} actions need {count} deposit-return users, context has {}",
            ctx.proposers.len()
        )));
    }

    let prev = prev_action(&client.gov_snapshot(), ActionPurpose::ParamUpdate);
    let deposit = client.action_deposit();

    let proposals: Vec<ProposalFile> = ctx.proposers[..count]
        .iter()
        .enumerate()
        .map(|(ix, proposer)| ProposalFile {
            name: format!("{}_pparams_{ix}", ctx.name),
            tag: ActionTag::ParameterChange,
            deposit,
            return_stake_vkey: proposer.stake_vkey.clone(),
            prev_action: prev.clone(),
            contents: updates.clone(),
        })
        .collect();
    let keys: Vec<SigningKey> = ctx.proposers[..count]
        .iter()
        .map(|p| p.payment_skey.clone())
        .collect();

    let handle = submit_proposals(
        client,
        &ctx.payer.payment,
        &ctx.payer.payment_skey,
        &proposals,
        &keys,
    )?;
    let actions: Vec<ActionId> = (0..count as u32)
        .map(|ix| ActionId::new(handle.txid.clone(), ix))
        .collect();

    let snapshot = client.gov_snapshot();
    ctx.save_gov_state(&format!("action_{}", snapshot.epoch), &snapshot);
    for action in &actions {
        let entry = lookup_proposal(&snapshot, action).ok_or_else(|| {
            ScenarioError::assertion(format!("proposed action {action} not in governance state"))
        })?;
        if entry.tag != ActionTag::ParameterChange {
            return Err(ScenarioError::assertion(format!(
                "action {action} recorded as {}, expected ParameterChange",
                entry.tag
            )));
        }
    }

    tracing::info!(
        scenario = %ctx.name,
        txid = %handle.txid,
        actions = count,
        prev = ?prev,
        "proposed parameter updates"
    );
    Ok(ProposalRound {
        txid: handle.txid,
        actions,
        prev_action: prev,
        deposit,
    })
}

/// Vote on one action under a named threshold policy, one ballot per
/// member of each class in `classes`.
///
/// Returns the number of ballots actually cast.
pub fn cast_policy_votes(
    ctx: &ScenarioContext,
    client: &dyn ChainClient,
    action: &ActionId,
    policy: ThresholdPolicy,
    classes: &[VoterClass],
) -> Result<usize, ScenarioError> {
    let per_class: Vec<(VoterClass, Vec<Ballot>)> = classes
        .iter()
        .map(|&class| {
            (
                class,
                assign_for_policy(class, ctx.roster.members(class), policy),
            )
        })
        .collect();
    tracing::info!(scenario = %ctx.name, %action, %policy, "casting policy votes");
    submit_ballots(ctx, client, action, &per_class)
}

/// Vote on one action with the abstain-probe distribution: approving or
/// disapproving mix, optionally skipping every third member entirely.
pub fn cast_probe_votes(
    ctx: &ScenarioContext,
    client: &dyn ChainClient,
    action: &ActionId,
    approve: bool,
    with_skips: bool,
    classes: &[VoterClass],
) -> Result<usize, ScenarioError> {
    let strategy: Box<dyn VoteStrategy> = match (approve, with_skips) {
        (true, false) => Box::new(YesAbstainProbe),
        (false, false) => Box::new(NoAbstainProbe),
        (true, true) => Box::new(SkipEveryThird(YesAbstainProbe)),
        (false, true) => Box::new(SkipEveryThird(NoAbstainProbe)),
    };
    let per_class: Vec<(VoterClass, Vec<Ballot>)> = classes
        .iter()
        .map(|&class| (class, assign(class, ctx.roster.members(class), &*strategy)))
        .collect();
    tracing::info!(
        scenario = %ctx.name,
        %action,
        approve,
        with_skips,
        "casting probe votes"
    );
    submit_ballots(ctx, client, action, &per_class)
}

/// Attempt an all-Yes vote from `class` and require the ledger to reject
/// it with a reason containing `reason_fragment`.
///
/// The rejection is the expected outcome; an accepted vote or a different
/// reason is the failure.
pub fn expect_vote_rejected(
    ctx: &ScenarioContext,
    client: &dyn ChainClient,
    action: &ActionId,
    class: VoterClass,
    reason_fragment: &str,
) -> Result<(), ScenarioError> {
    let members = ctx.roster.members(class);
    let ballots = assign(class, members, &FixedThreshold::new(members.len()));
    match submit_ballots(ctx, client, action, &[(class, ballots)]) {
        Err(ScenarioError::PolicyViolation { reason }) if reason.contains(reason_fragment) => {
            tracing::info!(scenario = %ctx.name, %action, %reason, "vote rejected as expected");
            Ok(())
        }
        Err(ScenarioError::PolicyViolation { reason }) => Err(ScenarioError::assertion(format!(
            "vote on {action} rejected with {reason:?}, expected {reason_fragment:?}"
        ))),
        Ok(_) => Err(ScenarioError::assertion(format!(
            "vote on {action} by {class} was accepted, expected rejection"
        ))),
        Err(e) => Err(e),
    }
}

/// Register the stake addresses of `users` in bulk, `chunk_size`
/// certificates per transaction (0 = one transaction for the whole batch).
pub fn register_stake_users(
    ctx: &ScenarioContext,
    client: &dyn ChainClient,
    users: &[PoolUser],
    chunk_size: usize,
) -> Result<Vec<TxHandle>, ScenarioError> {
    let deposit = client.stake_address_deposit();
    let certs: Vec<Certificate> = users
        .iter()
        .map(|u| Certificate::StakeRegistration {
            stake_vkey: u.stake_vkey.clone(),
            deposit,
        })
        .collect();
    let keys: Vec<SigningKey> = users.iter().map(|u| u.stake_skey.clone()).collect();

    let handles = submit_certificates(
        client,
        &ctx.payer.payment,
        &ctx.payer.payment_skey,
        &certs,
        &keys,
        chunk_size,
        deposit,
    )?;
    tracing::info!(
        scenario = %ctx.name,
        users = users.len(),
        transactions = handles.len(),
        "registered stake users"
    );
    Ok(handles)
}

/// Submit resignation certificates for the whole committee roster.
pub fn resign_committee(
    ctx: &ScenarioContext,
    client: &dyn ChainClient,
    metadata_url: &str,
) -> Result<Vec<TxHandle>, ScenarioError> {
    let certs: Vec<Certificate> = ctx
        .roster
        .committee
        .iter()
        .map(|m| Certificate::CommitteeResignation {
            cold_vkey: format!("{}_cold.vkey", m.id),
            metadata_url: metadata_url.to_owned(),
        })
        .collect();
    let keys = ctx.roster.signing_keys(VoterClass::Committee);

    let handles = submit_certificates(
        client,
        &ctx.payer.payment,
        &ctx.payer.payment_skey,
        &certs,
        &keys,
        DEFAULT_CERT_CHUNK,
        Coin::ZERO,
    )?;
    tracing::info!(
        scenario = %ctx.name,
        members = certs.len(),
        "submitted committee resignations"
    );
    Ok(handles)
}

/// Propose a single treasury withdrawal paying `amount` into `recipient`'s
/// reward account. Withdrawals are unchained; no pointer is involved.
pub fn propose_treasury_withdrawal(
    ctx: &ScenarioContext,
    client: &dyn ChainClient,
    recipient: &PoolUser,
    amount: Coin,
) -> Result<ActionId, ScenarioError> {
    let proposal = ProposalFile {
        name: format!("{}_withdrawal", ctx.name),
        tag: ActionTag::TreasuryWithdrawals,
        deposit: client.action_deposit(),
        return_stake_vkey: ctx.payer.stake_vkey.clone(),
        prev_action: None,
        contents: serde_json::json!({
            "withdrawals": [
                { "stake_vkey": recipient.stake_vkey, "amount": amount.value() }
            ]
        }),
    };

    let handle = submit_proposals(
        client,
        &ctx.payer.payment,
        &ctx.payer.payment_skey,
        &[proposal],
        &[ctx.payer.payment_skey.clone()],
    )?;
    let action = ActionId::new(handle.txid, 0);

    let snapshot = client.gov_snapshot();
    let entry = lookup_proposal(&snapshot, &action).ok_or_else(|| {
        ScenarioError::assertion(format!("withdrawal action {action} not in governance state"))
    })?;
    if entry.tag != ActionTag::TreasuryWithdrawals {
        return Err(ScenarioError::assertion(format!(
            "action {action} recorded as {}, expected TreasuryWithdrawals",
            entry.tag
        )));
    }

    tracing::info!(scenario = %ctx.name, %action, %amount, "proposed treasury withdrawal");
    Ok(action)
}

/// Run a full ratification race: propose one action per policy in a single
/// transaction, vote each action under its policy, then walk the next two
/// epoch boundaries asserting the lifecycle outcome.
///
/// The first action whose assigned Yes votes clear the majority of every
/// voting class is expected to ratify at the first boundary and claim the
/// linkage slot at the second; every sibling must stay un-ratified. If no
/// action's votes clear every class, the round is walked until
/// every action expired, the pointer is asserted unchanged, and every
/// deposit must come back.
pub fn run_ratification_race(
    ctx: &ScenarioContext,
    client: &dyn ChainClient,
    policies: &[ThresholdPolicy],
    updates: &serde_json::Value,
) -> Result<RaceOutcome, ScenarioError> {
    let round = propose_param_updates(ctx, client, updates, policies.len())?;
    let rewards_before: Vec<Coin> = ctx.proposers[..policies.len()]
        .iter()
        .map(|p| client.reward_balance(&p.stake))
        .collect();

    for (ix, &policy) in policies.iter().enumerate() {
        cast_policy_votes(ctx, client, &round.actions[ix], policy, &VoterClass::ALL)?;
    }
    let approve_epoch = client.epoch();

    // Ratification decision lands at the boundary after voting.
    let epoch = client.wait_for_new_epoch(ctx.epoch_padding);
    let rat_snapshot = client.gov_snapshot();
    ctx.save_gov_state(&format!("rat_{epoch}"), &rat_snapshot);

    // The winner is the first action, in submission order, whose assigned
    // Yes votes clear the tally rule in every voting class — a property of
    // the yes-count against the class sizes, not of the policy's name.
    let winner = policies.iter().position(|p| {
        VoterClass::ALL
            .iter()
            .all(|&class| p.clears(ctx.roster.class_size(class)))
    });
    let mut ratified_actions = Vec::new();
    for (ix, action) in round.actions.iter().enumerate() {
        let ratified = lookup_ratified(&rat_snapshot, action);
        if ratified {
            ratified_actions.push(action.clone());
        }
        match winner {
            Some(win) if win == ix => {
                if !ratified {
                    return Err(ScenarioError::assertion(format!(
                        "action {action} voted {} did not ratify in epoch {epoch}",
                        policies[ix]
                    )));
                }
            }
            _ => {
                if ratified {
                    return Err(ScenarioError::assertion(format!(
                        "action {action} voted {} ratified unexpectedly",
                        policies[ix]
                    )));
                }
            }
        }
    }
    if rat_snapshot.next_ratify.ratification_delayed {
        return Err(ScenarioError::assertion(
            "ratification delayed by an unrelated pending action",
        ));
    }

    // Enactment lands one boundary later.
    let epoch = client.wait_for_new_epoch(ctx.epoch_padding);
    if epoch != approve_epoch + 2 {
        return Err(ScenarioError::assertion(format!(
            "expected epoch {} after two boundaries, chain reports {epoch}",
            approve_epoch + 2
        )));
    }
    let enact_snapshot = client.gov_snapshot();
    ctx.save_gov_state(&format!("enact_{epoch}"), &enact_snapshot);

    match winner {
        Some(win) => {
            let action = &round.actions[win];
            let pointer = prev_action(&enact_snapshot, ActionPurpose::ParamUpdate);
            if pointer.as_ref() != Some(action) {
                return Err(ScenarioError::assertion(format!(
                    "linkage slot holds {pointer:?} after enactment, expected {action}"
                )));
            }
            let state = classify(&enact_snapshot, action, Some(ActionPurpose::ParamUpdate));
            if state != LifecycleState::Enacted {
                return Err(ScenarioError::assertion(format!(
                    "action {action} classified {state:?}, expected Enacted"
                )));
            }
            expect_refund(ctx, client, win, rewards_before[win], round.deposit)?;

            // A decided action is gone; further votes must bounce.
            expect_vote_rejected(ctx, client, action, VoterClass::Drep, "GovActionsDoNotExist")?;

            tracing::info!(scenario = %ctx.name, %action, epoch, "race winner enacted");
            let enacted = Some(action.clone());
            Ok(RaceOutcome {
                round,
                ratified: ratified_actions,
                enacted,
            })
        }
        None => {
            let pointer = prev_action(&enact_snapshot, ActionPurpose::ParamUpdate);
            if pointer != round.prev_action {
                return Err(ScenarioError::assertion(format!(
                    "linkage slot moved to {pointer:?} with no approving policy"
                )));
            }

            // Walk boundaries until every action ran out of lifetime and
            // was pruned, tolerating the known one-removal-per-epoch
            // ledger defect.
            let final_snapshot = run_poll(ctx.poll, || {
                let snapshot = client.gov_snapshot();
                let all_removed = round
                    .actions
                    .iter()
                    .all(|a| lookup_proposal(&snapshot, a).is_none());
                if all_removed {
                    return Ok(Some(snapshot));
                }
                if single_removal_anomaly(&snapshot, snapshot.epoch) {
                    tracing::warn!(
                        scenario = %ctx.name,
                        epoch = snapshot.epoch,
                        "single-removal ledger defect observed, continuing"
                    );
                }
                client.wait_for_new_epoch(ctx.epoch_padding);
                Ok(None)
            })?;
            ctx.save_gov_state(&format!("expire_{}", final_snapshot.epoch), &final_snapshot);

            for (ix, action) in round.actions.iter().enumerate() {
                let state = classify(&final_snapshot, action, Some(ActionPurpose::ParamUpdate));
                if !matches!(state, LifecycleState::Expired | LifecycleState::NotFound) {
                    return Err(ScenarioError::assertion(format!(
                        "action {action} classified {state:?} after its lifetime elapsed"
                    )));
                }
                expect_refund(ctx, client, ix, rewards_before[ix], round.deposit)?;
            }

            tracing::info!(
                scenario = %ctx.name,
                epoch = final_snapshot.epoch,
                actions = round.actions.len(),
                "race expired with all deposits refunded"
            );
            Ok(RaceOutcome {
                round,
                ratified: ratified_actions,
                enacted: None,
            })
        }
    }
}

/// Build vote files from the cast ballots, submit them in chunks, and
/// verify every cast ballot is recorded in the governance state.
fn submit_ballots(
    ctx: &ScenarioContext,
    client: &dyn ChainClient,
    action: &ActionId,
    per_class: &[(VoterClass, Vec<Ballot>)],
) -> Result<usize, ScenarioError> {
    let mut votes = Vec::new();
    let mut keys = Vec::new();
    for (class, ballots) in per_class {
        keys.extend(ctx.roster.signing_keys(*class));
        votes.extend(ballots.iter().filter(|b| b.choice.is_cast()).map(|b| {
            VoteFile {
                name: format!("{}_{action}_{}{}", ctx.name, class.label(), b.member_ix),
                action: action.clone(),
                class: *class,
                voter_id: b.member_id.clone(),
                choice: b.choice,
                anchor_url: format!("http://www.{}-vote{}.com", class.label(), b.member_ix),
                anchor_data_hash: ANCHOR_DATA_HASH.to_owned(),
            }
        }));
    }

    submit_votes(
        client,
        &ctx.payer.payment,
        &ctx.payer.payment_skey,
        &votes,
        &keys,
        DEFAULT_VOTE_CHUNK,
    )?;

    let snapshot = client.gov_snapshot();
    let entry = lookup_proposal(&snapshot, action).ok_or_else(|| {
        ScenarioError::assertion(format!("action {action} vanished after voting"))
    })?;
    for vote in &votes {
        let recorded = entry.votes_of(vote.class).get(&vote.voter_id).copied();
        if recorded != Some(vote.choice) {
            return Err(ScenarioError::assertion(format!(
                "{} vote by {} on {action} recorded as {recorded:?}, expected {}",
                vote.class, vote.voter_id, vote.choice
            )));
        }
    }
    ctx.save_gov_state(&format!("vote_{}", snapshot.epoch), &snapshot);

    Ok(votes.len())
}

fn expect_refund(
    ctx: &ScenarioContext,
    client: &dyn ChainClient,
    proposer_ix: usize,
    before: Coin,
    deposit: Coin,
) -> Result<(), ScenarioError> {
    let proposer = &ctx.proposers[proposer_ix];
    let actual = client.reward_balance(&proposer.stake);
    if actual != before + deposit {
        return Err(ScenarioError::assertion(format!(
            "deposit refund missing for {}: reward balance {actual}, expected {}",
            proposer.name,
            before + deposit
        )));
    }
    Ok(())
}

fn run_poll<T>(
    opts: PollOpts,
    f: impl FnMut() -> Result<Option<T>, ScenarioError>,
) -> Result<T, ScenarioError> {
    poll_until(opts, f).map_err(ScenarioError::from)
}
