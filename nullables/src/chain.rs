//! In-memory ledger implementing `ChainClient`.
//!
//! Models just enough governance behavior to drive the lifecycle scenarios:
//! deposits and fees, per-class vote tallies, ratification one epoch after
//! voting, enactment one epoch after ratification, expiry, deposit refunds
//! to the return stake key's reward account, and the first-committed-wins
//! rule for actions competing for the same linkage slot.

use govdrill_client::{
    Certificate, ChainClient, ClientError, EnactState, ExpiredAction, GovSnapshot,
    NextRatifyState, ProposalEntry, ProposalFile, TxFiles, TxHandle, UtxoEntry, VoteFile,
};
use govdrill_types::{
    ActionId, ActionPurpose, ActionTag, Address, Choice, Coin, PoolUser, VoterClass, VoterRoster,
};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Knobs for the null ledger.
#[derive(Clone, Debug)]
pub struct NullChainConfig {
    pub fee: Coin,
    pub action_deposit: Coin,
    pub stake_address_deposit: Coin,
    /// Epochs an action stays ratifiable after the epoch it was proposed in.
    pub action_lifetime: u64,
    /// Maximum payload items per transaction; `None` disables the limit.
    pub tx_item_limit: Option<usize>,
    pub treasury: Coin,
    /// Emulate the known ledger defect: prune at most one expired action
    /// per epoch.
    pub single_removal_bug: bool,
}

impl Default for NullChainConfig {
    fn default() -> Self {
        Self {
            fee: Coin::new(200_000),
            action_deposit: Coin::new(100_000_000),
            stake_address_deposit: Coin::new(2_000_000),
            action_lifetime: 3,
            tx_item_limit: None,
            treasury: Coin::new(10_000_000_000),
            single_removal_bug: false,
        }
    }
}

#[derive(Default)]
struct LedgerState {
    epoch: u64,
    tx_counter: u64,
    balances: HashMap<Address, Coin>,
    /// Reward-account balances keyed by stake address.
    rewards: HashMap<Address, Coin>,
    /// Registered stake verification keys, mapped to their stake address
    /// (deposit refunds are credited there).
    stake_keys: HashMap<String, Address>,
    /// Pending proposals in submission order.
    pending: Vec<ProposalEntry>,
    next_ratify: NextRatifyState,
    params: serde_json::Value,
    treasury: Coin,
}

/// Deterministic in-memory chain. Single-threaded; epochs advance only via
/// [`ChainClient::wait_for_new_epoch`].
pub struct NullChain {
    config: NullChainConfig,
    roster: VoterRoster,
    state: RefCell<LedgerState>,
}

impl NullChain {
    pub fn new(config: NullChainConfig, roster: VoterRoster) -> Self {
        let state = LedgerState {
            treasury: config.treasury,
            params: serde_json::json!({
                "maxTxSize": 16384,
                "govActionLifetime": config.action_lifetime,
            }),
            ..LedgerState::default()
        };
        Self {
            config,
            roster,
            state: RefCell::new(state),
        }
    }

    /// Credit an address with spendable funds.
    pub fn fund(&self, address: &Address, amount: Coin) {
        let mut state = self.state.borrow_mut();
        *state.balances.entry(address.clone()).or_default() += amount;
    }

    /// Fund a user and register its stake key so deposit refunds and
    /// withdrawals can reach its reward account.
    pub fn register_user(&self, user: &PoolUser, funds: Coin) {
        self.fund(&user.payment, funds);
        let mut state = self.state.borrow_mut();
        state
            .stake_keys
            .insert(user.stake_vkey.clone(), user.stake.clone());
        state.rewards.entry(user.stake.clone()).or_default();
    }

    fn next_txid(state: &mut LedgerState) -> String {
        state.tx_counter += 1;
        format!("{:08x}", state.tx_counter)
    }

    fn accept_proposal(
        &self,
        state: &mut LedgerState,
        txid: &str,
        ix: u32,
        proposal: &ProposalFile,
    ) {
        state.pending.push(ProposalEntry {
            action_id: ActionId::new(txid, ix),
            tag: proposal.tag,
            deposit: proposal.deposit,
            return_stake_vkey: proposal.return_stake_vkey.clone(),
            prev_action: proposal.prev_action.clone(),
            proposed_in: state.epoch,
            expires_after: state.epoch + self.config.action_lifetime,
            contents: proposal.contents.clone(),
            committee_votes: BTreeMap::new(),
            drep_votes: BTreeMap::new(),
            pool_votes: BTreeMap::new(),
        });
    }

    fn validate_vote(state: &LedgerState, vote: &VoteFile) -> Result<(), ClientError> {
        if vote.choice == Choice::Skip {
            return Err(ClientError::Rejected {
                reason: format!("skipped ballot submitted for {}", vote.action),
            });
        }
        let entry = state
            .pending
            .iter()
            .find(|p| p.action_id == vote.action)
            .ok_or_else(|| ClientError::Rejected {
                reason: format!(
                    "ConwayGovFailure (GovActionsDoNotExist [{}])",
                    vote.action
                ),
            })?;

        if !entitled_classes(entry.tag).contains(&vote.class) {
            let voter = match vote.class {
                VoterClass::Spo => "StakePoolVoter",
                VoterClass::Committee => "CommitteeVoter",
                VoterClass::Drep => "DRepVoter",
            };
            return Err(ClientError::Rejected {
                reason: format!(
                    "ConwayGovFailure (DisallowedVoters [({voter}, {})])",
                    vote.action
                ),
            });
        }
        Ok(())
    }

    fn record_vote(state: &mut LedgerState, vote: &VoteFile) {
        let Some(entry) = state
            .pending
            .iter_mut()
            .find(|p| p.action_id == vote.action)
        else {
            return;
        };
        // Latest vote wins.
        let votes = match vote.class {
            VoterClass::Committee => &mut entry.committee_votes,
            VoterClass::Drep => &mut entry.drep_votes,
            VoterClass::Spo => &mut entry.pool_votes,
        };
        votes.insert(vote.voter_id.clone(), vote.choice);
    }

    fn certificate_deposit(cert: &Certificate) -> Coin {
        match cert {
            Certificate::StakeRegistration { deposit, .. } => *deposit,
            Certificate::CommitteeResignation { .. } => Coin::ZERO,
        }
    }

    fn record_certificate(state: &mut LedgerState, cert: &Certificate) {
        if let Certificate::StakeRegistration { stake_vkey, .. } = cert {
            let stake = Address::new(format!("stake_{stake_vkey}"));
            state.stake_keys.entry(stake_vkey.clone()).or_insert(stake);
        }
    }

    /// Does `class` approve the action? Non-voters count against; Abstain
    /// shrinks the electorate. Empty classes auto-approve.
    fn class_approves(&self, entry: &ProposalEntry, class: VoterClass) -> bool {
        let size = self.roster.class_size(class);
        if size == 0 {
            return true;
        }
        let votes = entry.votes_of(class);
        let yes = votes.values().filter(|c| **c == Choice::Yes).count();
        let abstain = votes.values().filter(|c| **c == Choice::Abstain).count();
        yes * 2 > size - abstain
    }

    /// Run one epoch boundary: enact last round's ratifications, compute
    /// this round's, then expire what ran out of lifetime.
    fn cross_epoch_boundary(&self) {
        let mut state = self.state.borrow_mut();
        state.epoch += 1;
        let epoch = state.epoch;

        // Enact the previous round.
        let ratified = std::mem::take(&mut state.next_ratify.ratified);
        for action in &ratified {
            let Some(pos) = state.pending.iter().position(|p| &p.action_id == action) else {
                continue;
            };
            let entry = state.pending.remove(pos);
            self.enact(&mut state, &entry);
        }
        state.next_ratify.expired.clear();

        // Compute the new ratification round, in submission order. A
        // ratified action immediately claims its linkage slot, so a later
        // sibling holding the stale pointer can no longer ratify.
        let mut claimed = state.next_ratify.next_enact.prev_actions.clone();
        let mut newly_ratified = Vec::new();
        for entry in &state.pending {
            if entry.expires_after < epoch {
                continue;
            }
            if entry.tag == ActionTag::InfoAction {
                // Info actions are never enacted; they expire.
                continue;
            }
            if let Some(purpose) = entry.tag.purpose() {
                if entry.prev_action != claimed.get(&purpose).cloned() {
                    continue;
                }
            }
            let approved = entitled_classes(entry.tag)
                .iter()
                .all(|class| self.class_approves(entry, *class));
            if approved {
                if let Some(purpose) = entry.tag.purpose() {
                    claimed.insert(purpose, entry.action_id.clone());
                }
                newly_ratified.push(entry.action_id.clone());
            }
        }
        state.next_ratify.ratified = newly_ratified;

        // Expire what ran out of lifetime.
        let mut expired_pos: Vec<usize> = state
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.expires_after < epoch)
            .map(|(i, _)| i)
            .collect();
        if self.config.single_removal_bug {
            expired_pos.truncate(1);
        }
        for pos in expired_pos.into_iter().rev() {
            let entry = state.pending.remove(pos);
            Self::refund_deposit(&mut state, &entry);
            state.next_ratify.expired.push(ExpiredAction {
                action_id: entry.action_id,
                expired_after: entry.expires_after,
            });
        }
        state.next_ratify.expired.reverse();
    }

    fn enact(&self, state: &mut LedgerState, entry: &ProposalEntry) {
        match entry.tag {
            ActionTag::ParameterChange => {
                if let (Some(params), Some(updates)) = (
                    state.params.as_object_mut(),
                    entry.contents.as_object(),
                ) {
                    for (k, v) in updates {
                        params.insert(k.clone(), v.clone());
                    }
                }
            }
            ActionTag::TreasuryWithdrawals => {
                if let Some(withdrawals) = entry
                    .contents
                    .get("withdrawals")
                    .and_then(|w| w.as_array())
                {
                    for w in withdrawals {
                        let vkey = w.get("stake_vkey").and_then(|v| v.as_str());
                        let amount =
                            Coin::new(w.get("amount").and_then(|a| a.as_u64()).unwrap_or(0));
                        if let Some(stake) = vkey.and_then(|k| state.stake_keys.get(k)).cloned() {
                            state.treasury = state.treasury - amount;
                            *state.rewards.entry(stake).or_default() += amount;
                        }
                    }
                }
            }
            _ => {}
        }
        if let Some(purpose) = entry.tag.purpose() {
            state
                .next_ratify
                .next_enact
                .prev_actions
                .insert(purpose, entry.action_id.clone());
        }
        Self::refund_deposit(state, entry);
        state.next_ratify.next_enact.params = state.params.clone();
    }

    fn refund_deposit(state: &mut LedgerState, entry: &ProposalEntry) {
        if let Some(stake) = state.stake_keys.get(&entry.return_stake_vkey).cloned() {
            *state.rewards.entry(stake).or_default() += entry.deposit;
        }
    }
}

/// Voter classes entitled to vote on an action kind.
fn entitled_classes(tag: ActionTag) -> &'static [VoterClass] {
    match tag {
        ActionTag::ParameterChange | ActionTag::HardForkInitiation => {
            &[VoterClass::Committee, VoterClass::Drep, VoterClass::Spo]
        }
        ActionTag::NewConstitution | ActionTag::TreasuryWithdrawals => {
            &[VoterClass::Committee, VoterClass::Drep]
        }
        ActionTag::UpdateCommittee | ActionTag::NoConfidence => {
            &[VoterClass::Drep, VoterClass::Spo]
        }
        ActionTag::InfoAction => &[VoterClass::Committee, VoterClass::Drep, VoterClass::Spo],
    }
}

impl ChainClient for NullChain {
    fn submit_tx(&self, payer: &Address, files: &TxFiles) -> Result<TxHandle, ClientError> {
        if let Some(limit) = self.config.tx_item_limit {
            let items = files.item_count();
            if items > limit {
                return Err(ClientError::SizeLimitExceeded { items, limit });
            }
        }

        let mut state = self.state.borrow_mut();

        // Validate everything before mutating, so a rejected transaction
        // leaves no trace.
        for vote in &files.votes {
            Self::validate_vote(&state, vote)?;
        }

        let inputs_balance = state
            .balances
            .get(payer)
            .copied()
            .unwrap_or(Coin::ZERO);
        let cert_deposits: Coin = files
            .certificates
            .iter()
            .map(Self::certificate_deposit)
            .sum();
        let proposal_deposits: Coin = files.proposals.iter().map(|p| p.deposit).sum();
        let deposits = cert_deposits + proposal_deposits;

        let debit = self.config.fee + deposits;
        if inputs_balance < debit {
            return Err(ClientError::Query(format!(
                "insufficient balance at {payer}: {inputs_balance} < {debit}"
            )));
        }

        for cert in &files.certificates {
            Self::record_certificate(&mut state, cert);
        }
        for vote in &files.votes {
            Self::record_vote(&mut state, vote);
        }

        let txid = Self::next_txid(&mut state);
        for (ix, proposal) in files.proposals.iter().enumerate() {
            self.accept_proposal(&mut state, &txid, ix as u32, proposal);
        }

        state.balances.insert(payer.clone(), inputs_balance - debit);
        Ok(TxHandle {
            txid,
            fee: self.config.fee,
            inputs_balance,
        })
    }

    fn utxos(&self, address: &Address) -> Vec<UtxoEntry> {
        let state = self.state.borrow();
        match state.balances.get(address) {
            Some(amount) => vec![UtxoEntry { amount: *amount }],
            None => vec![],
        }
    }

    fn reward_balance(&self, stake_address: &Address) -> Coin {
        let state = self.state.borrow();
        state
            .rewards
            .get(stake_address)
            .copied()
            .unwrap_or(Coin::ZERO)
    }

    fn gov_snapshot(&self) -> GovSnapshot {
        let state = self.state.borrow();
        GovSnapshot {
            epoch: state.epoch,
            proposals: state.pending.clone(),
            next_ratify: state.next_ratify.clone(),
            current_params: state.params.clone(),
            treasury: state.treasury,
        }
    }

    fn epoch(&self) -> u64 {
        self.state.borrow().epoch
    }

    fn wait_for_new_epoch(&self, _padding: Duration) -> u64 {
        self.cross_epoch_boundary();
        self.epoch()
    }

    fn action_deposit(&self) -> Coin {
        self.config.action_deposit
    }

    fn stake_address_deposit(&self) -> Coin {
        self.config.stake_address_deposit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{pool_users, roster};
    use govdrill_types::SigningKey;

    fn param_proposal(name: &str, vkey: &str, prev: Option<ActionId>) -> ProposalFile {
        ProposalFile {
            name: name.into(),
            tag: ActionTag::ParameterChange,
            deposit: Coin::new(100_000_000),
            return_stake_vkey: vkey.into(),
            prev_action: prev,
            contents: serde_json::json!({ "maxTxSize": 20000 }),
        }
    }

    fn vote_file(action: &ActionId, class: VoterClass, voter: &str, choice: Choice) -> VoteFile {
        VoteFile {
            name: format!("{voter}_{action}"),
            action: action.clone(),
            class,
            voter_id: voter.into(),
            choice,
            anchor_url: format!("http://www.{voter}-vote.com"),
            anchor_data_hash: "00".repeat(32),
        }
    }

    fn chain_with_user() -> (NullChain, PoolUser) {
        let chain = NullChain::new(NullChainConfig::default(), roster(3, 5, 3));
        let user = pool_users(1).remove(0);
        chain.register_user(&user, Coin::new(2_000_000_000));
        (chain, user)
    }

    fn cast_all(chain: &NullChain, user: &PoolUser, action: &ActionId, class: VoterClass, yes: usize) {
        let ids: Vec<String> = match class {
            VoterClass::Committee => (1..=3).map(|i| format!("cc{i}")).collect(),
            VoterClass::Drep => (1..=5).map(|i| format!("drep{i}")).collect(),
            VoterClass::Spo => (1..=3).map(|i| format!("pool{i}")).collect(),
        };
        let votes: Vec<VoteFile> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let choice = if i < yes { Choice::Yes } else { Choice::No };
                vote_file(action, class, id, choice)
            })
            .collect();
        chain
            .submit_tx(
                &user.payment,
                &TxFiles::votes(votes, vec![SigningKey::new("k.skey")]),
            )
            .unwrap();
    }

    #[test]
    fn proposal_then_ratify_then_enact() {
        let (chain, user) = chain_with_user();
        let handle = chain
            .submit_tx(
                &user.payment,
                &TxFiles::proposals(
                    vec![param_proposal("p0", &user.stake_vkey, None)],
                    vec![user.payment_skey.clone()],
                ),
            )
            .unwrap();
        let action = ActionId::new(handle.txid, 0);

        for class in VoterClass::ALL {
            let size = match class {
                VoterClass::Committee | VoterClass::Spo => 3,
                VoterClass::Drep => 5,
            };
            cast_all(&chain, &user, &action, class, size);
        }

        // Ratified at the first boundary after voting.
        chain.wait_for_new_epoch(Duration::ZERO);
        let snap = chain.gov_snapshot();
        assert!(snap.next_ratify.ratified.contains(&action));

        // Enacted at the next one: params updated, pointer moved,
        // deposit refunded.
        chain.wait_for_new_epoch(Duration::ZERO);
        let snap = chain.gov_snapshot();
        assert!(snap.proposals.is_empty());
        assert_eq!(snap.current_params["maxTxSize"], 20000);
        assert_eq!(
            snap.next_ratify.next_enact.prev_actions[&ActionPurpose::ParamUpdate],
            action
        );
        assert_eq!(chain.reward_balance(&user.stake), Coin::new(100_000_000));
    }

    #[test]
    fn insufficient_votes_expire_and_refund() {
        let (chain, user) = chain_with_user();
        let handle = chain
            .submit_tx(
                &user.payment,
                &TxFiles::proposals(
                    vec![param_proposal("p0", &user.stake_vkey, None)],
                    vec![user.payment_skey.clone()],
                ),
            )
            .unwrap();
        let action = ActionId::new(handle.txid, 0);
        cast_all(&chain, &user, &action, VoterClass::Drep, 0);

        // lifetime 3: proposed in epoch 0, ratifiable through epoch 3,
        // pruned at epoch 4.
        for _ in 0..4 {
            chain.wait_for_new_epoch(Duration::ZERO);
            assert!(chain.gov_snapshot().next_ratify.ratified.is_empty());
        }
        let snap = chain.gov_snapshot();
        assert!(snap.proposals.is_empty());
        assert_eq!(snap.next_ratify.expired.len(), 1);
        assert_eq!(snap.next_ratify.expired[0].action_id, action);
        assert_eq!(chain.reward_balance(&user.stake), Coin::new(100_000_000));
    }

    #[test]
    fn vote_on_unknown_action_rejected() {
        let (chain, user) = chain_with_user();
        let err = chain
            .submit_tx(
                &user.payment,
                &TxFiles::votes(
                    vec![vote_file(
                        &ActionId::new("ffffffff", 0),
                        VoterClass::Drep,
                        "drep1",
                        Choice::Yes,
                    )],
                    vec![SigningKey::new("k.skey")],
                ),
            )
            .unwrap_err();
        assert!(err.rejected_with("GovActionsDoNotExist"));
    }

    #[test]
    fn spo_cannot_vote_on_treasury_withdrawal() {
        let (chain, user) = chain_with_user();
        let proposal = ProposalFile {
            name: "wd".into(),
            tag: ActionTag::TreasuryWithdrawals,
            deposit: Coin::new(100_000_000),
            return_stake_vkey: user.stake_vkey.clone(),
            prev_action: None,
            contents: serde_json::json!({
                "withdrawals": [{ "stake_vkey": user.stake_vkey, "amount": 5_000_000 }]
            }),
        };
        let handle = chain
            .submit_tx(
                &user.payment,
                &TxFiles::proposals(vec![proposal], vec![user.payment_skey.clone()]),
            )
            .unwrap();
        let action = ActionId::new(handle.txid, 0);

        let err = chain
            .submit_tx(
                &user.payment,
                &TxFiles::votes(
                    vec![vote_file(&action, VoterClass::Spo, "pool1", Choice::Yes)],
                    vec![SigningKey::new("k.skey")],
                ),
            )
            .unwrap_err();
        assert!(err.rejected_with("StakePoolVoter"));
    }

    #[test]
    fn committee_cannot_vote_on_committee_update() {
        let (chain, user) = chain_with_user();
        let proposal = ProposalFile {
            name: "cm".into(),
            tag: ActionTag::UpdateCommittee,
            deposit: Coin::new(100_000_000),
            return_stake_vkey: user.stake_vkey.clone(),
            prev_action: None,
            contents: serde_json::json!({ "added": [], "removed": [] }),
        };
        let handle = chain
            .submit_tx(
                &user.payment,
                &TxFiles::proposals(vec![proposal], vec![user.payment_skey.clone()]),
            )
            .unwrap();
        let action = ActionId::new(handle.txid, 0);

        let err = chain
            .submit_tx(
                &user.payment,
                &TxFiles::votes(
                    vec![vote_file(&action, VoterClass::Committee, "cc1", Choice::Yes)],
                    vec![SigningKey::new("k.skey")],
                ),
            )
            .unwrap_err();
        assert!(err.rejected_with("CommitteeVoter"));

        // Dreps and pools remain entitled.
        chain
            .submit_tx(
                &user.payment,
                &TxFiles::votes(
                    vec![
                        vote_file(&action, VoterClass::Drep, "drep1", Choice::Yes),
                        vote_file(&action, VoterClass::Spo, "pool1", Choice::Yes),
                    ],
                    vec![SigningKey::new("k.skey")],
                ),
            )
            .unwrap();
    }

    #[test]
    fn size_limit_enforced() {
        let chain = NullChain::new(
            NullChainConfig {
                tx_item_limit: Some(2),
                ..NullChainConfig::default()
            },
            roster(0, 0, 0),
        );
        let user = pool_users(1).remove(0);
        chain.register_user(&user, Coin::new(1_000_000_000));

        let proposals = vec![
            param_proposal("p0", &user.stake_vkey, None),
            param_proposal("p1", &user.stake_vkey, None),
            param_proposal("p2", &user.stake_vkey, None),
        ];
        let err = chain
            .submit_tx(
                &user.payment,
                &TxFiles::proposals(proposals, vec![user.payment_skey.clone()]),
            )
            .unwrap_err();
        assert!(err.is_size_limit());
    }

    #[test]
    fn first_committed_wins_the_linkage_slot() {
        let (chain, user) = chain_with_user();
        let proposals = vec![
            param_proposal("p0", &user.stake_vkey, None),
            param_proposal("p1", &user.stake_vkey, None),
        ];
        let handle = chain
            .submit_tx(
                &user.payment,
                &TxFiles::proposals(proposals, vec![user.payment_skey.clone()]),
            )
            .unwrap();
        let first = ActionId::new(handle.txid.clone(), 0);
        let second = ActionId::new(handle.txid, 1);

        // Both actions get approving votes from every class.
        for action in [&first, &second] {
            cast_all(&chain, &user, action, VoterClass::Committee, 3);
            cast_all(&chain, &user, action, VoterClass::Drep, 5);
            cast_all(&chain, &user, action, VoterClass::Spo, 3);
        }

        chain.wait_for_new_epoch(Duration::ZERO);
        let snap = chain.gov_snapshot();
        assert_eq!(snap.next_ratify.ratified, vec![first.clone()]);

        chain.wait_for_new_epoch(Duration::ZERO);
        let snap = chain.gov_snapshot();
        assert_eq!(
            snap.next_ratify.next_enact.prev_actions[&ActionPurpose::ParamUpdate],
            first
        );
        // The runner-up now points at a stale predecessor and can only
        // expire.
        assert_eq!(snap.proposals.len(), 1);
        assert_eq!(snap.proposals[0].action_id, second);
    }

    #[test]
    fn single_removal_bug_prunes_one_per_epoch() {
        let chain = NullChain::new(
            NullChainConfig {
                single_removal_bug: true,
                action_lifetime: 1,
                ..NullChainConfig::default()
            },
            roster(0, 3, 0),
        );
        let user = pool_users(1).remove(0);
        chain.register_user(&user, Coin::new(2_000_000_000));

        let proposals = vec![
            param_proposal("p0", &user.stake_vkey, None),
            param_proposal("p1", &user.stake_vkey, None),
            param_proposal("p2", &user.stake_vkey, None),
        ];
        chain
            .submit_tx(
                &user.payment,
                &TxFiles::proposals(proposals, vec![user.payment_skey.clone()]),
            )
            .unwrap();

        chain.wait_for_new_epoch(Duration::ZERO); // epoch 1, still ratifiable
        chain.wait_for_new_epoch(Duration::ZERO); // epoch 2, all expired
        let snap = chain.gov_snapshot();
        assert_eq!(snap.next_ratify.expired.len(), 1);
        assert_eq!(snap.proposals.len(), 2);

        chain.wait_for_new_epoch(Duration::ZERO);
        assert_eq!(chain.gov_snapshot().proposals.len(), 1);
    }
}
