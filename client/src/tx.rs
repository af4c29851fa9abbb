//! Transaction input bundles and submission results.

use govdrill_types::{ActionId, ActionTag, Choice, Coin, SigningKey, VoterClass};
use serde::{Deserialize, Serialize};

/// A built vote, ready for inclusion in a transaction.
///
/// Invariant: `choice` is never [`Choice::Skip`] — skipped members simply
/// have no vote file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteFile {
    /// Name for artifacts and logs, e.g. `race_deadbeef#2_drep7`.
    pub name: String,
    pub action: ActionId,
    pub class: VoterClass,
    pub voter_id: String,
    pub choice: Choice,
    pub anchor_url: String,
    pub anchor_data_hash: String,
}

/// A built governance-action proposal, ready for inclusion in a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalFile {
    pub name: String,
    pub tag: ActionTag,
    pub deposit: Coin,
    /// Stake verification key whose reward account receives the deposit
    /// refund.
    pub return_stake_vkey: String,
    /// Previous action in this action's linkage slot. All proposals in one
    /// batch share the same pointer unless a race is being staged on
    /// purpose.
    pub prev_action: Option<ActionId>,
    /// Action payload, opaque to the harness (parameter updates, withdrawal
    /// amounts, ...).
    pub contents: serde_json::Value,
}

/// Certificates the harness submits in bulk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Certificate {
    StakeRegistration {
        stake_vkey: String,
        deposit: Coin,
    },
    CommitteeResignation {
        cold_vkey: String,
        metadata_url: String,
    },
}

/// The files going into one transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxFiles {
    pub certificates: Vec<Certificate>,
    pub proposals: Vec<ProposalFile>,
    pub votes: Vec<VoteFile>,
    /// Witnesses beyond the payer key (the submission layer always adds
    /// the payer's own key).
    pub signing_keys: Vec<SigningKey>,
}

impl TxFiles {
    pub fn votes(votes: Vec<VoteFile>, signing_keys: Vec<SigningKey>) -> Self {
        Self {
            votes,
            signing_keys,
            ..Self::default()
        }
    }

    pub fn certificates(certificates: Vec<Certificate>, signing_keys: Vec<SigningKey>) -> Self {
        Self {
            certificates,
            signing_keys,
            ..Self::default()
        }
    }

    pub fn proposals(proposals: Vec<ProposalFile>, signing_keys: Vec<SigningKey>) -> Self {
        Self {
            proposals,
            signing_keys,
            ..Self::default()
        }
    }

    /// Number of payload items (certificates + proposals + votes).
    pub fn item_count(&self) -> usize {
        self.certificates.len() + self.proposals.len() + self.votes.len()
    }
}

/// Result of an accepted submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxHandle {
    pub txid: String,
    pub fee: Coin,
    /// Combined balance of the inputs the transaction consumed, recorded so
    /// callers can run conservation-of-value checks.
    pub inputs_balance: Coin,
}

/// One unspent output, reduced to what the harness checks: its amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoEntry {
    pub amount: Coin,
}
