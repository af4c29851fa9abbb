//! External chain-client contract.
//!
//! Everything the harness needs from the cluster — building and submitting
//! transactions, querying UTxOs and governance state, waiting for epochs —
//! is abstracted behind the [`ChainClient`] trait. The CLI-backed
//! implementation lives outside this workspace; `govdrill-nullables`
//! provides a deterministic in-memory one for tests.

pub mod error;
pub mod snapshot;
pub mod tx;

pub use error::ClientError;
pub use snapshot::{EnactState, ExpiredAction, GovSnapshot, NextRatifyState, ProposalEntry};
pub use tx::{Certificate, ProposalFile, TxFiles, TxHandle, UtxoEntry, VoteFile};

use govdrill_types::{Address, Coin};
use std::time::Duration;

/// The external chain/ledger, treated as a single serialized resource with
/// read (query) and append (submit) operations.
///
/// All methods block. The harness never assumes two of its own submissions
/// land in the same block.
pub trait ChainClient {
    /// Build, sign, and submit one transaction paying fees from `payer`.
    fn submit_tx(&self, payer: &Address, files: &TxFiles) -> Result<TxHandle, ClientError>;

    /// Current UTxO set of an address.
    fn utxos(&self, address: &Address) -> Vec<UtxoEntry>;

    /// Reward-account balance of a stake address (deposit refunds and
    /// treasury withdrawals arrive here).
    fn reward_balance(&self, stake_address: &Address) -> Coin;

    /// Structured snapshot of the current governance state.
    fn gov_snapshot(&self) -> GovSnapshot;

    /// Current epoch number.
    fn epoch(&self) -> u64;

    /// Block until the chain reports a new epoch, then wait `padding` more
    /// to let the boundary settle. Returns the new epoch.
    fn wait_for_new_epoch(&self, padding: Duration) -> u64;

    /// The per-action deposit required by the genesis configuration.
    fn action_deposit(&self) -> Coin;

    /// The deposit required to register a stake address.
    fn stake_address_deposit(&self) -> Coin;
}

/// Total spendable balance of an address.
pub fn utxo_balance(client: &dyn ChainClient, address: &Address) -> Coin {
    client.utxos(address).iter().map(|u| u.amount).sum()
}
