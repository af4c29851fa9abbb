use govdrill_client::ClientError;
use govdrill_types::{Address, Coin};
use thiserror::Error;

/// Failures during chunked submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The external layer rejected a chunk for exceeding the transaction
    /// size limit. Deliberately oversized test batches catch this variant
    /// and treat it as "limit reached", not a defect.
    #[error("chunk {chunk} hit the transaction size limit: {source}")]
    SizeLimit {
        chunk: usize,
        source: ClientError,
    },

    /// A certificate batch arrived without a witnessing key per
    /// certificate; chunked key slicing would silently under-witness.
    #[error("{keys} signing keys for {certificates} certificates")]
    KeyMisalignment { certificates: usize, keys: usize },

    /// Post-chunk conservation check failed: the payer's balance does not
    /// equal the consumed inputs minus fee and deposits.
    #[error(
        "balance mismatch for {address} after chunk {chunk}: expected {expected}, found {actual}"
    )]
    BalanceMismatch {
        chunk: usize,
        address: Address,
        expected: Coin,
        actual: Coin,
    },

    /// Any other failure from the submission layer, propagated unmodified.
    #[error(transparent)]
    Submission(#[from] ClientError),
}

impl SubmitError {
    pub fn is_size_limit(&self) -> bool {
        matches!(self, SubmitError::SizeLimit { .. })
    }
}
