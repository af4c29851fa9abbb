use thiserror::Error;

/// Failures surfaced by the external submission and query layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transaction exceeds the ledger's size limit. A distinct,
    /// catchable outcome: deliberately oversized test batches expect it.
    #[error("transaction size limit exceeded: {items} items, limit {limit}")]
    SizeLimitExceeded { items: usize, limit: usize },

    /// The ledger rejected the transaction for a policy reason (wrong voter
    /// class, action already decided, restricted bootstrap period, ...).
    /// Callers assert on substrings of `reason`.
    #[error("submission rejected: {reason}")]
    Rejected { reason: String },

    /// Anything else from the external layer; propagated unmodified,
    /// never swallowed.
    #[error("chain query failed: {0}")]
    Query(String),
}

impl ClientError {
    /// Whether this is the expected size-limit rejection.
    pub fn is_size_limit(&self) -> bool {
        matches!(self, ClientError::SizeLimitExceeded { .. })
    }

    /// Whether this is a policy rejection whose reason contains `needle`.
    pub fn rejected_with(&self, needle: &str) -> bool {
        matches!(self, ClientError::Rejected { reason } if reason.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_with_matches_substring() {
        let err = ClientError::Rejected {
            reason: "ConwayGovFailure (GovActionsDoNotExist ...)".into(),
        };
        assert!(err.rejected_with("GovActionsDoNotExist"));
        assert!(!err.rejected_with("StakePoolVoter"));
        assert!(!err.is_size_limit());
    }
}
