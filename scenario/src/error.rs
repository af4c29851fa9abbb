//! Scenario-level error taxonomy.
//!
//! Submission and client failures are re-sorted by what they mean to a
//! scenario: a size-limit rejection of a deliberately oversized batch is an
//! expected outcome, a ledger policy rejection is something scenarios assert
//! on, and everything else is a genuine failure.

use govdrill_client::ClientError;
use govdrill_submit::SubmitError;
use govdrill_tracker::PollError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The ledger refused a transaction for exceeding its size limit.
    /// Scenarios that oversize a batch on purpose match on this and
    /// short-circuit successfully.
    #[error("transaction size limit reached")]
    ExpectedLimit,

    /// The ledger rejected the submission on governance-policy grounds.
    /// Scenarios assert the expected reason substring.
    #[error("ledger rejected the submission: {reason}")]
    PolicyViolation { reason: String },

    /// An observed chain state contradicted what the scenario expected.
    #[error("scenario assertion failed: {context}")]
    Assertion { context: String },

    /// A bounded wait for a chain condition ran out of attempts.
    #[error("gave up waiting: {context}")]
    Timeout { context: String },

    #[error(transparent)]
    Submit(SubmitError),

    #[error(transparent)]
    Client(ClientError),
}

impl ScenarioError {
    pub(crate) fn assertion(context: impl Into<String>) -> Self {
        ScenarioError::Assertion {
            context: context.into(),
        }
    }
}

impl From<SubmitError> for ScenarioError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::SizeLimit { .. } => ScenarioError::ExpectedLimit,
            SubmitError::Submission(ClientError::Rejected { reason }) => {
                ScenarioError::PolicyViolation { reason }
            }
            other => ScenarioError::Submit(other),
        }
    }
}

impl From<ClientError> for ScenarioError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Rejected { reason } => ScenarioError::PolicyViolation { reason },
            other => ScenarioError::Client(other),
        }
    }
}

impl From<PollError<ScenarioError>> for ScenarioError {
    fn from(e: PollError<ScenarioError>) -> Self {
        match e {
            PollError::TimedOut { attempts } => ScenarioError::Timeout {
                context: format!("{attempts} poll attempts exhausted"),
            },
            PollError::Inner(inner) => inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govdrill_types::Coin;

    #[test]
    fn size_limit_becomes_expected_limit() {
        let err: ScenarioError = SubmitError::SizeLimit {
            chunk: 0,
            source: ClientError::SizeLimitExceeded {
                items: 80,
                limit: 60,
            },
        }
        .into();
        assert!(matches!(err, ScenarioError::ExpectedLimit));
    }

    #[test]
    fn ledger_rejection_becomes_policy_violation() {
        let err: ScenarioError = SubmitError::Submission(ClientError::Rejected {
            reason: "ConwayGovFailure (GovActionsDoNotExist [aaaa#0])".into(),
        })
        .into();
        match err {
            ScenarioError::PolicyViolation { reason } => {
                assert!(reason.contains("GovActionsDoNotExist"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn balance_mismatch_stays_a_submit_error() {
        let err: ScenarioError = SubmitError::BalanceMismatch {
            chunk: 1,
            address: govdrill_types::Address::new("addr_payer"),
            expected: Coin::new(10),
            actual: Coin::new(9),
        }
        .into();
        assert!(matches!(err, ScenarioError::Submit(_)));
    }

    #[test]
    fn poll_timeout_is_reported_as_timeout() {
        let err: ScenarioError = PollError::<ScenarioError>::TimedOut { attempts: 5 }.into();
        assert!(matches!(err, ScenarioError::Timeout { .. }));
    }
}
