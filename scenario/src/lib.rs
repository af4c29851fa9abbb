//! Governance lifecycle scenarios.
//!
//! Composes the lower layers into end-to-end flows: propose a batch of
//! actions, distribute and submit votes, then track each action across
//! epoch boundaries and assert where it lands. The centerpiece is
//! [`run_ratification_race`], which stages several actions competing for
//! one previous-action linkage slot and verifies that exactly the first
//! approved one wins.

pub mod context;
pub mod driver;
pub mod error;

pub use context::ScenarioContext;
pub use driver::{
    cast_policy_votes, cast_probe_votes, expect_vote_rejected, propose_param_updates,
    propose_treasury_withdrawal, register_stake_users, resign_committee, run_ratification_race,
    ProposalRound, RaceOutcome,
};
pub use error::ScenarioError;
