//! Threshold policy evaluation and deterministic ballot assignment.
//!
//! Given a voter class and a named threshold policy, this crate computes how
//! many members must vote Yes and converts that into concrete per-member
//! ballots. Assignment is index-threshold based (the first `n` members by
//! stable order vote Yes), not sampled — scenario assertions about *which*
//! of several competing actions wins depend on it being reproducible.

pub mod assign;
pub mod policy;
pub mod strategy;

pub use assign::{assign, assign_for_policy};
pub use policy::ThresholdPolicy;
pub use strategy::{FixedThreshold, NoAbstainProbe, SkipEveryThird, VoteStrategy, YesAbstainProbe};
