//! Fundamental types for the govdrill governance harness.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: coin amounts, addresses, governance-action identities, voter
//! classes and rosters, ballots, and lifecycle states.

pub mod action;
pub mod address;
pub mod ballot;
pub mod coin;
pub mod user;
pub mod voter;

pub use action::{ActionId, ActionPurpose, ActionTag, LifecycleState};
pub use address::{Address, SigningKey};
pub use ballot::{Ballot, Choice};
pub use coin::Coin;
pub use user::PoolUser;
pub use voter::{VoterClass, VoterMember, VoterRoster};
