//! Governance-action lifecycle tracking.
//!
//! The tracker never forces a transition — it samples governance-state
//! snapshots from the external ledger and classifies where each action
//! stands: `NotFound → Proposed → {Ratified → Enacted} | Expired`.

pub mod lookup;
pub mod poll;
pub mod quirks;
pub mod state;

pub use lookup::{lookup_expired, lookup_proposal, lookup_ratified, prev_action};
pub use poll::{poll_until, PollError, PollOpts};
pub use quirks::single_removal_anomaly;
pub use state::classify;
