//! Voter classes and the roster of voting members.

use crate::address::SigningKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three classes of governance voters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoterClass {
    /// Constitutional committee member (hot credential).
    Committee,
    /// Delegated representative.
    Drep,
    /// Stake pool operator (cold credential).
    Spo,
}

impl VoterClass {
    pub const ALL: [VoterClass; 3] = [VoterClass::Committee, VoterClass::Drep, VoterClass::Spo];

    /// Short label used in vote names and log fields.
    pub fn label(&self) -> &'static str {
        match self {
            VoterClass::Committee => "cc",
            VoterClass::Drep => "drep",
            VoterClass::Spo => "pool",
        }
    }
}

impl fmt::Display for VoterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One voting member of a class: an opaque credential reference plus the
/// signing key the external tooling needs to witness the member's vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterMember {
    pub id: String,
    pub signing_key: SigningKey,
}

impl VoterMember {
    pub fn new(id: impl Into<String>, signing_key: SigningKey) -> Self {
        Self {
            id: id.into(),
            signing_key,
        }
    }
}

/// The ordered collections of voting members, one per class.
///
/// Supplied externally (cluster governance setup) and read-only here.
/// Member order is stable: ballot assignment depends on it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VoterRoster {
    pub committee: Vec<VoterMember>,
    pub dreps: Vec<VoterMember>,
    pub pools: Vec<VoterMember>,
}

impl VoterRoster {
    pub fn members(&self, class: VoterClass) -> &[VoterMember] {
        match class {
            VoterClass::Committee => &self.committee,
            VoterClass::Drep => &self.dreps,
            VoterClass::Spo => &self.pools,
        }
    }

    pub fn class_size(&self, class: VoterClass) -> usize {
        self.members(class).len()
    }

    /// Signing keys for every member of a class, in member order.
    pub fn signing_keys(&self, class: VoterClass) -> Vec<SigningKey> {
        self.members(class)
            .iter()
            .map(|m| m.signing_key.clone())
            .collect()
    }
}
