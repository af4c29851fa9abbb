//! Funded pool-user fixture record.

use crate::address::{Address, SigningKey};
use serde::{Deserialize, Serialize};

/// A registered, funded user: a payment address that pays fees and deposits,
/// plus a stake address whose reward account receives deposit refunds.
///
/// Created by the external wallet tooling; the harness only references it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolUser {
    pub name: String,
    pub payment: Address,
    pub payment_skey: SigningKey,
    pub stake: Address,
    pub stake_skey: SigningKey,
    /// Verification-key reference used as the deposit-return target
    /// on proposals.
    pub stake_vkey: String,
}

impl PoolUser {
    pub fn new(
        name: impl Into<String>,
        payment: Address,
        payment_skey: SigningKey,
        stake: Address,
        stake_skey: SigningKey,
        stake_vkey: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            payment,
            payment_skey,
            stake,
            stake_skey,
            stake_vkey: stake_vkey.into(),
        }
    }
}
