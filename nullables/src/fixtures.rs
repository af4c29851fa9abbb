//! Deterministic fixture builders.

use govdrill_types::{Address, PoolUser, SigningKey, VoterMember, VoterRoster};

/// A roster with `cc` committee members, `dreps` delegated representatives,
/// and `pools` stake pool operators, named `cc1..`, `drep1..`, `pool1..`.
pub fn roster(cc: usize, dreps: usize, pools: usize) -> VoterRoster {
    fn class(prefix: &str, n: usize) -> Vec<VoterMember> {
        (1..=n)
            .map(|i| {
                VoterMember::new(
                    format!("{prefix}{i}"),
                    SigningKey::new(format!("{prefix}{i}.skey")),
                )
            })
            .collect()
    }

    VoterRoster {
        committee: class("cc", cc),
        dreps: class("drep", dreps),
        pools: class("pool", pools),
    }
}

/// `n` pool users named `user1..`, with matching payment and stake handles.
pub fn pool_users(n: usize) -> Vec<PoolUser> {
    (1..=n)
        .map(|i| {
            PoolUser::new(
                format!("user{i}"),
                Address::new(format!("addr_user{i}")),
                SigningKey::new(format!("user{i}_payment.skey")),
                Address::new(format!("stake_user{i}")),
                SigningKey::new(format!("user{i}_stake.skey")),
                format!("user{i}_stake.vkey"),
            )
        })
        .collect()
}
