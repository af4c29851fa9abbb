//! The chunked submitter.

use crate::error::SubmitError;
use govdrill_client::{utxo_balance, Certificate, ChainClient, ProposalFile, TxFiles, TxHandle,
    VoteFile};
use govdrill_types::{Address, Coin, SigningKey};

/// Registration certificates per transaction.
pub const DEFAULT_CERT_CHUNK: usize = 50;
/// Votes per transaction.
pub const DEFAULT_VOTE_CHUNK: usize = 60;

/// Submit votes in chunks of at most `chunk_size`.
///
/// Every chunk is signed by the payer plus the FULL `voter_keys` set: key
/// ownership is not chunk-local, the vote files in a chunk can belong to
/// any voter. After each chunk the payer's balance must equal the consumed
/// inputs minus the fee.
pub fn submit_votes(
    client: &dyn ChainClient,
    payer: &Address,
    payer_key: &SigningKey,
    votes: &[VoteFile],
    voter_keys: &[SigningKey],
    chunk_size: usize,
) -> Result<Vec<TxHandle>, SubmitError> {
    let chunk_size = effective(chunk_size, votes.len());
    let mut handles = Vec::with_capacity(crate::chunk::chunk_count(votes.len(), chunk_size));

    for (chunk_ix, chunk) in votes.chunks(chunk_size.max(1)).enumerate() {
        let mut keys = Vec::with_capacity(voter_keys.len() + 1);
        keys.push(payer_key.clone());
        keys.extend_from_slice(voter_keys);

        let files = TxFiles::votes(chunk.to_vec(), keys);
        let handle = submit_chunk(client, payer, &files, chunk_ix, Coin::ZERO)?;
        tracing::info!(
            chunk = chunk_ix,
            votes = chunk.len(),
            txid = %handle.txid,
            "submitted vote chunk"
        );
        handles.push(handle);
    }

    Ok(handles)
}

/// Submit certificates in chunks of at most `chunk_size`, with
/// `cert_keys` sliced in lockstep: the keys witnessing a chunk are exactly
/// the keys of the certificates in it. The two slices must align
/// one-to-one; a mismatch is rejected before anything is submitted.
///
/// `deposit_per_cert` is subtracted per certificate in the conservation
/// check (zero for deposit-free certificates such as resignations).
pub fn submit_certificates(
    client: &dyn ChainClient,
    payer: &Address,
    payer_key: &SigningKey,
    certs: &[Certificate],
    cert_keys: &[SigningKey],
    chunk_size: usize,
    deposit_per_cert: Coin,
) -> Result<Vec<TxHandle>, SubmitError> {
    if certs.len() != cert_keys.len() {
        return Err(SubmitError::KeyMisalignment {
            certificates: certs.len(),
            keys: cert_keys.len(),
        });
    }

    let chunk_size = effective(chunk_size, certs.len());
    let mut handles = Vec::with_capacity(crate::chunk::chunk_count(certs.len(), chunk_size));

    for (chunk_ix, (chunk, key_chunk)) in certs
        .chunks(chunk_size.max(1))
        .zip(cert_keys.chunks(chunk_size.max(1)))
        .enumerate()
    {
        let mut keys = Vec::with_capacity(key_chunk.len() + 1);
        keys.push(payer_key.clone());
        keys.extend_from_slice(key_chunk);

        let files = TxFiles::certificates(chunk.to_vec(), keys);
        let deposits = deposit_per_cert.scale(chunk.len() as u64);
        let handle = submit_chunk(client, payer, &files, chunk_ix, deposits)?;
        tracing::info!(
            chunk = chunk_ix,
            certificates = chunk.len(),
            txid = %handle.txid,
            "submitted certificate chunk"
        );
        handles.push(handle);
    }

    Ok(handles)
}

/// Submit a batch of proposals as ONE transaction, witnessed by all
/// proposer keys, checking that the payer lost exactly fee plus the
/// combined deposit.
pub fn submit_proposals(
    client: &dyn ChainClient,
    payer: &Address,
    payer_key: &SigningKey,
    proposals: &[ProposalFile],
    proposer_keys: &[SigningKey],
) -> Result<TxHandle, SubmitError> {
    let combined_deposit: Coin = proposals.iter().map(|p| p.deposit).sum();

    let mut keys = Vec::with_capacity(proposer_keys.len() + 1);
    keys.push(payer_key.clone());
    keys.extend_from_slice(proposer_keys);

    let files = TxFiles::proposals(proposals.to_vec(), keys);
    let handle = submit_chunk(client, payer, &files, 0, combined_deposit)?;
    tracing::info!(
        proposals = proposals.len(),
        deposit = %combined_deposit,
        txid = %handle.txid,
        "submitted proposal batch"
    );
    Ok(handle)
}

/// Submit one chunk and run the conservation-of-value check:
/// payer balance afterwards == inputs consumed - fee - deposits.
fn submit_chunk(
    client: &dyn ChainClient,
    payer: &Address,
    files: &TxFiles,
    chunk_ix: usize,
    deposits: Coin,
) -> Result<TxHandle, SubmitError> {
    let handle = client.submit_tx(payer, files).map_err(|e| {
        if e.is_size_limit() {
            SubmitError::SizeLimit {
                chunk: chunk_ix,
                source: e,
            }
        } else {
            SubmitError::Submission(e)
        }
    })?;

    let expected = handle.inputs_balance - handle.fee - deposits;
    let actual = utxo_balance(client, payer);
    if actual != expected {
        return Err(SubmitError::BalanceMismatch {
            chunk: chunk_ix,
            address: payer.clone(),
            expected,
            actual,
        });
    }

    Ok(handle)
}

fn effective(chunk_size: usize, len: usize) -> usize {
    if chunk_size == 0 {
        len.max(1)
    } else {
        chunk_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govdrill_client::{ClientError, GovSnapshot, UtxoEntry};
    use govdrill_types::{ActionId, Choice, VoterClass};
    use std::cell::RefCell;
    use std::time::Duration;

    /// Minimal scripted client: fixed fee, optional item limit, balance
    /// tracked per submission.
    struct ScriptedClient {
        balance: RefCell<Coin>,
        fee: Coin,
        item_limit: Option<usize>,
        submissions: RefCell<Vec<TxFiles>>,
    }

    impl ScriptedClient {
        fn new(balance: u64, fee: u64) -> Self {
            Self {
                balance: RefCell::new(Coin::new(balance)),
                fee: Coin::new(fee),
                item_limit: None,
                submissions: RefCell::new(Vec::new()),
            }
        }

        fn with_item_limit(mut self, limit: usize) -> Self {
            self.item_limit = Some(limit);
            self
        }
    }

    impl ChainClient for ScriptedClient {
        fn submit_tx(&self, _payer: &Address, files: &TxFiles) -> Result<TxHandle, ClientError> {
            if let Some(limit) = self.item_limit {
                if files.item_count() > limit {
                    return Err(ClientError::SizeLimitExceeded {
                        items: files.item_count(),
                        limit,
                    });
                }
            }
            let inputs_balance = *self.balance.borrow();
            let cert_deposits: Coin = files
                .certificates
                .iter()
                .map(|c| match c {
                    Certificate::StakeRegistration { deposit, .. } => *deposit,
                    Certificate::CommitteeResignation { .. } => Coin::ZERO,
                })
                .sum();
            let proposal_deposits: Coin = files.proposals.iter().map(|p| p.deposit).sum();
            let deposits = cert_deposits + proposal_deposits;
            *self.balance.borrow_mut() = inputs_balance - self.fee - deposits;
            self.submissions.borrow_mut().push(files.clone());
            Ok(TxHandle {
                txid: format!("tx{}", self.submissions.borrow().len()),
                fee: self.fee,
                inputs_balance,
            })
        }

        fn utxos(&self, _address: &Address) -> Vec<UtxoEntry> {
            vec![UtxoEntry {
                amount: *self.balance.borrow(),
            }]
        }

        fn reward_balance(&self, _stake_address: &Address) -> Coin {
            Coin::ZERO
        }

        fn gov_snapshot(&self) -> GovSnapshot {
            GovSnapshot::default()
        }

        fn epoch(&self) -> u64 {
            0
        }

        fn wait_for_new_epoch(&self, _padding: Duration) -> u64 {
            0
        }

        fn action_deposit(&self) -> Coin {
            Coin::new(100_000_000)
        }

        fn stake_address_deposit(&self) -> Coin {
            Coin::new(2_000_000)
        }
    }

    fn vote(i: usize) -> VoteFile {
        VoteFile {
            name: format!("vote{i}"),
            action: ActionId::new("aaaa", 0),
            class: VoterClass::Drep,
            voter_id: format!("drep{i}"),
            choice: Choice::Yes,
            anchor_url: format!("http://www.drep-vote{i}.com"),
            anchor_data_hash: "00".repeat(32),
        }
    }

    fn votes(n: usize) -> Vec<VoteFile> {
        (1..=n).map(vote).collect()
    }

    fn keys(n: usize) -> Vec<SigningKey> {
        (1..=n).map(|i| SigningKey::new(format!("k{i}.skey"))).collect()
    }

    #[test]
    fn votes_split_into_expected_chunks() {
        let client = ScriptedClient::new(10_000_000, 1_000);
        let payer = Address::new("addr_payer");
        let handles = submit_votes(
            &client,
            &payer,
            &SigningKey::new("payer.skey"),
            &votes(130),
            &keys(130),
            DEFAULT_VOTE_CHUNK,
        )
        .unwrap();
        assert_eq!(handles.len(), 3);

        // Concatenating the submitted chunks reproduces the input order.
        let submitted: Vec<String> = client
            .submissions
            .borrow()
            .iter()
            .flat_map(|f| f.votes.iter().map(|v| v.name.clone()))
            .collect();
        let expected: Vec<String> = (1..=130).map(|i| format!("vote{i}")).collect();
        assert_eq!(submitted, expected);
    }

    #[test]
    fn every_vote_chunk_carries_all_voter_keys() {
        let client = ScriptedClient::new(10_000_000, 1_000);
        let payer = Address::new("addr_payer");
        submit_votes(
            &client,
            &payer,
            &SigningKey::new("payer.skey"),
            &votes(70),
            &keys(70),
            DEFAULT_VOTE_CHUNK,
        )
        .unwrap();
        for files in client.submissions.borrow().iter() {
            // payer key + full voter key set
            assert_eq!(files.signing_keys.len(), 71);
        }
    }

    #[test]
    fn certificate_keys_are_sliced_in_lockstep() {
        let client = ScriptedClient::new(1_000_000_000, 1_000);
        let payer = Address::new("addr_payer");
        let certs: Vec<Certificate> = (1..=120)
            .map(|i| Certificate::StakeRegistration {
                stake_vkey: format!("stake{i}.vkey"),
                deposit: Coin::new(2_000_000),
            })
            .collect();
        let handles = submit_certificates(
            &client,
            &payer,
            &SigningKey::new("payer.skey"),
            &certs,
            &keys(120),
            DEFAULT_CERT_CHUNK,
            Coin::new(2_000_000),
        )
        .unwrap();
        assert_eq!(handles.len(), 3);

        let subs = client.submissions.borrow();
        // 50 + 50 + 20; each chunk signed by payer + its own cert keys.
        assert_eq!(subs[0].signing_keys.len(), 51);
        assert_eq!(subs[1].signing_keys.len(), 51);
        assert_eq!(subs[2].signing_keys.len(), 21);
        assert_eq!(subs[2].signing_keys[1].as_str(), "k101.skey");
    }

    #[test]
    fn misaligned_cert_keys_are_rejected_up_front() {
        let client = ScriptedClient::new(1_000_000_000, 1_000);
        let payer = Address::new("addr_payer");
        let certs: Vec<Certificate> = (1..=3)
            .map(|i| Certificate::StakeRegistration {
                stake_vkey: format!("stake{i}.vkey"),
                deposit: Coin::new(2_000_000),
            })
            .collect();
        let err = submit_certificates(
            &client,
            &payer,
            &SigningKey::new("payer.skey"),
            &certs,
            &keys(2),
            DEFAULT_CERT_CHUNK,
            Coin::new(2_000_000),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SubmitError::KeyMisalignment {
                certificates: 3,
                keys: 2
            }
        ));
        assert!(client.submissions.borrow().is_empty());
    }

    #[test]
    fn size_limit_is_distinct_from_other_failures() {
        let client = ScriptedClient::new(10_000_000, 1_000).with_item_limit(40);
        let payer = Address::new("addr_payer");
        let err = submit_votes(
            &client,
            &payer,
            &SigningKey::new("payer.skey"),
            &votes(50),
            &keys(50),
            60,
        )
        .unwrap_err();
        assert!(err.is_size_limit());
        assert!(matches!(err, SubmitError::SizeLimit { chunk: 0, .. }));
    }

    #[test]
    fn proposal_batch_checks_combined_deposit() {
        let client = ScriptedClient::new(1_000_000_000, 1_000);
        let payer = Address::new("addr_payer");
        let proposals: Vec<ProposalFile> = (0..3)
            .map(|i| ProposalFile {
                name: format!("prop{i}"),
                tag: govdrill_types::ActionTag::ParameterChange,
                deposit: Coin::new(100_000_000),
                return_stake_vkey: format!("stake{i}.vkey"),
                prev_action: None,
                contents: serde_json::json!({}),
            })
            .collect();
        let handle = submit_proposals(
            &client,
            &payer,
            &SigningKey::new("payer.skey"),
            &proposals,
            &keys(3),
        )
        .unwrap();
        assert_eq!(handle.inputs_balance, Coin::new(1_000_000_000));
        assert_eq!(
            utxo_balance(&client, &payer),
            Coin::new(1_000_000_000 - 1_000 - 300_000_000)
        );
    }

    #[test]
    fn empty_batch_submits_nothing() {
        let client = ScriptedClient::new(10_000_000, 1_000);
        let payer = Address::new("addr_payer");
        let handles = submit_votes(
            &client,
            &payer,
            &SigningKey::new("payer.skey"),
            &[],
            &[],
            DEFAULT_VOTE_CHUNK,
        )
        .unwrap();
        assert!(handles.is_empty());
        assert!(client.submissions.borrow().is_empty());
    }
}
