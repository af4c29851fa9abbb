//! Chunked batch submission.
//!
//! Large sets of votes or certificates are split into bounded-size chunks,
//! each submitted as its own transaction. Chunks go out strictly
//! sequentially: later chunks may spend UTxOs produced by earlier ones,
//! so there is no parallel path.

pub mod chunk;
pub mod error;
pub mod submitter;

pub use chunk::chunk_count;
pub use error::SubmitError;
pub use submitter::{
    submit_certificates, submit_proposals, submit_votes, DEFAULT_CERT_CHUNK, DEFAULT_VOTE_CHUNK,
};
