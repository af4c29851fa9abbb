//! Nullable infrastructure for deterministic testing.
//!
//! The external chain is abstracted behind the `ChainClient` trait; this
//! crate provides a test-friendly implementation that:
//! - returns deterministic values,
//! - can be controlled programmatically (epochs advance on request),
//! - never touches the filesystem or network.
//!
//! Usage: swap the CLI-backed client for [`NullChain`] in tests.

pub mod chain;
pub mod fixtures;

pub use chain::{NullChain, NullChainConfig};
pub use fixtures::{pool_users, roster};
