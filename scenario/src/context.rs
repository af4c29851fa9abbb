//! Per-scenario execution context.

use govdrill_client::GovSnapshot;
use govdrill_tracker::PollOpts;
use govdrill_types::{PoolUser, VoterRoster};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Everything a scenario run carries with it: the funded payer that signs
/// and pays for every transaction, the users whose stake keys receive
/// deposit refunds, the voter roster, and the wait/artifact settings.
pub struct ScenarioContext {
    /// Scenario name, used as the prefix of vote names and artifact files.
    pub name: String,
    pub payer: PoolUser,
    /// Deposit-return users, one per proposed action.
    pub proposers: Vec<PoolUser>,
    pub roster: VoterRoster,
    /// Where governance-state artifacts are written; `None` disables them.
    pub artifact_dir: Option<PathBuf>,
    pub poll: PollOpts,
    /// Extra settle time after each observed epoch boundary.
    pub epoch_padding: Duration,
}

impl ScenarioContext {
    pub fn new(
        name: impl Into<String>,
        payer: PoolUser,
        proposers: Vec<PoolUser>,
        roster: VoterRoster,
    ) -> Self {
        Self {
            name: name.into(),
            payer,
            proposers,
            roster,
            artifact_dir: None,
            poll: PollOpts::default(),
            epoch_padding: Duration::from_secs(5),
        }
    }

    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = Some(dir.into());
        self
    }

    pub fn with_poll(mut self, poll: PollOpts) -> Self {
        self.poll = poll;
        self
    }

    pub fn with_epoch_padding(mut self, padding: Duration) -> Self {
        self.epoch_padding = padding;
        self
    }

    /// Dump a governance-state snapshot as an indented JSON artifact named
    /// `<scenario>_<label>_gov_state.json`.
    ///
    /// Artifacts exist for post-mortem inspection only; failing to write
    /// one is logged, never fatal.
    pub fn save_gov_state(&self, label: &str, snapshot: &GovSnapshot) {
        let Some(dir) = &self.artifact_dir else {
            return;
        };
        let path = dir.join(format!("{}_{}_gov_state.json", self.name, label));
        let result = fs::File::create(&path)
            .and_then(|f| serde_json::to_writer_pretty(f, snapshot).map_err(std::io::Error::from));
        match result {
            Ok(()) => tracing::debug!(path = %path.display(), "wrote governance-state artifact"),
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to write governance-state artifact"
            ),
        }
    }
}
