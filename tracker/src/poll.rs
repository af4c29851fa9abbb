//! Bounded condition polling.
//!
//! Chain-state predicates ("the action shows as ratified") can only be
//! observed by re-querying. Polling here is always bounded: running out of
//! attempts is a [`PollError::TimedOut`], reported distinctly from the
//! condition being observed false or the query itself failing.

use std::time::Duration;
use thiserror::Error;

/// Polling bounds.
#[derive(Clone, Copy, Debug)]
pub struct PollOpts {
    pub max_attempts: usize,
    /// Sleep between attempts.
    pub interval: Duration,
}

impl Default for PollOpts {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            interval: Duration::from_secs(2),
        }
    }
}

impl PollOpts {
    /// Bounds suited to unit tests: many attempts, no sleeping.
    pub fn immediate(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            interval: Duration::ZERO,
        }
    }
}

#[derive(Debug, Error)]
pub enum PollError<E> {
    /// The condition never became true within the attempt budget.
    #[error("condition not observed after {attempts} attempts")]
    TimedOut { attempts: usize },

    /// A query failed while polling; propagated unmodified.
    #[error(transparent)]
    Inner(E),
}

/// Re-evaluate `f` until it yields a value, up to `opts.max_attempts`.
///
/// `f` returns `Ok(Some(v))` when the condition holds, `Ok(None)` to keep
/// polling, or `Err` to abort immediately.
pub fn poll_until<T, E>(
    opts: PollOpts,
    mut f: impl FnMut() -> Result<Option<T>, E>,
) -> Result<T, PollError<E>> {
    for attempt in 1..=opts.max_attempts {
        match f() {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {
                tracing::debug!(attempt, max = opts.max_attempts, "condition not yet observed");
                if attempt < opts.max_attempts && !opts.interval.is_zero() {
                    std::thread::sleep(opts.interval);
                }
            }
            Err(e) => return Err(PollError::Inner(e)),
        }
    }
    Err(PollError::TimedOut {
        attempts: opts.max_attempts,
    })
}
