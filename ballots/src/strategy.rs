//! Pluggable vote-distribution strategies.
//!
//! The submission pipeline never inspects how choices were distributed; any
//! alternate distribution can be substituted by implementing
//! [`VoteStrategy`].

use govdrill_types::Choice;

/// Maps a member's position to a vote choice.
///
/// `index` is 1-based, following the member's position in its class's
/// stable order; `total` is the class size.
pub trait VoteStrategy {
    fn classify(&self, index: usize, total: usize) -> Choice;
}

/// The standard index-threshold scheme: members `1..=yes_count` vote Yes,
/// the rest vote No.
#[derive(Clone, Copy, Debug)]
pub struct FixedThreshold {
    pub yes_count: usize,
}

impl FixedThreshold {
    pub fn new(yes_count: usize) -> Self {
        Self { yes_count }
    }
}

impl VoteStrategy for FixedThreshold {
    fn classify(&self, index: usize, _total: usize) -> Choice {
        if index <= self.yes_count {
            Choice::Yes
        } else {
            Choice::No
        }
    }
}

/// Approving mix with abstainers: index 1 and even indices vote Yes,
/// indices divisible by 3 vote No, the rest abstain.
///
/// A correctness probe: if the ledger ever counted Abstain as No, the Yes
/// votes alone still clear the threshold and the discrepancy shows up as a
/// failed ratification. Not a production voting rule.
#[derive(Clone, Copy, Debug, Default)]
pub struct YesAbstainProbe;

impl VoteStrategy for YesAbstainProbe {
    fn classify(&self, index: usize, _total: usize) -> Choice {
        if index == 1 || index % 2 == 0 {
            Choice::Yes
        } else if index % 3 == 0 {
            Choice::No
        } else {
            Choice::Abstain
        }
    }
}

/// Disapproving mirror of [`YesAbstainProbe`]: index 1 and even indices
/// vote No, indices divisible by 3 vote Yes, the rest abstain.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAbstainProbe;

impl VoteStrategy for NoAbstainProbe {
    fn classify(&self, index: usize, _total: usize) -> Choice {
        if index == 1 || index % 2 == 0 {
            Choice::No
        } else if index % 3 == 0 {
            Choice::Yes
        } else {
            Choice::Abstain
        }
    }
}

/// Marks every third member (1-based) as not voting at all, delegating the
/// rest to the wrapped strategy.
///
/// Verifies that a non-voting member's ballot is excluded from the tally,
/// not counted as No.
#[derive(Clone, Copy, Debug)]
pub struct SkipEveryThird<S>(pub S);

impl<S: VoteStrategy> VoteStrategy for SkipEveryThird<S> {
    fn classify(&self, index: usize, total: usize) -> Choice {
        if index % 3 == 0 {
            Choice::Skip
        } else {
            self.0.classify(index, total)
        }
    }
}
