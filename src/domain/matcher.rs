// Comparison between the awaited direction and an observed one.

use super::Direction;

/// How close an observation must be to count as a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Only the exact direction matches; no near-misses.
    #[default]
    Exact,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionMatcher {
    policy: MatchPolicy,
}

impl DirectionMatcher {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Pure and total over every pair of directions.
    pub fn matches(&self, expected: Direction, observed: Direction) -> bool {
        match self.policy {
            MatchPolicy::Exact => expected == observed,
        }
    }
}
