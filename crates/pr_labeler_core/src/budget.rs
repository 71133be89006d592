//! Operation budget accounting.
//!
//! GitHub aborts a workflow that exceeds its API rate limit. The labeler bounds the number
//! of remote calls per run instead: every call is charged against an [`OperationBudget`]
//! and the run stops once nothing is left.

#[cfg(test)]
#[path = "budget_tests.rs"]
mod tests;

/// A counter of the remote calls a run may still make.
///
/// Callers check [`exhausted`](Self::exhausted) before making a call and
/// [`charge_one`](Self::charge_one) after each call that was actually made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationBudget {
    initial: i64,
    remaining: i64,
}

impl OperationBudget {
    pub fn new(operations: i64) -> Self {
        Self {
            initial: operations,
            remaining: operations,
        }
    }

    /// Deducts `n` operations and returns what is left. May go below zero.
    pub fn charge(&mut self, n: i64) -> i64 {
        self.remaining = self.remaining.saturating_sub(n);
        self.remaining
    }

    /// Deducts a single operation and returns what is left.
    pub fn charge_one(&mut self) -> i64 {
        self.charge(1)
    }

    /// Returns `true` once no operations are left.
    pub fn exhausted(&self) -> bool {
        self.remaining <= 0
    }

    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// The budget the run started with.
    pub fn initial(&self) -> i64 {
        self.initial
    }

    /// Operations charged so far.
    pub fn spent(&self) -> i64 {
        self.initial.saturating_sub(self.remaining)
    }
}
