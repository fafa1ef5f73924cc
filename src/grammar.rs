//! Grammar and style checking.
//!
//! The checker is an external service. Only its interface lives here; the
//! LanguageTool client is in the `ost-languagetool` crate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::CheckError;

/// Counts flagged grammar, spelling and style issues in a text.
pub trait GrammarChecker: Send + Sync {
    fn check(&self, text: &str) -> Result<usize, CheckError>;
}

/// A checker with a canned answer, for tests and offline runs.
///
/// It can be told to fail a number of times before answering, and counts
/// how often it was called.
#[derive(Debug, Clone)]
pub struct FixedChecker {
    count: usize,
    failures: usize,
    error: CheckError,
    calls: Arc<AtomicUsize>,
}

impl FixedChecker {
    /// Always reports `count` issues.
    pub fn count(count: usize) -> Self {
        FixedChecker {
            count,
            failures: 0,
            error: CheckError::Transport("unreachable".to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Never answers.
    pub fn failing(error: CheckError) -> Self {
        FixedChecker {
            failures: usize::MAX,
            error,
            ..Self::count(0)
        }
    }

    /// Fail the first `failures` calls, then report `self`'s count.
    pub fn after_failures(mut self, failures: usize) -> Self {
        self.failures = failures;
        self
    }

    /// Calls made so far, across clones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GrammarChecker for FixedChecker {
    fn check(&self, _text: &str) -> Result<usize, CheckError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(self.error.clone())
        } else {
            Ok(self.count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_checker_fails_then_answers() {
        let checker = FixedChecker::count(4).after_failures(1);
        assert_eq!(
            checker.check("some text"),
            Err(CheckError::Transport("unreachable".to_string()))
        );
        assert_eq!(checker.check("some text"), Ok(4));
        assert_eq!(checker.clone().calls(), 2);
    }

    #[test]
    fn failing_checker_never_answers() {
        let checker = FixedChecker::failing(CheckError::Status(503));
        for _ in 0..3 {
            assert_eq!(checker.check("x"), Err(CheckError::Status(503)));
        }
    }
}
