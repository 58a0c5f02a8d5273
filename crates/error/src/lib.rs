//! # toolagent-error
//!
//! One shared piece of error machinery used by every error-returning crate
//! in the workspace: [`AggregateError`], the value raised when a combined
//! [`toolagent_result::AgentResult`](../toolagent_result/index.html) carries
//! more than one failure.
//!
//! Everything else — `ToolError`, `WorkflowError`, `ExecutorError` — is a
//! plain `thiserror` enum defined next to the type it describes, the way
//! the rest of this workspace does it. This crate only holds what's
//! genuinely shared.

use std::fmt;

/// One or more errors collected by [`combine`](https://docs.rs/toolagent-result)
/// over a chain of tool calls.
///
/// `unwrap()` on a `Result` whose error slot holds more than one error
/// raises this instead of the bare underlying error, so callers can tell
/// "one tool failed" from "several independent tool calls failed" without
/// losing any of the individual causes.
#[derive(Debug, Clone)]
pub struct AggregateError<E> {
    causes: Vec<E>,
}

impl<E> AggregateError<E> {
    /// Build an aggregate from at least one cause.
    ///
    /// # Panics
    ///
    /// Panics if `causes` is empty — an aggregate with no causes would be
    /// indistinguishable from "ok", which violates the result invariant
    /// this type exists to preserve.
    #[must_use]
    pub fn new(causes: Vec<E>) -> Self {
        assert!(
            !causes.is_empty(),
            "AggregateError must carry at least one cause"
        );
        Self { causes }
    }

    /// The individual causes, in the order they were produced.
    pub fn causes(&self) -> &[E] {
        &self.causes
    }

    /// Number of causes carried.
    #[must_use]
    pub fn len(&self) -> usize {
        self.causes.len()
    }

    /// Always `false` — constructing an empty aggregate panics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Unwrap to the single cause if there is exactly one.
    pub fn into_single(mut self) -> Result<E, Self> {
        if self.causes.len() == 1 {
            Ok(self.causes.pop().expect("len checked above"))
        } else {
            Err(self)
        }
    }
}

impl<E: fmt::Display> fmt::Display for AggregateError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.causes.len() == 1 {
            write!(f, "{}", self.causes[0])
        } else {
            write!(f, "{} combined errors: ", self.causes.len())?;
            for (i, cause) in self.causes.iter().enumerate() {
                if i > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{cause}")?;
            }
            Ok(())
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for AggregateError<E> {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn single_cause_displays_bare() {
        let err = AggregateError::new(vec!["boom".to_string()]);
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn multiple_causes_display_joined() {
        let err = AggregateError::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "2 combined errors: a; b");
    }

    #[test]
    fn into_single_unwraps_exactly_one() {
        let err = AggregateError::new(vec![1]);
        assert_eq!(err.into_single(), Ok(1));
    }

    #[test]
    fn into_single_rejects_many() {
        let err = AggregateError::new(vec![1, 2]);
        assert!(err.into_single().is_err());
    }

    #[test]
    #[should_panic(expected = "at least one cause")]
    fn empty_aggregate_panics() {
        let _err: AggregateError<i32> = AggregateError::new(vec![]);
    }
}
