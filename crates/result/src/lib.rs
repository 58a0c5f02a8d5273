//! # toolagent-result
//!
//! The uniform success/error value every tool call and workflow step
//! produces. [`AgentResult<T, E>`] is deliberately not `std::result::Result`:
//! besides a single value or a single error it can also hold *multiple*
//! values and errors at once, produced by [`combine`](AgentResult::combine)
//! (the `|` operator) chaining several tool calls together.
//!
//! Exactly one of "carries values" / "carries errors" is ever populated in
//! the sense that matters for [`is_ok`](AgentResult::is_ok): a result is ok
//! iff its error list is empty, regardless of how many values it carries.

use toolagent_error::AggregateError;

/// What [`AgentResult::unwrap`] hands back on success.
///
/// A plain tool call unwraps to `Single`; the result of one or more
/// `combine`/`|` calls unwraps to `Combined`, preserving left-to-right
/// order. Modeled as an explicit enum rather than a dynamically-typed
/// tuple because Rust has no value-level heterogeneous tuple to mirror
/// the original's runtime-typed return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The value of a single, uncombined result.
    Single(T),
    /// The values accumulated by one or more combinations, in arrival order.
    Combined(Vec<T>),
}

impl<T> Outcome<T> {
    /// Flatten to a `Vec`, regardless of whether this was a single value.
    pub fn into_values(self) -> Vec<T> {
        match self {
            Self::Single(v) => vec![v],
            Self::Combined(vs) => vs,
        }
    }

    /// The single value, if this outcome is not combined.
    pub fn single(self) -> Option<T> {
        match self {
            Self::Single(v) => Some(v),
            Self::Combined(_) => None,
        }
    }
}

/// A success/error value with a combine algebra.
///
/// Produced by the tool wrapper (always [`AgentResult::ok`] or
/// [`AgentResult::err`]) or by combining two existing results with
/// [`combine`](AgentResult::combine) / `|`. Never mutated after
/// construction — every operation consumes `self` and returns a new value.
#[derive(Debug, Clone)]
pub struct AgentResult<T, E> {
    values: Vec<T>,
    errors: Vec<E>,
}

impl<T, E> AgentResult<T, E> {
    /// A single successful value.
    pub fn ok(value: T) -> Self {
        Self {
            values: vec![value],
            errors: Vec::new(),
        }
    }

    /// A single error.
    pub fn err(error: E) -> Self {
        Self {
            values: Vec::new(),
            errors: vec![error],
        }
    }

    /// `true` iff no error is carried, singly or combined.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// `true` iff at least one error is carried.
    #[must_use]
    pub fn is_err(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The carried errors, in arrival order. Empty iff [`is_ok`](Self::is_ok).
    pub fn errors(&self) -> &[E] {
        &self.errors
    }

    /// The carried values, in arrival order. May be non-empty even when
    /// [`is_err`](Self::is_err) — a combine of an ok and an err result keeps
    /// the ok side's value in this list; only [`unwrap`](Self::unwrap) and
    /// [`into_result`](Self::into_result) treat that as failure.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Merge two results: concatenate their values, concatenate their
    /// errors. Associative and order-preserving on values; the error list
    /// accumulates the same way. There is no identity element — an "empty"
    /// result does not exist at this level, so `combine` is only ever
    /// called on two already-constructed results.
    #[must_use]
    pub fn combine(mut self, other: Self) -> Self {
        self.values.extend(other.values);
        self.errors.extend(other.errors);
        self
    }

    /// Convert to a plain `Result`, the idiomatic entry point for callers
    /// that don't need the panic-on-error semantics of [`unwrap`](Self::unwrap).
    ///
    /// On success returns [`Outcome::Single`] if exactly one value was
    /// carried, [`Outcome::Combined`] otherwise (including the degenerate
    /// case of zero values, which cannot be reached from [`ok`](Self::ok)
    /// or [`combine`](Self::combine) but is kept total rather than panicking).
    /// On failure returns the lone error directly if there is exactly one,
    /// or an [`AggregateError`] if there is more than one.
    pub fn into_result(self) -> Result<Outcome<T>, AggregateErrorOrSingle<E>> {
        if self.errors.is_empty() {
            let outcome = match <[T; 1]>::try_from(self.values) {
                Ok([v]) => Outcome::Single(v),
                Err(values) => Outcome::Combined(values),
            };
            Ok(outcome)
        } else if self.errors.len() == 1 {
            Err(AggregateErrorOrSingle::Single(
                self.errors.into_iter().next().expect("len checked above"),
            ))
        } else {
            Err(AggregateErrorOrSingle::Aggregate(AggregateError::new(
                self.errors,
            )))
        }
    }

    /// Returns the carried value (or combined values) on success.
    ///
    /// # Panics
    ///
    /// Panics if this result carries one or more errors. Mirrors
    /// `Result::unwrap`'s convention of panicking with the failure's
    /// `Debug` rendering rather than returning a `Result`; use
    /// [`into_result`](Self::into_result) to handle the error instead.
    pub fn unwrap(self) -> Outcome<T>
    where
        E: std::fmt::Debug,
    {
        match self.into_result() {
            Ok(outcome) => outcome,
            Err(AggregateErrorOrSingle::Single(e)) => {
                panic!("called `AgentResult::unwrap()` on an err value: {e:?}")
            }
            Err(AggregateErrorOrSingle::Aggregate(e)) => {
                panic!("called `AgentResult::unwrap()` on a combined err value: {e:?}")
            }
        }
    }
}

/// The error side of [`AgentResult::into_result`]: either the lone error a
/// single tool call produced, or an [`AggregateError`] gathered from a
/// combine chain.
#[derive(Debug, Clone)]
pub enum AggregateErrorOrSingle<E> {
    /// Exactly one error was carried.
    Single(E),
    /// More than one error was carried, in arrival order.
    Aggregate(AggregateError<E>),
}

impl<E: std::fmt::Display> std::fmt::Display for AggregateErrorOrSingle<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(e) => write!(f, "{e}"),
            Self::Aggregate(e) => write!(f, "{e}"),
        }
    }
}

impl<E: std::fmt::Debug + std::fmt::Display> std::error::Error for AggregateErrorOrSingle<E> {}

impl<T, E> std::ops::BitOr for AgentResult<T, E> {
    type Output = Self;

    /// `a | b` is `a.combine(b)` — the workflow transformer treats any
    /// assignment through this operator as a combine-assignment and yields
    /// its result just like a tool call.
    fn bitor(self, rhs: Self) -> Self::Output {
        self.combine(rhs)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ok_is_ok_and_unwraps_single() {
        let r: AgentResult<i32, String> = AgentResult::ok(5);
        assert!(r.is_ok());
        assert!(!r.is_err());
        assert_eq!(r.unwrap(), Outcome::Single(5));
    }

    #[test]
    fn err_is_err() {
        let r: AgentResult<i32, String> = AgentResult::err("boom".to_string());
        assert!(r.is_err());
        assert!(!r.is_ok());
    }

    #[test]
    fn combine_two_oks_concatenates_values_in_order() {
        let a: AgentResult<&str, String> = AgentResult::ok("a");
        let b: AgentResult<&str, String> = AgentResult::ok("b");
        let combined = a.combine(b);
        assert!(combined.is_ok());
        assert_eq!(combined.unwrap(), Outcome::Combined(vec!["a", "b"]));
    }

    #[test]
    fn combine_ok_and_err_is_err() {
        let a: AgentResult<&str, &str> = AgentResult::ok("a");
        let b: AgentResult<&str, &str> = AgentResult::err("e");
        let combined = a.combine(b);
        assert!(combined.is_err());
        assert_eq!(combined.errors(), &["e"]);
    }

    #[test]
    fn combine_two_errs_accumulates_both() {
        let a: AgentResult<&str, &str> = AgentResult::err("e1");
        let b: AgentResult<&str, &str> = AgentResult::err("e2");
        let combined = a.combine(b);
        assert_eq!(combined.errors(), &["e1", "e2"]);
    }

    #[test]
    fn bitor_operator_matches_combine() {
        let a: AgentResult<i32, String> = AgentResult::ok(1);
        let b: AgentResult<i32, String> = AgentResult::ok(2);
        let combined = a | b;
        assert_eq!(combined.unwrap(), Outcome::Combined(vec![1, 2]));
    }

    #[test]
    fn combine_is_associative_over_values() {
        let a: AgentResult<i32, String> = AgentResult::ok(1);
        let b: AgentResult<i32, String> = AgentResult::ok(2);
        let c: AgentResult<i32, String> = AgentResult::ok(3);

        let left = a.clone().combine(b.clone()).combine(c.clone());
        let right = a.combine(b.combine(c));

        assert_eq!(left.unwrap(), right.unwrap());
    }

    #[test]
    fn combine_is_associative_over_errors() {
        let a: AgentResult<i32, &str> = AgentResult::err("e1");
        let b: AgentResult<i32, &str> = AgentResult::err("e2");
        let c: AgentResult<i32, &str> = AgentResult::err("e3");

        let left = a.clone().combine(b.clone()).combine(c.clone());
        let right = a.combine(b.combine(c));

        assert_eq!(left.errors(), right.errors());
        assert_eq!(left.errors(), &["e1", "e2", "e3"]);
    }

    #[test]
    fn into_result_single_error_is_not_aggregate() {
        let r: AgentResult<i32, String> = AgentResult::err("e".to_string());
        match r.into_result() {
            Err(AggregateErrorOrSingle::Single(e)) => assert_eq!(e, "e"),
            other => panic!("expected Single, got {other:?}"),
        }
    }

    #[test]
    fn into_result_multiple_errors_is_aggregate() {
        let a: AgentResult<i32, &str> = AgentResult::err("e1");
        let b: AgentResult<i32, &str> = AgentResult::err("e2");
        match a.combine(b).into_result() {
            Err(AggregateErrorOrSingle::Aggregate(agg)) => assert_eq!(agg.len(), 2),
            other => panic!("expected Aggregate, got {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "on an err value")]
    fn unwrap_panics_on_single_error() {
        let r: AgentResult<i32, String> = AgentResult::err("boom".to_string());
        let _ = r.unwrap();
    }
}
