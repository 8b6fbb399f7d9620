//! Operator trait + common interfaces.
//!
//! Every algebra operator is also available as a value implementing
//! [`Operator`], so a step can be built once, checked against input headings
//! with `plan(...)`, and evaluated later with `eval(...)`.

use kith_core::relation::Relation;
use kith_core::schema::Attr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpError {
    #[error("planning error: {0}")]
    Plan(String),

    #[error(transparent)]
    Relation(#[from] kith_core::error::Error),
}

/// Trait that all operators must implement.
///
/// Invariants:
/// - `eval` never mutates its inputs and always returns a new relation.
/// - `plan` succeeds for a set of headings whenever `eval` could succeed on
///   relations with those headings.
pub trait Operator: Send + Sync + 'static {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// Number of input relations.
    fn inputs(&self) -> usize;

    /// Given input headings, return the output heading, checking every
    /// precondition that does not depend on tuple values.
    fn plan(&self, input_attrs: &[&[Attr]]) -> Result<Vec<Attr>, OpError>;

    /// Evaluate on concrete relations.
    fn eval(&self, inputs: &[&Relation]) -> Result<Relation, OpError>;
}

/// Fetch the single input of a unary operator.
pub(crate) fn unary<'a, T: ?Sized>(op: &dyn Operator, inputs: &[&'a T]) -> Result<&'a T, OpError> {
    match inputs {
        [only] => Ok(*only),
        _ => Err(wrong_inputs(op, inputs.len())),
    }
}

/// Fetch both inputs of a binary operator.
pub(crate) fn binary<'a, T: ?Sized>(
    op: &dyn Operator,
    inputs: &[&'a T],
) -> Result<(&'a T, &'a T), OpError> {
    match inputs {
        [left, right] => Ok((*left, *right)),
        _ => Err(wrong_inputs(op, inputs.len())),
    }
}

fn wrong_inputs(op: &dyn Operator, got: usize) -> OpError {
    OpError::Plan(format!(
        "{} expects {} input(s), got {}",
        op.name(),
        op.inputs(),
        got
    ))
}
