use thiserror::Error;

use crate::expr::aggregate::AggregateKind;
use crate::schema::Attr;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("arity error: expected {expected} values, found {found}")]
    Arity { expected: usize, found: usize },

    #[error("attribute error: {0}")]
    Attribute(String),

    #[error("attribute conflict: {} present on both sides", display_attrs(.0))]
    AttributeConflict(Vec<Attr>),

    #[error("schema mismatch: ({}) vs ({})", display_attrs(.left), display_attrs(.right))]
    SchemaMismatch { left: Vec<Attr>, right: Vec<Attr> },

    #[error("{0} applied to an empty group")]
    EmptyGroup(AggregateKind),

    #[error("type mismatch in '{op}': cannot apply to {lhs} and {rhs}")]
    TypeMismatch {
        op: &'static str,
        lhs: String,
        rhs: String,
    },

    #[error("unknown lookup: {0}")]
    UnknownLookup(String),

    #[error("unknown aggregate: {0}")]
    UnknownAggregate(String),
}

impl Error {
    pub fn missing_attr(attr: &Attr) -> Self {
        Error::Attribute(format!("attribute '{}' not found", attr))
    }
}

fn display_attrs(attrs: &[Attr]) -> String {
    attrs
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
