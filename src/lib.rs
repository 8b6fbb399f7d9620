#![forbid(unsafe_code)]
//! kith: an in-memory relational algebra engine.
//!
//! Relations are immutable sets of equal-length tuples under an ordered list
//! of attributes. Operators never mutate their inputs:
//!
//! ```
//! use kith::prelude::*;
//!
//! let people = Relation::new(["id", "name"], [row![1, "a"], row![2, "b"]])?;
//! let depts = Relation::new(["id", "dept"], [row![1, "x"]])?;
//!
//! let joined = natural_join(&people, &depts)?;
//! assert_eq!(joined, Relation::new(["id", "name", "dept"], [row![1, "a", "x"]])?);
//!
//! let eng = joined.select(&eq(F("dept"), "x"))?;
//! assert_eq!(eng.len(), 1);
//! # Ok::<(), kith::Error>(())
//! ```
//!
//! - [`kith_core`] holds `Relation`, the unary operators and the expression layer.
//! - [`kith_operators`] holds cross product, joins, set operations and the
//!   `Operator` trait.

pub use kith_core;
pub use kith_operators;

pub use kith_core::error::{Error, Result};

pub mod prelude {
    pub use kith_core::prelude::*;
    pub use kith_operators::{
        cross, diff, inner_join, intersection, left_outer_join, natural_join, union, OpError,
        Operator,
    };
}
