#![forbid(unsafe_code)]
//! kith-operators: binary relational operators and operator objects.
//!
//! Design intent:
//! - Pure and synchronous; every function takes relations by reference and
//!   returns a freshly materialized relation.
//! - Free functions (`cross`, `natural_join`, ...) are the primary surface.
//!   Each operator also has an [`Operator`] implementation so a step can be
//!   planned against headings before any tuples are touched.

pub mod join;
pub mod setops;
pub mod traits;
pub mod unary;

pub use join::{
    cross, inner_join, left_outer_join, natural_join, Cross, InnerJoin, LeftOuterJoin, NaturalJoin,
};
pub use setops::{diff, intersection, union, Difference, Intersection, Union};
pub use traits::{OpError, Operator};
pub use unary::{GroupBy, Project, Rename, Select};
