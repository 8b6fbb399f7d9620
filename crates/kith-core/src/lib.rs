#![forbid(unsafe_code)]
//! kith-core: relation values and the expression layer for kith.
//!
//! This crate holds the immutable [`Relation`](relation::Relation) type, its
//! unary operators (rename, project, select, group_by), and the predicate and
//! aggregate expressions they take. There is **no I/O** and **no shared
//! mutable state** here; every operator returns a new relation.
//!
//! Crates that use this:
//! - kith-operators: binary operators (cross, joins, set operations) and the
//!   `Operator` trait.

pub mod config;
pub mod error;
pub mod expr;
pub mod hash;
pub mod prelude;
pub mod record;
pub mod relation;
pub mod schema;
pub mod types;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
