//! Predicate and aggregate expressions used by `select` and `group_by`.
//!
//! Everything here evaluates against a [`Record`](crate::record::Record),
//! never against raw positional tuples.

pub mod aggregate;
pub mod lookup;
pub mod predicate;

pub use aggregate::{avg, count, max, min, sum, Aggregate, AggregateKind};
pub use lookup::{
    contains, day, endswith, eq, exact, gt, gte, icontains, iendswith, iexact, istartswith, lt,
    lte, month, startswith, year, Lookup,
};
pub use predicate::{and_, not_, or_, Operand, Predicate, F};
