//! Convenient re-exports for downstream crates.

pub use crate::config::DisplayConfig;
pub use crate::error::{Error, Result};
pub use crate::expr::{
    and_, avg, contains, count, day, endswith, eq, exact, gt, gte, icontains, iendswith, iexact,
    istartswith, lt, lte, max, min, month, not_, or_, startswith, sum, year, Aggregate,
    AggregateKind, Lookup, Operand, Predicate, F,
};
pub use crate::hash::Hash256;
pub use crate::record::Record;
pub use crate::relation::Relation;
pub use crate::row;
pub use crate::schema::Attr;
pub use crate::types::{Scalar, Tuple};
