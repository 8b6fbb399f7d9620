//! The `Relation` value: an ordered attribute list and a set of tuples.
//!
//! Relations are immutable. Every operator builds a fresh tuple set from its
//! inputs, so a relation never shares or aliases another's storage.

mod display;
mod unary;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::record::Record;
use crate::schema::{self, Attr};
use crate::types::{Scalar, Tuple};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    attrs: Vec<Attr>,
    tuples: BTreeSet<Tuple>,
}

impl Relation {
    /// Build a relation, collapsing duplicate tuples.
    ///
    /// Fails with [`Error::Arity`] if any tuple's length differs from the
    /// number of attributes.
    pub fn new<A, T>(
        attrs: impl IntoIterator<Item = A>,
        tuples: impl IntoIterator<Item = T>,
    ) -> Result<Self>
    where
        A: Into<Attr>,
        T: Into<Tuple>,
    {
        let attrs = schema::to_attrs(attrs);
        let tuples = tuples
            .into_iter()
            .map(|t| {
                let t: Tuple = t.into();
                if t.len() == attrs.len() {
                    Ok(t)
                } else {
                    Err(Error::Arity {
                        expected: attrs.len(),
                        found: t.len(),
                    })
                }
            })
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(Self { attrs, tuples })
    }

    /// A relation with the given heading and no tuples.
    pub fn empty<A: Into<Attr>>(attrs: impl IntoIterator<Item = A>) -> Self {
        Self {
            attrs: schema::to_attrs(attrs),
            tuples: BTreeSet::new(),
        }
    }

    /// Assemble from parts already known to satisfy the arity invariant.
    pub(crate) fn from_parts(attrs: Vec<Attr>, tuples: BTreeSet<Tuple>) -> Self {
        debug_assert!(tuples.iter().all(|t| t.len() == attrs.len()));
        Self { attrs, tuples }
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn arity(&self) -> usize {
        self.attrs.len()
    }

    /// Tuples in storage order (sorted by [`Scalar`]'s total order).
    pub fn tuples(&self) -> impl ExactSizeIterator<Item = &Tuple> + '_ {
        self.tuples.iter()
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    pub fn contains(&self, tuple: &[Scalar]) -> bool {
        self.tuples.contains(tuple)
    }

    pub fn index_of(&self, attr: &Attr) -> Result<usize> {
        schema::index_of(&self.attrs, attr)
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        self.tuples.iter().map(|t| Record::new(&self.attrs, t))
    }
}

/// Builds a relation directly from a tuple set; used by the binary operators.
impl TryFrom<(Vec<Attr>, BTreeSet<Tuple>)> for Relation {
    type Error = Error;

    fn try_from((attrs, tuples): (Vec<Attr>, BTreeSet<Tuple>)) -> Result<Self> {
        if let Some(bad) = tuples.iter().find(|t| t.len() != attrs.len()) {
            return Err(Error::Arity {
                expected: attrs.len(),
                found: bad.len(),
            });
        }
        Ok(Self::from_parts(attrs, tuples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    #[test]
    fn construction_dedups_and_round_trips() {
        let r = Relation::new(["id", "name"], [row![1, "a"], row![2, "b"], row![1, "a"]]).unwrap();
        assert_eq!(r.attrs(), &[Attr::new("id"), Attr::new("name")]);
        assert_eq!(r.len(), 2);
        assert!(r.contains(&row![2, "b"]));
        assert!(!r.contains(&row![3, "c"]));
    }

    #[test]
    fn arity_mismatch_fails() {
        let err = Relation::new(["id", "name"], [row![1, "a"], row![2]]).unwrap_err();
        assert_eq!(
            err,
            Error::Arity {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn equality_ignores_tuple_order_but_not_attr_order() {
        let a = Relation::new(["x", "y"], [row![1, 2], row![3, 4]]).unwrap();
        let b = Relation::new(["x", "y"], [row![3, 4], row![1, 2]]).unwrap();
        let c = Relation::new(["y", "x"], [row![1, 2], row![3, 4]]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn records_view_tuples_by_name() {
        let r = Relation::new(["id", "name"], [row![1, "a"]]).unwrap();
        let rec = r.records().next().unwrap();
        assert_eq!(rec.get(&"name".into()).unwrap(), &Scalar::Str("a".into()));
    }

    #[test]
    fn try_from_parts_checks_arity() {
        let tuples: BTreeSet<Tuple> = [row![1]].into_iter().collect();
        let res = Relation::try_from((schema::to_attrs(["a", "b"]), tuples));
        assert!(matches!(res, Err(Error::Arity { .. })));
    }
}
