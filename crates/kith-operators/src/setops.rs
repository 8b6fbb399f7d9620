//! Union, intersection and difference.
//!
//! Both inputs must have identical headings, attribute order included.

use std::collections::BTreeSet;

use kith_core::error::Result;
use kith_core::relation::Relation;
use kith_core::schema::{self, Attr};
use kith_core::types::Tuple;

use crate::traits::{binary, OpError, Operator};

pub fn union(rel1: &Relation, rel2: &Relation) -> Result<Relation> {
    schema::ensure_same(rel1.attrs(), rel2.attrs())?;
    let tuples: BTreeSet<Tuple> = rel1.tuples().chain(rel2.tuples()).cloned().collect();
    finish("union", rel1, rel2, tuples)
}

pub fn intersection(rel1: &Relation, rel2: &Relation) -> Result<Relation> {
    schema::ensure_same(rel1.attrs(), rel2.attrs())?;
    let tuples: BTreeSet<Tuple> = rel1.tuples().filter(|t| rel2.contains(t)).cloned().collect();
    finish("intersection", rel1, rel2, tuples)
}

pub fn diff(rel1: &Relation, rel2: &Relation) -> Result<Relation> {
    schema::ensure_same(rel1.attrs(), rel2.attrs())?;
    let tuples: BTreeSet<Tuple> = rel1.tuples().filter(|t| !rel2.contains(t)).cloned().collect();
    finish("diff", rel1, rel2, tuples)
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn finish(
    op: &'static str,
    rel1: &Relation,
    rel2: &Relation,
    tuples: BTreeSet<Tuple>,
) -> Result<Relation> {
    #[cfg(feature = "tracing")]
    tracing::trace!(
        op,
        left = rel1.len(),
        right = rel2.len(),
        rows_out = tuples.len(),
        "set operation"
    );

    Relation::try_from((rel1.attrs().to_vec(), tuples))
}

fn plan_same(
    op: &dyn Operator,
    input_attrs: &[&[Attr]],
) -> std::result::Result<Vec<Attr>, OpError> {
    let (l, r) = binary(op, input_attrs)?;
    schema::ensure_same(l, r)?;
    Ok(l.to_vec())
}

macro_rules! set_operator {
    ($ty:ident, $name:literal, $func:ident) => {
        #[derive(Debug, Default, Clone)]
        pub struct $ty;

        impl Operator for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn inputs(&self) -> usize {
                2
            }

            fn plan(&self, input_attrs: &[&[Attr]]) -> std::result::Result<Vec<Attr>, OpError> {
                plan_same(self, input_attrs)
            }

            fn eval(&self, inputs: &[&Relation]) -> std::result::Result<Relation, OpError> {
                let (l, r) = binary(self, inputs)?;
                Ok($func(l, r)?)
            }
        }
    };
}

set_operator!(Union, "union", union);
set_operator!(Intersection, "intersection", intersection);
set_operator!(Difference, "diff", diff);

#[cfg(test)]
mod tests {
    use super::*;
    use kith_core::error::Error;
    use kith_core::row;

    fn r(rows: &[(i64, &str)]) -> Relation {
        Relation::new(["n", "s"], rows.iter().map(|(n, s)| row![*n, *s])).unwrap()
    }

    #[test]
    fn set_semantics() {
        let a = r(&[(1, "a"), (2, "b")]);
        let b = r(&[(2, "b"), (3, "c")]);
        assert_eq!(union(&a, &b).unwrap(), r(&[(1, "a"), (2, "b"), (3, "c")]));
        assert_eq!(intersection(&a, &b).unwrap(), r(&[(2, "b")]));
        assert_eq!(diff(&a, &b).unwrap(), r(&[(1, "a")]));
        assert_eq!(union(&a, &a).unwrap(), a);
        assert!(diff(&a, &a).unwrap().is_empty());
    }

    #[test]
    fn heading_must_match_exactly() {
        let a = r(&[(1, "a")]);
        let swapped = a.rename(["s", "n"]).unwrap();
        assert!(matches!(union(&a, &swapped), Err(Error::SchemaMismatch { .. })));
        assert!(matches!(intersection(&a, &swapped), Err(Error::SchemaMismatch { .. })));
        assert!(matches!(diff(&a, &swapped), Err(Error::SchemaMismatch { .. })));
    }

    #[test]
    fn operator_objects() {
        let a = r(&[(1, "a")]);
        let b = r(&[(2, "b")]);
        assert_eq!(Union.eval(&[&a, &b]).unwrap().len(), 2);
        assert_eq!(Difference.name(), "diff");
        assert_eq!(Intersection.plan(&[a.attrs(), b.attrs()]).unwrap(), a.attrs().to_vec());
    }
}
