//! Cross product and joins.
//!
//! All joins are a filtered cross product, so they are quadratic in the
//! number of tuples. `inner_join` and `left_outer_join` do not rename
//! anything: the two headings must already be disjoint (see
//! [`Attr::qualified`] for disambiguating a self-join).

use std::collections::BTreeSet;

use kith_core::error::{Error, Result};
use kith_core::expr::{and_, eq, F};
use kith_core::relation::Relation;
use kith_core::schema::{self, Attr};
use kith_core::types::{Scalar, Tuple};

use crate::setops::{diff, union};
use crate::traits::{binary, OpError, Operator};

const LEFT: &str = "left";
const RIGHT: &str = "right";

/// Cartesian product. The headings must be disjoint.
pub fn cross(rel1: &Relation, rel2: &Relation) -> Result<Relation> {
    schema::ensure_disjoint(rel1.attrs(), rel2.attrs())?;
    let attrs: Vec<Attr> = rel1.attrs().iter().chain(rel2.attrs()).cloned().collect();
    let tuples: BTreeSet<Tuple> = rel1
        .tuples()
        .flat_map(|t1| rel2.tuples().map(move |t2| t1.iter().chain(t2).cloned().collect()))
        .collect();

    #[cfg(feature = "tracing")]
    tracing::trace!(left = rel1.len(), right = rel2.len(), rows_out = tuples.len(), "cross");

    Relation::try_from((attrs, tuples))
}

/// Join on every attribute the two relations share by name.
///
/// The result carries `rel1`'s attributes followed by `rel2`'s non-shared
/// attributes. Fails with [`Error::Attribute`] if nothing is shared.
pub fn natural_join(rel1: &Relation, rel2: &Relation) -> Result<Relation> {
    let shared = schema::common(rel1.attrs(), rel2.attrs());
    if shared.is_empty() {
        return Err(no_common_attrs(rel1.attrs(), rel2.attrs()));
    }

    let rel1a = rel1.rename(rel1.attrs().iter().map(left))?;
    let rel2a = rel2.rename(rel2.attrs().iter().map(right))?;

    let joined: Vec<Attr> = rel1a
        .attrs()
        .iter()
        .cloned()
        .chain(
            rel2.attrs()
                .iter()
                .filter(|a| !shared.contains(a))
                .map(right),
        )
        .collect();
    let stripped: Vec<Attr> = joined.iter().map(|a| a.unqualified().clone()).collect();

    let predicate = and_(shared.iter().map(|a| eq(F(left(a)), F(right(a)))));
    let out = cross(&rel1a, &rel2a)?
        .select(&predicate)?
        .project(joined)?
        .rename(stripped)?;

    #[cfg(feature = "tracing")]
    tracing::trace!(shared = shared.len(), rows_out = out.len(), "natural_join");

    Ok(out)
}

/// Cross product filtered by equality on each `(left_attr, right_attr)` pair.
/// Both copies of each join column are kept.
pub fn inner_join<A, B>(
    rel1: &Relation,
    rel2: &Relation,
    attr_pairs: impl IntoIterator<Item = (A, B)>,
) -> Result<Relation>
where
    A: Into<Attr>,
    B: Into<Attr>,
{
    let predicate = and_(attr_pairs.into_iter().map(|(a, b)| eq(F(a), F(b))));
    cross(rel1, rel2)?.select(&predicate)
}

/// Like [`inner_join`], but every `rel1` tuple without a match appears once,
/// padded with nulls for `rel2`'s attributes.
pub fn left_outer_join<A, B>(
    rel1: &Relation,
    rel2: &Relation,
    attr_pairs: impl IntoIterator<Item = (A, B)>,
) -> Result<Relation>
where
    A: Into<Attr>,
    B: Into<Attr>,
{
    let joined = inner_join(rel1, rel2, attr_pairs)?;

    let matched = joined.project(rel1.attrs().to_vec())?;
    let unmatched = diff(rel1, &matched)?;
    let nulls = Relation::new(rel2.attrs().to_vec(), [vec![Scalar::Null; rel2.arity()]])?;
    let padded = cross(&unmatched, &nulls)?;

    #[cfg(feature = "tracing")]
    tracing::trace!(
        matched = joined.len(),
        unmatched = unmatched.len(),
        "left_outer_join"
    );

    union(&joined, &padded)
}

fn left(a: &Attr) -> Attr {
    Attr::qualified(LEFT, a.clone())
}

fn right(a: &Attr) -> Attr {
    Attr::qualified(RIGHT, a.clone())
}

fn no_common_attrs(left: &[Attr], right: &[Attr]) -> Error {
    let list = |attrs: &[Attr]| {
        attrs
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    Error::Attribute(format!(
        "no common attributes between ({}) and ({})",
        list(left),
        list(right)
    ))
}

/// Heading of `left ++ right`, checking that each join attribute exists.
fn plan_equi_join(
    input_attrs: &[&[Attr]],
    on: &[(Attr, Attr)],
    op: &dyn Operator,
) -> std::result::Result<Vec<Attr>, OpError> {
    let (l, r) = binary(op, input_attrs)?;
    schema::ensure_disjoint(l, r)?;
    let attrs: Vec<Attr> = l.iter().chain(r).cloned().collect();
    for (a, b) in on {
        schema::index_of(&attrs, a)?;
        schema::index_of(&attrs, b)?;
    }
    Ok(attrs)
}

#[derive(Debug, Default, Clone)]
pub struct Cross;

impl Operator for Cross {
    fn name(&self) -> &'static str {
        "cross"
    }

    fn inputs(&self) -> usize {
        2
    }

    fn plan(&self, input_attrs: &[&[Attr]]) -> std::result::Result<Vec<Attr>, OpError> {
        plan_equi_join(input_attrs, &[], self)
    }

    fn eval(&self, inputs: &[&Relation]) -> std::result::Result<Relation, OpError> {
        let (l, r) = binary(self, inputs)?;
        Ok(cross(l, r)?)
    }
}

#[derive(Debug, Default, Clone)]
pub struct NaturalJoin;

impl Operator for NaturalJoin {
    fn name(&self) -> &'static str {
        "natural_join"
    }

    fn inputs(&self) -> usize {
        2
    }

    fn plan(&self, input_attrs: &[&[Attr]]) -> std::result::Result<Vec<Attr>, OpError> {
        let (l, r) = binary(self, input_attrs)?;
        let shared = schema::common(l, r);
        if shared.is_empty() {
            return Err(no_common_attrs(l, r).into());
        }
        Ok(l.iter()
            .chain(r.iter().filter(|a| !shared.contains(a)))
            .cloned()
            .collect())
    }

    fn eval(&self, inputs: &[&Relation]) -> std::result::Result<Relation, OpError> {
        let (l, r) = binary(self, inputs)?;
        Ok(natural_join(l, r)?)
    }
}

#[derive(Debug, Default, Clone)]
pub struct InnerJoin {
    pub on: Vec<(Attr, Attr)>,
}

impl Operator for InnerJoin {
    fn name(&self) -> &'static str {
        "inner_join"
    }

    fn inputs(&self) -> usize {
        2
    }

    fn plan(&self, input_attrs: &[&[Attr]]) -> std::result::Result<Vec<Attr>, OpError> {
        plan_equi_join(input_attrs, &self.on, self)
    }

    fn eval(&self, inputs: &[&Relation]) -> std::result::Result<Relation, OpError> {
        let (l, r) = binary(self, inputs)?;
        Ok(inner_join(l, r, self.on.iter().cloned())?)
    }
}

#[derive(Debug, Default, Clone)]
pub struct LeftOuterJoin {
    pub on: Vec<(Attr, Attr)>,
}

impl Operator for LeftOuterJoin {
    fn name(&self) -> &'static str {
        "left_outer_join"
    }

    fn inputs(&self) -> usize {
        2
    }

    fn plan(&self, input_attrs: &[&[Attr]]) -> std::result::Result<Vec<Attr>, OpError> {
        plan_equi_join(input_attrs, &self.on, self)
    }

    fn eval(&self, inputs: &[&Relation]) -> std::result::Result<Relation, OpError> {
        let (l, r) = binary(self, inputs)?;
        Ok(left_outer_join(l, r, self.on.iter().cloned())?)
    }
}
