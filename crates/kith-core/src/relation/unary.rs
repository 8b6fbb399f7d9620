//! Single-input operators: rename, project, select, group_by.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::expr::aggregate::Aggregate;
use crate::expr::predicate::Predicate;
use crate::record::Record;
use crate::schema::{self, Attr};
use crate::types::Tuple;

use super::Relation;

impl Relation {
    /// Same tuples under a new heading of equal length.
    pub fn rename<A: Into<Attr>>(
        &self,
        new_attrs: impl IntoIterator<Item = A>,
    ) -> Result<Relation> {
        let new_attrs = schema::to_attrs(new_attrs);
        if new_attrs.len() != self.attrs.len() {
            return Err(Error::Arity {
                expected: self.attrs.len(),
                found: new_attrs.len(),
            });
        }
        Ok(Relation::from_parts(new_attrs, self.tuples.clone()))
    }

    /// Keep the named columns, in the order given; duplicate rows collapse.
    pub fn project<A: Into<Attr>>(&self, attrs: impl IntoIterator<Item = A>) -> Result<Relation> {
        let attrs = schema::to_attrs(attrs);
        let ixs = attrs
            .iter()
            .map(|a| self.index_of(a))
            .collect::<Result<Vec<_>>>()?;

        let tuples: BTreeSet<Tuple> = self
            .tuples
            .iter()
            .map(|t| ixs.iter().map(|&ix| t[ix].clone()).collect())
            .collect();

        #[cfg(feature = "tracing")]
        tracing::trace!(rows_in = self.len(), rows_out = tuples.len(), "project");

        Ok(Relation::from_parts(attrs, tuples))
    }

    /// Tuples whose record satisfies `predicate`.
    ///
    /// Field references are only resolved while evaluating, so a predicate
    /// naming a missing attribute fails here only if some tuple is tested.
    pub fn select(&self, predicate: &Predicate) -> Result<Relation> {
        let mut tuples = BTreeSet::new();
        for t in &self.tuples {
            if predicate.eval(&Record::new(&self.attrs, t))? {
                tuples.insert(t.clone());
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(rows_in = self.len(), rows_out = tuples.len(), "select");

        Ok(Relation::from_parts(self.attrs.clone(), tuples))
    }

    /// One row per distinct value of `grouping_attrs`, followed by one column
    /// per `(aggregate, output_attr)` pair.
    pub fn group_by<A, B>(
        &self,
        grouping_attrs: impl IntoIterator<Item = A>,
        aggregations: impl IntoIterator<Item = (Aggregate, B)>,
    ) -> Result<Relation>
    where
        A: Into<Attr>,
        B: Into<Attr>,
    {
        let grouping_attrs = schema::to_attrs(grouping_attrs);
        let (aggrs, out_attrs): (Vec<Aggregate>, Vec<Attr>) = aggregations
            .into_iter()
            .map(|(aggr, name)| (aggr, name.into()))
            .unzip();

        let ixs = grouping_attrs
            .iter()
            .map(|a| self.index_of(a))
            .collect::<Result<Vec<_>>>()?;

        let mut groups: BTreeMap<Tuple, Vec<Record<'_>>> = BTreeMap::new();
        for t in &self.tuples {
            let key: Tuple = ixs.iter().map(|&ix| t[ix].clone()).collect();
            groups
                .entry(key)
                .or_default()
                .push(Record::new(&self.attrs, t));
        }

        let mut tuples = BTreeSet::new();
        for (mut key, group) in groups {
            for aggr in &aggrs {
                key.push(aggr.apply(&group)?);
            }
            tuples.insert(key);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(rows_in = self.len(), groups = tuples.len(), "group_by");

        let mut attrs = grouping_attrs;
        attrs.extend(out_attrs);
        Ok(Relation::from_parts(attrs, tuples))
    }
}
