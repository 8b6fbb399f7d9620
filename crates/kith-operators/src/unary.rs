//! Operator objects wrapping the single-input `Relation` methods.

use kith_core::error::Error;
use kith_core::expr::{Aggregate, Predicate};
use kith_core::relation::Relation;
use kith_core::schema::{self, Attr};

use crate::traits::{unary, OpError, Operator};

#[derive(Debug, Default, Clone)]
pub struct Rename {
    pub attrs: Vec<Attr>,
}

impl Operator for Rename {
    fn name(&self) -> &'static str {
        "rename"
    }

    fn inputs(&self) -> usize {
        1
    }

    fn plan(&self, input_attrs: &[&[Attr]]) -> Result<Vec<Attr>, OpError> {
        let input = unary(self, input_attrs)?;
        if input.len() != self.attrs.len() {
            return Err(Error::Arity {
                expected: input.len(),
                found: self.attrs.len(),
            }
            .into());
        }
        Ok(self.attrs.clone())
    }

    fn eval(&self, inputs: &[&Relation]) -> Result<Relation, OpError> {
        Ok(unary(self, inputs)?.rename(self.attrs.iter())?)
    }
}

#[derive(Debug, Default, Clone)]
pub struct Project {
    pub attrs: Vec<Attr>,
}

impl Operator for Project {
    fn name(&self) -> &'static str {
        "project"
    }

    fn inputs(&self) -> usize {
        1
    }

    fn plan(&self, input_attrs: &[&[Attr]]) -> Result<Vec<Attr>, OpError> {
        let input = unary(self, input_attrs)?;
        for a in &self.attrs {
            schema::index_of(input, a)?;
        }
        Ok(self.attrs.clone())
    }

    fn eval(&self, inputs: &[&Relation]) -> Result<Relation, OpError> {
        Ok(unary(self, inputs)?.project(self.attrs.iter())?)
    }
}

#[derive(Debug, Clone)]
pub struct Select {
    pub predicate: Predicate,
}

impl Operator for Select {
    fn name(&self) -> &'static str {
        "select"
    }

    fn inputs(&self) -> usize {
        1
    }

    /// Planning checks every field the predicate references, even though
    /// evaluation on an empty input would not.
    fn plan(&self, input_attrs: &[&[Attr]]) -> Result<Vec<Attr>, OpError> {
        let input = unary(self, input_attrs)?;
        for a in self.predicate.fields() {
            schema::index_of(input, a)?;
        }
        Ok(input.to_vec())
    }

    fn eval(&self, inputs: &[&Relation]) -> Result<Relation, OpError> {
        Ok(unary(self, inputs)?.select(&self.predicate)?)
    }
}

#[derive(Debug, Default, Clone)]
pub struct GroupBy {
    pub grouping: Vec<Attr>,
    pub aggregations: Vec<(Aggregate, Attr)>,
}

impl Operator for GroupBy {
    fn name(&self) -> &'static str {
        "group_by"
    }

    fn inputs(&self) -> usize {
        1
    }

    fn plan(&self, input_attrs: &[&[Attr]]) -> Result<Vec<Attr>, OpError> {
        let input = unary(self, input_attrs)?;
        for a in self
            .grouping
            .iter()
            .chain(self.aggregations.iter().map(|(aggr, _)| &aggr.attr))
        {
            schema::index_of(input, a)?;
        }
        Ok(self
            .grouping
            .iter()
            .chain(self.aggregations.iter().map(|(_, out)| out))
            .cloned()
            .collect())
    }

    fn eval(&self, inputs: &[&Relation]) -> Result<Relation, OpError> {
        Ok(unary(self, inputs)?.group_by(self.grouping.iter(), self.aggregations.iter().cloned())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kith_core::expr::{gt, sum, F};
    use kith_core::row;

    fn sales() -> Relation {
        Relation::new(
            ["region", "amount"],
            [row!["n", 10], row!["n", 5], row!["s", 7]],
        )
        .unwrap()
    }

    #[test]
    fn plan_matches_eval_heading() {
        let r = sales();
        let ops: Vec<Box<dyn Operator>> = vec![
            Box::new(Rename {
                attrs: schema::to_attrs(["r", "a"]),
            }),
            Box::new(Project {
                attrs: schema::to_attrs(["amount"]),
            }),
            Box::new(Select {
                predicate: gt(F("amount"), 6),
            }),
            Box::new(GroupBy {
                grouping: schema::to_attrs(["region"]),
                aggregations: vec![(sum("amount"), Attr::new("total"))],
            }),
        ];
        for op in &ops {
            let planned = op.plan(&[r.attrs()]).unwrap();
            let out = op.eval(&[&r]).unwrap();
            assert_eq!(planned, out.attrs(), "{}", op.name());
        }
    }

    #[test]
    fn plan_reports_missing_attributes() {
        let r = sales();
        let select = Select {
            predicate: gt(F("price"), 1),
        };
        assert!(matches!(
            select.plan(&[r.attrs()]),
            Err(OpError::Relation(Error::Attribute(_)))
        ));
        let group = GroupBy {
            grouping: schema::to_attrs(["region"]),
            aggregations: vec![(sum("price"), Attr::new("total"))],
        };
        assert!(group.plan(&[r.attrs()]).is_err());
        let rename = Rename {
            attrs: schema::to_attrs(["only"]),
        };
        assert!(matches!(
            rename.plan(&[r.attrs()]),
            Err(OpError::Relation(Error::Arity { .. }))
        ));
    }

    #[test]
    fn group_by_eval() {
        let op = GroupBy {
            grouping: schema::to_attrs(["region"]),
            aggregations: vec![(sum("amount"), Attr::new("total"))],
        };
        let out = op.eval(&[&sales()]).unwrap();
        assert_eq!(
            out,
            Relation::new(["region", "total"], [row!["n", 15], row!["s", 7]]).unwrap()
        );
    }
}
