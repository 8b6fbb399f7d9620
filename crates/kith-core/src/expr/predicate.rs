//! Boolean predicates over records.

use std::ops::Not;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::expr::lookup::Lookup;
use crate::record::Record;
use crate::schema::Attr;
use crate::types::Scalar;

/// One side of a comparison: a literal value or a reference to a field of
/// the record under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Literal(Scalar),
    Field(Attr),
}

impl Operand {
    pub fn resolve<'a>(&'a self, record: &Record<'a>) -> Result<&'a Scalar> {
        match self {
            Operand::Literal(v) => Ok(v),
            Operand::Field(attr) => record.get(attr),
        }
    }
}

/// Field reference.
#[allow(non_snake_case)]
pub fn F(attr: impl Into<Attr>) -> Operand {
    Operand::Field(attr.into())
}

impl<T: Into<Scalar>> From<T> for Operand {
    fn from(v: T) -> Self {
        Operand::Literal(v.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    Compare {
        lookup: Lookup,
        lhs: Operand,
        rhs: Operand,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn compare(lookup: Lookup, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
        Predicate::Compare {
            lookup,
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    /// Evaluate against one record. Every sub-predicate of a conjunction or
    /// disjunction is evaluated; the first error wins.
    pub fn eval(&self, record: &Record<'_>) -> Result<bool> {
        match self {
            Predicate::Compare { lookup, lhs, rhs } => {
                lookup.apply(lhs.resolve(record)?, rhs.resolve(record)?)
            }
            Predicate::And(ps) => {
                let results = eval_all(ps, record)?;
                Ok(results.into_iter().all(|b| b))
            }
            Predicate::Or(ps) => {
                let results = eval_all(ps, record)?;
                Ok(results.into_iter().any(|b| b))
            }
            Predicate::Not(p) => Ok(!p.eval(record)?),
        }
    }

    /// Every field referenced anywhere in the predicate, in first-seen order.
    pub fn fields(&self) -> Vec<&Attr> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a Attr>) {
        match self {
            Predicate::Compare { lhs, rhs, .. } => {
                for operand in [lhs, rhs] {
                    if let Operand::Field(attr) = operand {
                        if !out.contains(&attr) {
                            out.push(attr);
                        }
                    }
                }
            }
            Predicate::And(ps) | Predicate::Or(ps) => {
                for p in ps {
                    p.collect_fields(out);
                }
            }
            Predicate::Not(p) => p.collect_fields(out),
        }
    }
}

fn eval_all(ps: &[Predicate], record: &Record<'_>) -> Result<Vec<bool>> {
    ps.iter().map(|p| p.eval(record)).collect()
}

impl Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Predicate {
        not_(self)
    }
}

pub fn and_(ps: impl IntoIterator<Item = Predicate>) -> Predicate {
    Predicate::And(ps.into_iter().collect())
}

pub fn or_(ps: impl IntoIterator<Item = Predicate>) -> Predicate {
    Predicate::Or(ps.into_iter().collect())
}

pub fn not_(p: Predicate) -> Predicate {
    Predicate::Not(Box::new(p))
}
