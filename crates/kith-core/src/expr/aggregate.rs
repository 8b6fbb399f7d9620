//! Aggregate reductions applied to one attribute across a group of records.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::expr::lookup::{compare_values, mismatch};
use crate::record::Record;
use crate::schema::Attr;
use crate::types::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateKind {
    Sum,
    Min,
    Max,
    Count,
    Avg,
}

impl AggregateKind {
    pub const ALL: [AggregateKind; 5] = [
        AggregateKind::Sum,
        AggregateKind::Min,
        AggregateKind::Max,
        AggregateKind::Count,
        AggregateKind::Avg,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AggregateKind::Sum => "sum",
            AggregateKind::Min => "min",
            AggregateKind::Max => "max",
            AggregateKind::Count => "count",
            AggregateKind::Avg => "avg",
        }
    }

    /// Reduce a list of values.
    ///
    /// `count` and `sum` are defined on an empty list (0); `min`, `max` and
    /// `avg` fail with [`Error::EmptyGroup`].
    pub fn reduce(self, values: &[&Scalar]) -> Result<Scalar> {
        match self {
            AggregateKind::Count => Ok(Scalar::I64(values.len() as i64)),
            AggregateKind::Sum => sum_values(values),
            AggregateKind::Avg => {
                if values.is_empty() {
                    return Err(Error::EmptyGroup(self));
                }
                let total = sum_values(values).map_err(|e| match e {
                    Error::TypeMismatch { lhs, rhs, .. } => Error::TypeMismatch {
                        op: "avg",
                        lhs,
                        rhs,
                    },
                    other => other,
                })?;
                let total = total.as_f64().unwrap_or(f64::NAN);
                Ok(Scalar::F64(total / values.len() as f64))
            }
            AggregateKind::Min => extreme(self, values, Ordering::Less),
            AggregateKind::Max => extreme(self, values, Ordering::Greater),
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AggregateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AggregateKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| Error::UnknownAggregate(s.to_string()))
    }
}

/// An aggregate bound to the source attribute it reduces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub kind: AggregateKind,
    pub attr: Attr,
}

impl Aggregate {
    pub fn new(kind: AggregateKind, attr: impl Into<Attr>) -> Self {
        Self {
            kind,
            attr: attr.into(),
        }
    }

    pub fn apply(&self, group: &[Record<'_>]) -> Result<Scalar> {
        let values = group
            .iter()
            .map(|r| r.get(&self.attr))
            .collect::<Result<Vec<_>>>()?;
        self.kind.reduce(&values)
    }
}

pub fn sum(attr: impl Into<Attr>) -> Aggregate {
    Aggregate::new(AggregateKind::Sum, attr)
}

pub fn min(attr: impl Into<Attr>) -> Aggregate {
    Aggregate::new(AggregateKind::Min, attr)
}

pub fn max(attr: impl Into<Attr>) -> Aggregate {
    Aggregate::new(AggregateKind::Max, attr)
}

pub fn count(attr: impl Into<Attr>) -> Aggregate {
    Aggregate::new(AggregateKind::Count, attr)
}

pub fn avg(attr: impl Into<Attr>) -> Aggregate {
    Aggregate::new(AggregateKind::Avg, attr)
}

/// Integer sum while every input is `I64` and the total fits; switches to
/// `F64` on the first float or on overflow.
fn sum_values(values: &[&Scalar]) -> Result<Scalar> {
    let mut acc = Scalar::I64(0);
    for v in values {
        acc = match (&acc, v) {
            (Scalar::I64(a), Scalar::I64(b)) => match a.checked_add(*b) {
                Some(total) => Scalar::I64(total),
                None => Scalar::F64(*a as f64 + *b as f64),
            },
            (Scalar::I64(a), Scalar::F64(b)) => Scalar::F64(*a as f64 + b),
            (Scalar::F64(a), Scalar::I64(b)) => Scalar::F64(a + *b as f64),
            (Scalar::F64(a), Scalar::F64(b)) => Scalar::F64(a + b),
            _ => return Err(mismatch("sum", &acc, v)),
        };
    }
    Ok(acc)
}

fn extreme(kind: AggregateKind, values: &[&Scalar], wanted: Ordering) -> Result<Scalar> {
    let (first, rest) = values.split_first().ok_or(Error::EmptyGroup(kind))?;
    let mut best = *first;
    for v in rest {
        if compare_values(kind.name(), v, best)? == wanted {
            best = *v;
        }
    }
    Ok(best.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::to_attrs;

    fn vals(xs: &[Scalar]) -> Vec<&Scalar> {
        xs.iter().collect()
    }

    #[test]
    fn reductions() {
        let xs = [Scalar::I64(4), Scalar::I64(1), Scalar::I64(7)];
        let v = vals(&xs);
        assert_eq!(AggregateKind::Sum.reduce(&v).unwrap(), Scalar::I64(12));
        assert_eq!(AggregateKind::Min.reduce(&v).unwrap(), Scalar::I64(1));
        assert_eq!(AggregateKind::Max.reduce(&v).unwrap(), Scalar::I64(7));
        assert_eq!(AggregateKind::Count.reduce(&v).unwrap(), Scalar::I64(3));
        assert_eq!(AggregateKind::Avg.reduce(&v).unwrap(), Scalar::F64(4.0));
    }

    #[test]
    fn sum_promotes_to_float() {
        let xs = [Scalar::I64(1), Scalar::F64(0.5)];
        assert_eq!(AggregateKind::Sum.reduce(&vals(&xs)).unwrap(), Scalar::F64(1.5));
    }

    #[test]
    fn empty_groups() {
        assert_eq!(AggregateKind::Count.reduce(&[]).unwrap(), Scalar::I64(0));
        assert_eq!(AggregateKind::Sum.reduce(&[]).unwrap(), Scalar::I64(0));
        for kind in [AggregateKind::Min, AggregateKind::Max, AggregateKind::Avg] {
            assert_eq!(kind.reduce(&[]), Err(Error::EmptyGroup(kind)));
        }
    }

    #[test]
    fn non_numeric_sum_fails() {
        let xs = [Scalar::I64(1), Scalar::Str("x".into())];
        assert!(matches!(
            AggregateKind::Sum.reduce(&vals(&xs)),
            Err(Error::TypeMismatch { op: "sum", .. })
        ));
        let xs = [Scalar::Null];
        assert!(matches!(
            AggregateKind::Avg.reduce(&vals(&xs)),
            Err(Error::TypeMismatch { op: "avg", .. })
        ));
    }

    #[test]
    fn integer_overflow_promotes_to_float() {
        let xs = [Scalar::I64(i64::MAX), Scalar::I64(1)];
        let v = vals(&xs);
        assert!(matches!(
            AggregateKind::Sum.reduce(&v).unwrap(),
            Scalar::F64(f) if f == 9_223_372_036_854_775_808.0
        ));
        assert!(matches!(
            AggregateKind::Avg.reduce(&v).unwrap(),
            Scalar::F64(f) if f == 4_611_686_018_427_387_904.0
        ));

        let xs = [Scalar::I64(i64::MIN), Scalar::I64(-1)];
        assert!(matches!(
            AggregateKind::Sum.reduce(&vals(&xs)).unwrap(),
            Scalar::F64(f) if f < 0.0
        ));
    }

    #[test]
    fn min_max_over_strings() {
        let xs = [Scalar::Str("pear".into()), Scalar::Str("apple".into())];
        assert_eq!(
            AggregateKind::Min.reduce(&vals(&xs)).unwrap(),
            Scalar::Str("apple".into())
        );
    }

    #[test]
    fn apply_reads_the_bound_attribute() {
        let attrs = to_attrs(["g", "v"]);
        let rows = [
            vec![Scalar::I64(1), Scalar::I64(10)],
            vec![Scalar::I64(1), Scalar::I64(20)],
        ];
        let group: Vec<Record<'_>> = rows.iter().map(|t| Record::new(&attrs, t)).collect();
        assert_eq!(sum("v").apply(&group).unwrap(), Scalar::I64(30));
        assert!(matches!(max("w").apply(&group), Err(Error::Attribute(_))));
    }

    #[test]
    fn registry_by_name() {
        assert_eq!("avg".parse::<AggregateKind>().unwrap(), AggregateKind::Avg);
        assert!("median".parse::<AggregateKind>().is_err());
    }
}
