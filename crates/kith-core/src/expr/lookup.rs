//! Comparison lookups: the binary tests a predicate can make between two operands.
//!
//! `Lookup` is a closed set. Names (`"exact"`, `"icontains"`, ...) resolve
//! through `FromStr`, with `"eq"` accepted as an alias for `exact`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::expr::predicate::{Operand, Predicate};
use crate::types::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lookup {
    Exact,
    IExact,
    Contains,
    IContains,
    Gt,
    Gte,
    Lt,
    Lte,
    StartsWith,
    EndsWith,
    IStartsWith,
    IEndsWith,
    Year,
    Month,
    Day,
}

impl Lookup {
    pub const ALL: [Lookup; 15] = [
        Lookup::Exact,
        Lookup::IExact,
        Lookup::Contains,
        Lookup::IContains,
        Lookup::Gt,
        Lookup::Gte,
        Lookup::Lt,
        Lookup::Lte,
        Lookup::StartsWith,
        Lookup::EndsWith,
        Lookup::IStartsWith,
        Lookup::IEndsWith,
        Lookup::Year,
        Lookup::Month,
        Lookup::Day,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Lookup::Exact => "exact",
            Lookup::IExact => "iexact",
            Lookup::Contains => "contains",
            Lookup::IContains => "icontains",
            Lookup::Gt => "gt",
            Lookup::Gte => "gte",
            Lookup::Lt => "lt",
            Lookup::Lte => "lte",
            Lookup::StartsWith => "startswith",
            Lookup::EndsWith => "endswith",
            Lookup::IStartsWith => "istartswith",
            Lookup::IEndsWith => "iendswith",
            Lookup::Year => "year",
            Lookup::Month => "month",
            Lookup::Day => "day",
        }
    }

    /// Evaluate the lookup on two resolved values.
    pub fn apply(self, lhs: &Scalar, rhs: &Scalar) -> Result<bool> {
        let op = self.name();
        match self {
            Lookup::Exact => Ok(values_equal(lhs, rhs)),
            Lookup::IExact => {
                let (l, r) = strings(op, lhs, rhs)?;
                Ok(l.to_lowercase() == r.to_lowercase())
            }
            Lookup::Contains => {
                let (l, r) = strings(op, lhs, rhs)?;
                Ok(l.contains(r))
            }
            Lookup::IContains => {
                let (l, r) = strings(op, lhs, rhs)?;
                Ok(l.to_lowercase().contains(&r.to_lowercase()))
            }
            Lookup::Gt => Ok(compare_values(op, lhs, rhs)? == Ordering::Greater),
            Lookup::Gte => Ok(compare_values(op, lhs, rhs)? != Ordering::Less),
            Lookup::Lt => Ok(compare_values(op, lhs, rhs)? == Ordering::Less),
            Lookup::Lte => Ok(compare_values(op, lhs, rhs)? != Ordering::Greater),
            Lookup::StartsWith => {
                let (l, r) = strings(op, lhs, rhs)?;
                Ok(l.starts_with(r))
            }
            Lookup::EndsWith => {
                let (l, r) = strings(op, lhs, rhs)?;
                Ok(l.ends_with(r))
            }
            Lookup::IStartsWith => {
                let (l, r) = strings(op, lhs, rhs)?;
                Ok(l.to_lowercase().starts_with(&r.to_lowercase()))
            }
            Lookup::IEndsWith => {
                let (l, r) = strings(op, lhs, rhs)?;
                Ok(l.to_lowercase().ends_with(&r.to_lowercase()))
            }
            Lookup::Year | Lookup::Month | Lookup::Day => {
                let date = match (lhs, rhs) {
                    (Scalar::Date(d), Scalar::I64(_) | Scalar::F64(_)) => d,
                    _ => return Err(mismatch(op, lhs, rhs)),
                };
                let part = match self {
                    Lookup::Year => i64::from(date.year()),
                    Lookup::Month => i64::from(date.month()),
                    _ => i64::from(date.day()),
                };
                Ok(values_equal(&Scalar::I64(part), rhs))
            }
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Lookup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "eq" {
            return Ok(Lookup::Exact);
        }
        Lookup::ALL
            .into_iter()
            .find(|l| l.name() == s)
            .ok_or_else(|| Error::UnknownLookup(s.to_string()))
    }
}

/// Value equality with numeric promotion. Values of different kinds are
/// simply unequal; `Null` equals only `Null`.
pub fn values_equal(lhs: &Scalar, rhs: &Scalar) -> bool {
    match (lhs, rhs) {
        (Scalar::I64(a), Scalar::I64(b)) => a == b,
        (Scalar::F64(a), Scalar::F64(b)) => a == b,
        (Scalar::I64(_), Scalar::F64(_)) | (Scalar::F64(_), Scalar::I64(_)) => {
            lhs.as_f64() == rhs.as_f64()
        }
        _ => lhs == rhs,
    }
}

/// Ordering between two comparable values. Numbers compare across `I64` and
/// `F64`; anything else must be the same kind. `Null` is never comparable.
pub fn compare_values(op: &'static str, lhs: &Scalar, rhs: &Scalar) -> Result<Ordering> {
    use Scalar::*;

    match (lhs, rhs) {
        (I64(_) | F64(_), I64(_) | F64(_)) => Ok(lhs.cmp(rhs)),
        (Str(a), Str(b)) => Ok(a.cmp(b)),
        (Date(a), Date(b)) => Ok(a.cmp(b)),
        (Bool(a), Bool(b)) => Ok(a.cmp(b)),
        _ => Err(mismatch(op, lhs, rhs)),
    }
}

fn strings<'a>(op: &'static str, lhs: &'a Scalar, rhs: &'a Scalar) -> Result<(&'a str, &'a str)> {
    match (lhs, rhs) {
        (Scalar::Str(l), Scalar::Str(r)) => Ok((l, r)),
        _ => Err(mismatch(op, lhs, rhs)),
    }
}

pub(crate) fn mismatch(op: &'static str, lhs: &Scalar, rhs: &Scalar) -> Error {
    Error::TypeMismatch {
        op,
        lhs: lhs.kind().to_string(),
        rhs: rhs.kind().to_string(),
    }
}

macro_rules! lookup_builders {
    ($($(#[$meta:meta])* $name:ident => $lookup:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Predicate {
                Predicate::compare(Lookup::$lookup, lhs, rhs)
            }
        )*
    };
}

lookup_builders! {
    exact => Exact,
    /// Alias for [`exact`].
    eq => Exact,
    iexact => IExact,
    contains => Contains,
    icontains => IContains,
    gt => Gt,
    gte => Gte,
    lt => Lt,
    lte => Lte,
    startswith => StartsWith,
    endswith => EndsWith,
    istartswith => IStartsWith,
    iendswith => IEndsWith,
    /// `lhs` is a date whose year equals the number `rhs`.
    year => Year,
    month => Month,
    day => Day,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn s(v: &str) -> Scalar {
        Scalar::Str(v.to_string())
    }

    #[test]
    fn exact_promotes_numbers() {
        assert!(Lookup::Exact.apply(&Scalar::I64(1), &Scalar::F64(1.0)).unwrap());
        assert!(Lookup::Exact.apply(&Scalar::Null, &Scalar::Null).unwrap());
        assert!(!Lookup::Exact.apply(&Scalar::I64(1), &s("1")).unwrap());
    }

    #[test]
    fn ordering_lookups() {
        assert!(Lookup::Gt.apply(&Scalar::I64(3), &Scalar::F64(2.5)).unwrap());
        assert!(Lookup::Gte.apply(&Scalar::I64(3), &Scalar::I64(3)).unwrap());
        assert!(Lookup::Lt.apply(&s("abc"), &s("abd")).unwrap());
        assert!(!Lookup::Lte.apply(&Scalar::I64(4), &Scalar::I64(3)).unwrap());
        assert!(matches!(
            Lookup::Gt.apply(&Scalar::Null, &Scalar::I64(1)),
            Err(Error::TypeMismatch { op: "gt", .. })
        ));
    }

    #[test]
    fn string_lookups() {
        assert!(Lookup::IExact.apply(&s("Hello"), &s("hELLO")).unwrap());
        assert!(Lookup::Contains.apply(&s("haystack"), &s("st")).unwrap());
        assert!(!Lookup::Contains.apply(&s("haystack"), &s("ST")).unwrap());
        assert!(Lookup::IContains.apply(&s("haystack"), &s("ST")).unwrap());
        assert!(Lookup::StartsWith.apply(&s("prefix"), &s("pre")).unwrap());
        assert!(Lookup::EndsWith.apply(&s("suffix"), &s("fix")).unwrap());
        assert!(Lookup::IStartsWith.apply(&s("Prefix"), &s("pRE")).unwrap());
        assert!(Lookup::IEndsWith.apply(&s("SufFIX"), &s("fix")).unwrap());
        assert!(Lookup::Contains.apply(&Scalar::I64(12), &s("1")).is_err());
    }

    #[test]
    fn date_part_lookups() {
        let d = Scalar::Date(NaiveDate::from_ymd_opt(2021, 7, 14).unwrap());
        assert!(Lookup::Year.apply(&d, &Scalar::I64(2021)).unwrap());
        assert!(Lookup::Month.apply(&d, &Scalar::I64(7)).unwrap());
        assert!(Lookup::Day.apply(&d, &Scalar::I64(14)).unwrap());
        assert!(!Lookup::Day.apply(&d, &Scalar::I64(15)).unwrap());
        assert!(Lookup::Year.apply(&d, &Scalar::F64(2021.0)).unwrap());
        assert!(!Lookup::Month.apply(&d, &Scalar::F64(7.5)).unwrap());
        assert!(Lookup::Day.apply(&d, &s("14")).is_err());
        assert!(Lookup::Year.apply(&s("2021"), &Scalar::I64(2021)).is_err());
    }

    #[test]
    fn registry_by_name() {
        for lookup in Lookup::ALL {
            assert_eq!(lookup.name().parse::<Lookup>().unwrap(), lookup);
        }
        assert_eq!("eq".parse::<Lookup>().unwrap(), Lookup::Exact);
        assert_eq!(
            "regex".parse::<Lookup>(),
            Err(Error::UnknownLookup("regex".into()))
        );
    }
}
