//! Attribute identifiers and helpers over attribute sequences.
//!
//! A relation's heading is just an ordered `Vec<Attr>`; there is no typed
//! schema. Qualified attributes wrap another attribute with a qualifier so
//! the two sides of a join can be told apart.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attr {
    Name(String),
    Qualified { qualifier: String, attr: Box<Attr> },
}

impl Attr {
    pub fn new(name: impl Into<String>) -> Self {
        Attr::Name(name.into())
    }

    pub fn qualified(qualifier: impl Into<String>, attr: impl Into<Attr>) -> Self {
        Attr::Qualified {
            qualifier: qualifier.into(),
            attr: Box::new(attr.into()),
        }
    }

    /// Drop one level of qualification; plain names are returned unchanged.
    pub fn unqualified(&self) -> &Attr {
        match self {
            Attr::Name(_) => self,
            Attr::Qualified { attr, .. } => attr,
        }
    }

    /// The innermost plain name.
    pub fn base_name(&self) -> &str {
        match self {
            Attr::Name(n) => n,
            Attr::Qualified { attr, .. } => attr.base_name(),
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attr::Name(n) => f.write_str(n),
            Attr::Qualified { qualifier, attr } => write!(f, "{}.{}", qualifier, attr),
        }
    }
}

impl From<&str> for Attr {
    fn from(s: &str) -> Self {
        Attr::Name(s.to_string())
    }
}

impl From<String> for Attr {
    fn from(s: String) -> Self {
        Attr::Name(s)
    }
}

impl From<&Attr> for Attr {
    fn from(a: &Attr) -> Self {
        a.clone()
    }
}

pub fn index_of(attrs: &[Attr], attr: &Attr) -> Result<usize> {
    attrs
        .iter()
        .position(|a| a == attr)
        .ok_or_else(|| Error::missing_attr(attr))
}

/// Attributes of `left` that also occur in `right`, in `left` order.
pub fn common(left: &[Attr], right: &[Attr]) -> Vec<Attr> {
    let right: BTreeSet<&Attr> = right.iter().collect();
    left.iter().filter(|a| right.contains(a)).cloned().collect()
}

/// Fails with `AttributeConflict` unless the two headings are disjoint.
pub fn ensure_disjoint(left: &[Attr], right: &[Attr]) -> Result<()> {
    let overlap = common(left, right);
    if overlap.is_empty() {
        Ok(())
    } else {
        Err(Error::AttributeConflict(overlap))
    }
}

/// Fails with `SchemaMismatch` unless the headings are identical, order included.
pub fn ensure_same(left: &[Attr], right: &[Attr]) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        Err(Error::SchemaMismatch {
            left: left.to_vec(),
            right: right.to_vec(),
        })
    }
}

pub fn to_attrs<A: Into<Attr>>(attrs: impl IntoIterator<Item = A>) -> Vec<Attr> {
    attrs.into_iter().map(Into::into).collect()
}
