//! Name-indexed view over one tuple, used by predicates and aggregates.

use crate::error::{Error, Result};
use crate::schema::Attr;
use crate::types::Scalar;

#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    attrs: &'a [Attr],
    values: &'a [Scalar],
}

impl<'a> Record<'a> {
    /// `attrs` and `values` must be the same length; relations guarantee this.
    pub fn new(attrs: &'a [Attr], values: &'a [Scalar]) -> Self {
        debug_assert_eq!(attrs.len(), values.len());
        Self { attrs, values }
    }

    pub fn get(&self, attr: &Attr) -> Result<&'a Scalar> {
        let values = self.values;
        self.attrs
            .iter()
            .position(|a| a == attr)
            .map(|idx| &values[idx])
            .ok_or_else(|| Error::missing_attr(attr))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a Attr, &'a Scalar)> {
        let (attrs, values) = (self.attrs, self.values);
        attrs.iter().zip(values.iter())
    }

    pub fn values(&self) -> &'a [Scalar] {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::to_attrs;

    #[test]
    fn lookup_by_name() {
        let attrs = to_attrs(["id", "name"]);
        let values = vec![Scalar::I64(1), Scalar::Str("a".into())];
        let rec = Record::new(&attrs, &values);
        assert_eq!(rec.get(&"name".into()).unwrap(), &Scalar::Str("a".into()));
        assert!(matches!(rec.get(&"dept".into()), Err(Error::Attribute(_))));
        assert_eq!(rec.iter().count(), 2);
    }
}
