//! Stable content hashing for relations.

use std::fmt;

use blake3::Hasher;

use crate::relation::Relation;
use crate::schema::Attr;
use crate::types::{scalar_type_order, Scalar};

/// Fingerprint of a relation's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// Lowercase hex, 64 chars.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{:02x}", b))
    }
}

impl Relation {
    /// Content hash over the heading and the tuple set. Tuples are visited in
    /// storage order, so equal relations always hash equally.
    pub fn fingerprint(&self) -> Hash256 {
        let mut h = Hasher::new();
        h.update(&(self.arity() as u64).to_le_bytes());
        for attr in self.attrs() {
            hash_attr(attr, &mut h);
        }
        h.update(&(self.len() as u64).to_le_bytes());
        for t in self.tuples() {
            for v in t {
                hash_scalar(v, &mut h);
            }
        }
        Hash256(h.finalize().into())
    }
}

fn hash_attr(attr: &Attr, hasher: &mut Hasher) {
    match attr {
        Attr::Name(n) => {
            hasher.update(&[0]);
            hash_len_prefixed(n.as_bytes(), hasher);
        }
        Attr::Qualified { qualifier, attr } => {
            hasher.update(&[1]);
            hash_len_prefixed(qualifier.as_bytes(), hasher);
            hash_attr(attr, hasher);
        }
    }
}

const TWO_63: f64 = 9_223_372_036_854_775_808.0;

/// Hash a scalar value into a hasher. Values that compare equal hash equally.
fn hash_scalar(scalar: &Scalar, hasher: &mut Hasher) {
    use Scalar::*;

    // Write type discriminant first
    hasher.update(&[scalar_type_order(scalar)]);

    match scalar {
        Null => {}
        Bool(b) => {
            hasher.update(&[*b as u8]);
        }
        I64(i) => {
            hasher.update(&[0]);
            hasher.update(&i.to_le_bytes());
        }
        // Integral floats hash like the integer they equal.
        F64(f) if f.fract() == 0.0 && *f >= -TWO_63 && *f < TWO_63 => {
            hasher.update(&[0]);
            hasher.update(&(*f as i64).to_le_bytes());
        }
        F64(f) => {
            hasher.update(&[1]);
            hasher.update(&f.to_bits().to_le_bytes());
        }
        Str(s) => {
            hash_len_prefixed(s.as_bytes(), hasher);
        }
        Date(d) => {
            hash_len_prefixed(d.to_string().as_bytes(), hasher);
        }
    }
}

fn hash_len_prefixed(bytes: &[u8], hasher: &mut Hasher) {
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
