//! Shared fixtures for integration tests.

#![allow(dead_code)]

use kith::prelude::*;

/// `employees(id, name, dept_id)` with `n` rows spread over `depts` departments.
pub fn generate_employees(n: i64, depts: i64) -> Relation {
    let rows = (0..n).map(|i| row![i, format!("emp{}", i), i % depts]);
    Relation::new(["id", "name", "dept_id"], rows).expect("employees fixture")
}

/// `departments(dept_id, title)` for ids `0..n`.
pub fn generate_departments(n: i64) -> Relation {
    let rows = (0..n).map(|i| row![i, format!("dept{}", i)]);
    Relation::new(["dept_id", "title"], rows).expect("departments fixture")
}

/// `(g, v)` pairs where `g = i % groups` and `v = i`.
pub fn generate_grouped(n: i64, groups: i64) -> Relation {
    let rows = (0..n).map(|i| row![i % groups, i]);
    Relation::new(["g", "v"], rows).expect("grouped fixture")
}
