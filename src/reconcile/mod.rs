//! Reconciliation engine: membership diffing and change validation

pub mod diff;
pub mod validate;

pub use diff::{diff, ChangeReport};
pub use validate::{validate, Decision};
