//! # Reading and canonicalizing linear programs
//!
//! Linear programs written in the LP file format are read into a structured coefficient
//! representation, brought into a canonical form (maximization, only `<=` constraints, dense rows
//! over one sorted variable order) and written back out as deterministic text or as a dense
//! `(c, A, b)` record.
//!
//! Free-text linear expressions and constraints can also be parsed on their own, and constraints of
//! the same sense can be summed into new constraints.
#![warn(missing_docs)]

pub mod batch;
pub mod data;
pub mod io;

#[cfg(test)]
mod tests;
