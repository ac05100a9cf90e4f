//! # Representing linear programs
//!
//! This module contains the representations of linear programs. A `Model` is what is read from an
//! LP file; after canonicalization it is a maximization problem with only `<=` constraints and
//! dense rows. The `DenseModel` is the matrix view of a model.
pub mod canonical_form;
pub mod constraint;
pub mod dense;
pub mod elements;
pub mod expression;
pub mod model;
