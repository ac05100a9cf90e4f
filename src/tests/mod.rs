//! # Integration tests that require a look inside the crate.
//!
//! Convention for function names:
//!
//! * `const LP_LITERAL_STRING`
//! * `fn model_form()`
//! * `fn canonical_form()`
//! * `fn canonical_text()`
//! * `fn dense_form()`
pub mod problem_1;
