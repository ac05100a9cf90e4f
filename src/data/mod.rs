//! # Storing of linear programs in memory
//!
//! This module provides the data structures used to represent linear programs and their parts in
//! memory.

pub mod linear_program;
