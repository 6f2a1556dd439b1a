//! Advent of Code puzzle solutions with automatic registration
//!
//! This crate contains puzzle solutions organized by year, plus the
//! memoization engine they share in [`utils::dp_cache`]. Each solution uses
//! the `AutoRegisterSolver` derive macro for automatic plugin registration
//! with the solver framework.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
