//! Benchmark utilities for scoreprep.
//!
//! - Synthetic student performance tables of any size
//! - Matching numeric matrices for single-transformer benchmarks

pub mod data;

pub use data::{numeric_matrix, synthetic_students};
