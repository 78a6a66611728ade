//! Core types and traits for the market insight engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (OhlcvPoint and series helpers)
//! - Indicator traits shared by every indicator implementation
//! - The series source trait implemented by data loaders
//! - The error taxonomy used across the workspace

pub mod types;
pub mod traits;
pub mod error;

pub use error::{InsightError, InsightResult};
pub use types::*;
pub use traits::*;
