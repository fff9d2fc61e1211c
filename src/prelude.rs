//! Prelude module for the jde_date crate.
//!
//! Re-exports the derive_more derives used across the crate.

pub use derive_more::Display;
