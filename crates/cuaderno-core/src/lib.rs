//! # cuaderno-core
//!
//! Core crate for Cuaderno. Contains the capability traits the journaling
//! core consumes (record store, object storage, identity, mail),
//! configuration schemas, typed identifiers, query predicates, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Cuaderno crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
