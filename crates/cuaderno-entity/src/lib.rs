//! # cuaderno-entity
//!
//! Domain entity models for Cuaderno. Every struct in this crate
//! represents a record-store document or a domain value object. All
//! entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`; the
//! `New*` companion structs are the document shapes handed to the store
//! (everything but the store-assigned id).

pub mod diary;
pub mod entry;
