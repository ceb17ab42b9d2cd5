//! # cuaderno-auth
//!
//! Identity layer for Cuaderno. The production identity provider is an
//! interactive OAuth flow owned by the host shell; this crate ships the
//! local provider used for development and tests, implementing the same
//! [`IdentityProvider`] capability.
//!
//! [`IdentityProvider`]: cuaderno_core::traits::identity::IdentityProvider

pub mod local;

pub use local::LocalIdentityProvider;
