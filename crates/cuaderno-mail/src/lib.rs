//! # cuaderno-mail
//!
//! Outbound mail for Cuaderno. Implements the [`Mailer`] capability three
//! ways: over SMTP for real delivery, as a null sink for installs without
//! mail credentials, and as a recording outbox for tests. Mail is
//! best-effort everywhere it is used; a send failure never invalidates the
//! invitation it was about.
//!
//! [`Mailer`]: cuaderno_core::traits::email::Mailer

pub mod memory;
pub mod null;
pub mod smtp;

pub use memory::MemoryMailer;
pub use null::NullMailer;
pub use smtp::SmtpMailer;
