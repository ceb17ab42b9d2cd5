//! Photo upload service.

pub mod service;

pub use service::{PhotoService, PhotoUpload};
