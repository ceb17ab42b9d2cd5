//! Capability traits defined in `cuaderno-core` and implemented by other
//! crates (or by the real external providers in a full deployment).

pub mod email;
pub mod identity;
pub mod objects;
pub mod records;

pub use email::{InvitationEmail, Mailer};
pub use identity::{Identity, IdentityProvider};
pub use objects::{ObjectStore, StoredObject};
pub use records::{Record, RecordStore};
