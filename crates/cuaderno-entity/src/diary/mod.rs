//! Shared diary domain entities: the diary itself, its collaborators, and
//! the invitations that admit them.

pub mod collaborator;
pub mod invitation;
pub mod model;
pub mod share_code;

pub use collaborator::{CollaboratorRole, CollaboratorStatus, DiaryCollaborator, NewCollaborator};
pub use invitation::{DiaryInvitation, InvitationStatus, InvitedRole, NewInvitation};
pub use model::{NewSharedDiary, SharedDiary};
pub use share_code::ShareCode;
