//! Display label caches for entry lists.
//!
//! Shared entries show their diary's title and their author's name. Both
//! come from point lookups the controller batches up after loading a list;
//! one failed lookup only costs that diary's labels.

use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use tracing::warn;

use cuaderno_core::traits::identity::Identity;
use cuaderno_core::types::id::{DiaryId, UserId};
use cuaderno_entity::entry::DiaryEntry;
use cuaderno_service::CollaborationService;

/// Labels resolved for the currently loaded entries.
#[derive(Debug, Clone, Default)]
pub struct EntryLabels {
    /// Diary id to diary title.
    pub diary_titles: HashMap<DiaryId, String>,
    /// User id to display name.
    pub author_names: HashMap<UserId, String>,
}

impl EntryLabels {
    /// The title of a diary, when its lookup succeeded.
    pub fn diary_title(&self, diary_id: DiaryId) -> Option<&str> {
        self.diary_titles.get(&diary_id).map(String::as_str)
    }

    /// The display name of an author, when known.
    pub fn author_name(&self, user_id: UserId) -> Option<&str> {
        self.author_names.get(&user_id).map(String::as_str)
    }
}

/// Build label caches for a list of entries.
///
/// Every shared diary referenced by the list is fetched concurrently,
/// together with its collaborators. A failure for one diary is logged and
/// leaves that diary's slots empty without aborting the rest. The current
/// user's own name is seeded so personal lists carry an author label
/// without any lookup.
pub async fn load_entry_labels(
    collaboration: &CollaborationService,
    entries: &[DiaryEntry],
    current_user: Option<&Identity>,
) -> EntryLabels {
    let mut labels = EntryLabels::default();

    if let Some(user) = current_user {
        labels.author_names.insert(user.user_id, user.short_name());
    }

    let diary_ids: HashSet<DiaryId> = entries
        .iter()
        .filter_map(|entry| entry.scope.diary_id())
        .collect();

    let lookups = diary_ids.into_iter().map(|diary_id| async move {
        let result = async {
            let diary = collaboration.diary_by_id(diary_id).await?;
            let collaborators = collaboration.collaborators(diary_id).await?;
            Ok::<_, cuaderno_core::AppError>((diary, collaborators))
        }
        .await;
        (diary_id, result)
    });

    for (diary_id, result) in join_all(lookups).await {
        match result {
            Ok((diary, collaborators)) => {
                if let Some(diary) = diary {
                    labels.diary_titles.insert(diary_id, diary.title);
                }
                for collaborator in collaborators {
                    labels
                        .author_names
                        .insert(collaborator.user_id, collaborator.user_name);
                }
            }
            Err(err) => {
                warn!(diary_id = %diary_id, error = %err, "Skipping failed label lookup");
            }
        }
    }

    labels
}
