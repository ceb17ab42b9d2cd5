//! Flow tests for the navigation controller: startup settlement, selection
//! toggling, invitation replay, and failure degradation.

mod helpers;

use chrono::{NaiveDate, Utc};

use cuaderno_app::{DiaryContext, InviteStash, Route, ViewState, load_entry_labels};
use cuaderno_core::traits::identity::IdentityProvider;
use cuaderno_core::types::id::{DiaryId, EntryId, UserId};
use cuaderno_entity::diary::InvitedRole;
use cuaderno_entity::entry::{DiaryEntry, EntryScope};
use cuaderno_service::EntryDraft;
use helpers::{TestShell, test_identity};

fn draft(title: &str) -> EntryDraft {
    EntryDraft {
        title: title.to_string(),
        content: "C".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
        song: None,
        tags: Vec::new(),
        photos: Vec::new(),
        scope: EntryScope::Personal,
    }
}

fn shared_entry(diary_id: DiaryId, owner: UserId) -> DiaryEntry {
    let now = Utc::now();
    DiaryEntry {
        id: EntryId::new(),
        title: "T".to_string(),
        content: "C".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
        song: None,
        tags: Vec::new(),
        photos: Vec::new(),
        scope: EntryScope::Shared(diary_id),
        owner,
        created_by: owner,
        last_modified_by: owner,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_unauthenticated_startup_redirects_and_stashes_invite() {
    let shell = TestShell::new();
    shell.sign_out();
    let mut controller = shell.controller();

    controller.start("/home", "?invite=abc123").await;

    assert_eq!(*controller.state(), ViewState::SignedOut);
    assert_eq!(shell.sink.last_replaced(), Some(Route::Welcome));
    // The code waits in the stash for sign-in.
    assert!(shell.stash.take().is_some());
}

#[tokio::test]
async fn test_startup_settles_into_personal_diary() {
    let shell = TestShell::new();
    let ana = test_identity("Ana", "ana@example.com");
    shell.sign_in(&ana);
    shell.entries.create_entry(draft("T")).await.unwrap();

    let mut controller = shell.controller();
    controller.start("/home", "").await;

    assert_eq!(*controller.state(), ViewState::PersonalDiary);
    assert_eq!(controller.entries().len(), 1);
    assert_eq!(shell.sink.last_replaced(), Some(Route::Home));
}

#[tokio::test]
async fn test_selection_toggle_contract() {
    let shell = TestShell::new();
    let ana = test_identity("Ana", "ana@example.com");
    shell.sign_in(&ana);
    let x = shell.entries.create_entry(draft("X")).await.unwrap();
    let y = shell.entries.create_entry(draft("Y")).await.unwrap();

    let mut controller = shell.controller();
    controller.start("/home", "").await;

    controller.select_entry(x.id);
    assert_eq!(controller.state().selected_entry(), Some(x.id));

    // Selecting the selected entry deselects it.
    controller.select_entry(x.id);
    assert_eq!(*controller.state(), ViewState::PersonalDiary);
    assert_eq!(controller.state().selected_entry(), None);

    // Selecting X then Y leaves exactly Y selected.
    controller.select_entry(x.id);
    controller.select_entry(y.id);
    assert_eq!(controller.state().selected_entry(), Some(y.id));
}

#[tokio::test]
async fn test_route_updates_use_replace_not_push() {
    let shell = TestShell::new();
    let ana = test_identity("Ana", "ana@example.com");
    shell.sign_in(&ana);
    let x = shell.entries.create_entry(draft("X")).await.unwrap();

    let mut controller = shell.controller();
    controller.start("/home", "").await;
    controller.select_entry(x.id);
    controller.select_entry(x.id);

    assert!(shell.sink.pushed().is_empty());
    let replaced = shell.sink.replaced();
    assert!(replaced.contains(&Route::PersonalEntry(x.id)));
    assert_eq!(replaced.last(), Some(&Route::Home));
}

#[tokio::test]
async fn test_startup_with_invite_code_accepts_and_opens_diary() {
    let shell = TestShell::new();
    let ana = test_identity("Ana", "ana@example.com");
    let bea = test_identity("Bea", "b@example.com");

    shell.sign_in(&ana);
    let diary = shell
        .collaboration
        .create_shared_diary("Trip".to_string(), None)
        .await
        .unwrap();
    shell
        .collaboration
        .invite_collaborator(diary.id, "b@example.com", InvitedRole::Editor)
        .await
        .unwrap();

    shell.sign_in(&bea);
    let mut controller = shell.controller();
    controller
        .start("/", &format!("?invite={}", diary.share_code))
        .await;

    assert_eq!(*controller.state(), ViewState::SharedDiaryOpen(diary.id));
    assert_eq!(controller.current_diary().map(|d| d.id), Some(diary.id));
    assert_eq!(shell.sink.last_replaced(), Some(Route::SharedDiary(diary.id)));

    let collaborators = shell.collaboration.collaborators(diary.id).await.unwrap();
    assert!(collaborators.iter().any(|c| c.user_id == bea.user_id));
}

#[tokio::test]
async fn test_stashed_invite_is_replayed_once() {
    let shell = TestShell::new();
    let ana = test_identity("Ana", "ana@example.com");
    let bea = test_identity("Bea", "b@example.com");

    shell.sign_in(&ana);
    let diary = shell
        .collaboration
        .create_shared_diary("Trip".to_string(), None)
        .await
        .unwrap();
    shell
        .collaboration
        .invite_collaborator(diary.id, "b@example.com", InvitedRole::Editor)
        .await
        .unwrap();

    // The invite link is opened before signing in.
    shell.sign_out();
    let mut controller = shell.controller();
    controller
        .start("/", &format!("?invite={}", diary.share_code))
        .await;
    assert_eq!(*controller.state(), ViewState::SignedOut);

    // Sign-in replays the stashed code.
    shell.sign_in(&bea);
    controller.identity_changed(Some(bea.clone())).await;
    assert_eq!(*controller.state(), ViewState::SharedDiaryOpen(diary.id));
    let collaborators = shell.collaboration.collaborators(diary.id).await.unwrap();
    assert_eq!(collaborators.len(), 2);

    // A second identity event finds nothing stashed and changes nothing.
    controller.identity_changed(Some(bea.clone())).await;
    assert_eq!(*controller.state(), ViewState::SharedDiaryOpen(diary.id));
    let collaborators = shell.collaboration.collaborators(diary.id).await.unwrap();
    assert_eq!(collaborators.len(), 2);
}

#[tokio::test]
async fn test_new_entry_save_selects_and_prepends() {
    let shell = TestShell::new();
    let ana = test_identity("Ana", "ana@example.com");
    shell.sign_in(&ana);
    shell.entries.create_entry(draft("old")).await.unwrap();

    let mut controller = shell.controller();
    controller.start("/home", "").await;

    controller.new_entry();
    assert!(matches!(
        controller.state(),
        ViewState::EntryEditing { .. }
    ));

    let saved = controller.save_entry(draft("new")).await.unwrap();
    assert_eq!(
        *controller.state(),
        ViewState::EntrySelected {
            context: DiaryContext::Personal,
            entry_id: saved.id,
        }
    );
    assert_eq!(controller.entries()[0].id, saved.id);
    assert_eq!(shell.sink.last_replaced(), Some(Route::PersonalEntry(saved.id)));
}

#[tokio::test]
async fn test_cancel_edit_restores_previous_state() {
    let shell = TestShell::new();
    let ana = test_identity("Ana", "ana@example.com");
    shell.sign_in(&ana);
    let x = shell.entries.create_entry(draft("X")).await.unwrap();

    let mut controller = shell.controller();
    controller.start("/home", "").await;
    controller.select_entry(x.id);

    controller.new_entry();
    controller.cancel_edit();

    assert_eq!(
        *controller.state(),
        ViewState::EntrySelected {
            context: DiaryContext::Personal,
            entry_id: x.id,
        }
    );
}

#[tokio::test]
async fn test_save_into_open_shared_diary_uses_shared_scope() {
    let shell = TestShell::new();
    let ana = test_identity("Ana", "ana@example.com");
    shell.sign_in(&ana);
    let diary = shell
        .collaboration
        .create_shared_diary("Trip".to_string(), None)
        .await
        .unwrap();

    let mut controller = shell.controller();
    controller.start("/home", "").await;
    controller.open_shared_diary(diary.id).await;
    assert_eq!(*controller.state(), ViewState::SharedDiaryOpen(diary.id));

    controller.new_entry();
    let saved = controller.save_entry(draft("shared")).await.unwrap();

    assert_eq!(saved.scope, EntryScope::Shared(diary.id));
    assert_eq!(
        shell.sink.last_replaced(),
        Some(Route::SharedDiaryEntry(diary.id, saved.id))
    );
}

#[tokio::test]
async fn test_back_to_personal_reloads_personal_entries() {
    let shell = TestShell::new();
    let ana = test_identity("Ana", "ana@example.com");
    shell.sign_in(&ana);
    shell.entries.create_entry(draft("mine")).await.unwrap();
    let diary = shell
        .collaboration
        .create_shared_diary("Trip".to_string(), None)
        .await
        .unwrap();

    let mut controller = shell.controller();
    controller.start(&format!("/diario/{}", diary.id), "").await;
    assert_eq!(*controller.state(), ViewState::SharedDiaryOpen(diary.id));
    assert!(controller.entries().is_empty());

    controller.back_to_personal().await;
    assert_eq!(*controller.state(), ViewState::PersonalDiary);
    assert_eq!(controller.entries().len(), 1);
    assert!(controller.current_diary().is_none());
}

#[tokio::test]
async fn test_route_change_rederives_state() {
    let shell = TestShell::new();
    let ana = test_identity("Ana", "ana@example.com");
    shell.sign_in(&ana);
    let x = shell.entries.create_entry(draft("X")).await.unwrap();

    let mut controller = shell.controller();
    controller.start("/home", "").await;

    // Forward to the entry, then back to the list.
    controller
        .handle_route_change(&format!("/entrada/{}", x.id), "")
        .await;
    assert_eq!(controller.state().selected_entry(), Some(x.id));

    controller.handle_route_change("/home", "").await;
    assert_eq!(*controller.state(), ViewState::PersonalDiary);
}

#[tokio::test]
async fn test_route_with_unknown_entry_drops_the_selection() {
    let shell = TestShell::new();
    let ana = test_identity("Ana", "ana@example.com");
    shell.sign_in(&ana);

    let mut controller = shell.controller();
    controller
        .start(&format!("/entrada/{}", EntryId::new()), "")
        .await;

    assert_eq!(*controller.state(), ViewState::PersonalDiary);
    assert_eq!(shell.sink.last_replaced(), Some(Route::Home));
}

#[tokio::test]
async fn test_read_failure_degrades_to_empty_list_with_notice() {
    let shell = TestShell::new();
    let ana = test_identity("Ana", "ana@example.com");
    shell.sign_in(&ana);
    shell.entries.create_entry(draft("T")).await.unwrap();

    shell.store.fail_reads("diary_entries");

    let mut controller = shell.controller();
    controller.start("/home", "").await;

    assert_eq!(*controller.state(), ViewState::PersonalDiary);
    assert!(controller.entries().is_empty());
    let notices = controller.take_notices();
    assert_eq!(notices.len(), 1);
    assert!(controller.take_notices().is_empty());
}

#[tokio::test]
async fn test_delete_entry_deselects() {
    let shell = TestShell::new();
    let ana = test_identity("Ana", "ana@example.com");
    shell.sign_in(&ana);
    let x = shell.entries.create_entry(draft("X")).await.unwrap();

    let mut controller = shell.controller();
    controller.start("/home", "").await;
    controller.select_entry(x.id);

    controller.delete_entry(x.id).await.unwrap();
    assert_eq!(*controller.state(), ViewState::PersonalDiary);
    assert!(controller.entries().is_empty());
    assert_eq!(shell.sink.last_replaced(), Some(Route::Home));
}

#[tokio::test]
async fn test_labels_tolerate_a_failed_diary_lookup() {
    let shell = TestShell::new();
    let ana = test_identity("Ana", "ana@example.com");
    shell.sign_in(&ana);

    let uno = shell
        .collaboration
        .create_shared_diary("Uno".to_string(), None)
        .await
        .unwrap();
    let dos = shell
        .collaboration
        .create_shared_diary("Dos".to_string(), None)
        .await
        .unwrap();
    shell.store.fail_id(dos.id.into_uuid());

    let entries = vec![
        shared_entry(uno.id, ana.user_id),
        shared_entry(dos.id, ana.user_id),
    ];
    let labels = load_entry_labels(&shell.collaboration, &entries, Some(&ana)).await;

    // The failing diary only costs its own labels.
    assert_eq!(labels.diary_title(uno.id), Some("Uno"));
    assert_eq!(labels.diary_title(dos.id), None);
    assert_eq!(labels.author_name(ana.user_id), Some("Ana"));
}

#[tokio::test]
async fn test_sign_out_clears_view_state() {
    let shell = TestShell::new();
    let ana = test_identity("Ana", "ana@example.com");
    shell.sign_in(&ana);
    let x = shell.entries.create_entry(draft("X")).await.unwrap();

    let mut controller = shell.controller();
    controller.start("/home", "").await;
    controller.select_entry(x.id);

    controller.sign_out().await.unwrap();
    assert_eq!(*controller.state(), ViewState::SignedOut);
    assert!(controller.entries().is_empty());
    assert_eq!(shell.sink.last_replaced(), Some(Route::Welcome));
    assert!(shell.identity.current_identity().is_none());
}
