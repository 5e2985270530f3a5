#[path = "common/mod.rs"]
mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeCatalog, entry, ids, names, numbered};
use dexview::error::DexError;
use dexview::types::{Category, EntryKey};
use dexview::view::{DetailSession, ListAction, ListSession, LoadStatus};

// ============================================================================
// List view
// ============================================================================

#[tokio::test]
async fn test_list_pagination_bounds() {
    let catalog = Arc::new(FakeCatalog::new(numbered(150)));
    let session = ListSession::new(catalog);

    assert!(session.go_to_page(1).await.unwrap());
    let vm = session.view_model();
    assert_eq!(vm.total_pages, 15);
    assert!(!vm.has_previous);
    assert!(vm.has_next);
    assert_eq!(ids(&vm.entries), (1..=10).collect::<Vec<_>>());

    assert!(session.go_to_page(15).await.unwrap());
    let vm = session.view_model();
    assert!(vm.has_previous);
    assert!(!vm.has_next);
    assert_eq!(ids(&vm.entries), (141..=150).collect::<Vec<_>>());

    // already on the last page
    assert!(!session.next_page().await.unwrap());
    assert_eq!(session.snapshot().current_page, 15);
}

#[tokio::test]
async fn test_list_next_and_previous() {
    let catalog = Arc::new(FakeCatalog::new(numbered(25)));
    let session = ListSession::new(catalog);

    // nothing known yet, so no next page
    assert!(!session.next_page().await.unwrap());

    session.go_to_page(1).await.unwrap();
    assert!(session.next_page().await.unwrap());
    assert!(session.next_page().await.unwrap());
    let state = session.snapshot();
    assert_eq!(state.loaded_page, Some(3));
    assert_eq!(ids(&state.entries), (21..=25).collect::<Vec<_>>());

    assert!(session.previous_page().await.unwrap());
    assert_eq!(session.snapshot().loaded_page, Some(2));
}

#[tokio::test]
async fn test_list_rejects_page_zero() {
    let catalog = Arc::new(FakeCatalog::new(numbered(25)));
    let session = ListSession::new(catalog.clone());

    let err = session.go_to_page(0).await.unwrap_err();
    assert!(matches!(err, DexError::InvalidPage(0)));
    assert_eq!(catalog.list_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_slow_earlier_page_never_overwrites_newer_page() {
    let catalog = Arc::new(FakeCatalog::new(numbered(40)).with_page_delay(10, 500));
    let session = ListSession::new(catalog);

    let page_two = session.dispatch(ListAction::RequestPage(2)).unwrap();
    let page_three = session.dispatch(ListAction::RequestPage(3)).unwrap();

    let (two, three) = tokio::join!(session.fulfill(page_two), session.fulfill(page_three));
    assert!(!two.unwrap(), "page 2 result should have been discarded");
    assert!(three.unwrap());

    let state = session.snapshot();
    assert_eq!(state.current_page, 3);
    assert_eq!(state.loaded_page, Some(3));
    assert_eq!(state.status, LoadStatus::Ready);
    assert_eq!(ids(&state.entries), (21..=30).collect::<Vec<_>>());
}

#[tokio::test(start_paused = true)]
async fn test_early_result_for_superseded_page_is_discarded() {
    let catalog = Arc::new(FakeCatalog::new(numbered(40)).with_page_delay(20, 500));
    let session = ListSession::new(catalog);

    let page_three = session.dispatch(ListAction::RequestPage(3)).unwrap();
    let page_two = session.dispatch(ListAction::RequestPage(2)).unwrap();

    let (three, two) = tokio::join!(session.fulfill(page_three), session.fulfill(page_two));
    assert!(!three.unwrap());
    assert!(two.unwrap());
    assert_eq!(session.snapshot().loaded_page, Some(2));
}

#[tokio::test]
async fn test_list_failure_sets_failed_state() {
    let catalog = Arc::new(FakeCatalog::new(numbered(25)).failing_entry("mon-13"));
    let session = ListSession::new(catalog);

    session.go_to_page(1).await.unwrap();
    let err = session.go_to_page(2).await.unwrap_err();
    assert!(matches!(err, DexError::Network(_)));

    let state = session.snapshot();
    assert!(state.status.error().is_some_and(|e| e.contains("mon-13")));
    assert_eq!(state.current_page, 2);
    // previous entries stay in place
    assert_eq!(state.loaded_page, Some(1));
    assert_eq!(state.entries.len(), 10);
}

#[tokio::test]
async fn test_filter_changes_do_not_refetch() {
    let catalog = Arc::new(FakeCatalog::new(vec![
        entry(4, "charmander", &[Category::Fire]),
        entry(1, "bulbasaur", &[Category::Grass, Category::Poison]),
        entry(6, "charizard", &[Category::Fire, Category::Flying]),
    ]));
    let session = ListSession::new(catalog.clone());
    session.go_to_page(1).await.unwrap();
    let list_calls = catalog.list_calls();
    let entry_calls = catalog.entry_calls();

    session.set_search("CHAR");
    assert_eq!(names(&session.view_model().entries), vec!["charmander", "charizard"]);

    session.set_category(Some(Category::Flying));
    assert_eq!(names(&session.view_model().entries), vec!["charizard"]);

    session.set_search("");
    session.set_category(None);
    session.toggle_sort();
    assert_eq!(
        names(&session.view_model().entries),
        vec!["bulbasaur", "charizard", "charmander"]
    );

    session.set_search("mewtwo");
    let vm = session.view_model();
    assert!(vm.entries.is_empty());
    assert_eq!(vm.loaded_count, 3);

    assert_eq!(catalog.list_calls(), list_calls);
    assert_eq!(catalog.entry_calls(), entry_calls);
}

// ============================================================================
// Detail view
// ============================================================================

fn detail_catalog() -> FakeCatalog {
    FakeCatalog::new(vec![
        entry(4, "charmander", &[Category::Fire]),
        entry(5, "charmeleon", &[Category::Fire]),
        entry(6, "charizard", &[Category::Fire, Category::Flying]),
        entry(7, "squirtle", &[Category::Water]),
        entry(8, "wartortle", &[Category::Water]),
    ])
}

#[tokio::test]
async fn test_detail_loads_entry_then_similar() {
    let session = DetailSession::new(Arc::new(detail_catalog()));

    assert!(session.open(EntryKey::parse("charmander")).await.unwrap());
    let vm = session.view_model();
    assert_eq!(vm.status, LoadStatus::Ready);
    assert_eq!(vm.similar_status, LoadStatus::Ready);
    assert_eq!(vm.entry.as_ref().map(|e| e.id), Some(4));
    assert_eq!(names(&vm.similar), vec!["charmeleon", "charizard"]);
}

#[tokio::test]
async fn test_detail_open_by_id() {
    let session = DetailSession::new(Arc::new(detail_catalog()));

    session.open(EntryKey::Id(7)).await.unwrap();
    let vm = session.view_model();
    assert_eq!(vm.entry.as_ref().map(|e| e.name.as_str()), Some("squirtle"));
    assert_eq!(names(&vm.similar), vec!["wartortle"]);
}

#[tokio::test]
async fn test_detail_reopening_same_entry_is_noop() {
    let catalog = Arc::new(detail_catalog());
    let session = DetailSession::new(catalog.clone());

    session.open(EntryKey::Id(7)).await.unwrap();
    let calls = catalog.entry_calls();
    assert!(!session.open(EntryKey::Id(7)).await.unwrap());
    assert_eq!(catalog.entry_calls(), calls);
}

#[tokio::test(start_paused = true)]
async fn test_detail_stale_entry_is_never_shown() {
    let catalog = Arc::new(detail_catalog().with_entry_delay("charmander", 500));
    let session = DetailSession::new(catalog);

    let (first, second) = tokio::join!(
        session.open(EntryKey::Id(4)),
        session.open(EntryKey::Id(7))
    );
    assert!(!first.unwrap());
    assert!(second.unwrap());

    let vm = session.view_model();
    assert_eq!(vm.key, Some(EntryKey::Id(7)));
    assert_eq!(vm.entry.as_ref().map(|e| e.id), Some(7));
    assert_eq!(names(&vm.similar), vec!["wartortle"]);
}

#[tokio::test(start_paused = true)]
async fn test_detail_stale_similar_entries_are_never_shown() {
    // charmander itself loads at once; its similar entries arrive late
    let catalog = Arc::new(detail_catalog().with_entry_delay("charmeleon", 500));
    let session = DetailSession::new(catalog);

    let (first, second) = tokio::join!(session.open(EntryKey::Id(4)), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        session.open(EntryKey::Id(7)).await
    });
    assert!(!first.unwrap(), "similar entries of charmander should have been dropped");
    assert!(second.unwrap());

    let vm = session.view_model();
    assert_eq!(vm.entry.as_ref().map(|e| e.id), Some(7));
    assert_eq!(vm.similar_status, LoadStatus::Ready);
    assert_eq!(names(&vm.similar), vec!["wartortle"]);
}

#[tokio::test]
async fn test_detail_missing_entry_sets_error_state() {
    let session = DetailSession::new(Arc::new(detail_catalog()));

    let err = session.open(EntryKey::Id(9999)).await.unwrap_err();
    assert!(matches!(err, DexError::NotFound(_)));

    let vm = session.view_model();
    assert!(vm.entry.is_none());
    assert!(vm.status.error().is_some_and(|e| e.contains("not found")));
    assert_eq!(vm.similar_status, LoadStatus::Idle);
}

#[tokio::test]
async fn test_detail_similar_failure_keeps_entry() {
    let catalog = detail_catalog().failing_group(Category::Water);
    let session = DetailSession::new(Arc::new(catalog));

    assert!(session.open(EntryKey::Id(7)).await.is_err());
    let vm = session.view_model();
    assert_eq!(vm.status, LoadStatus::Ready);
    assert_eq!(vm.entry.as_ref().map(|e| e.id), Some(7));
    assert!(vm.similar_status.error().is_some());
    assert!(vm.similar.is_empty());
}
