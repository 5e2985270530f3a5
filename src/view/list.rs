//! List view: paginated entries with client-side search, filter and sort.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::error::{DexError, Result};
use crate::query::{LoadedPage, ViewFilter, apply_filter, load_page};
use crate::remote::CatalogSource;
use crate::types::{Category, Entry};

use super::LoadStatus;

// ============================================================================
// State Types
// ============================================================================

/// Raw list view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    /// Page the user asked for (1-based)
    pub current_page: u32,
    /// Page the loaded entries belong to
    pub loaded_page: Option<u32>,
    /// Entries of the loaded page, in list order
    pub entries: Vec<Entry>,
    /// Total number of pages from the last count request (0 = unknown)
    pub total_pages: u32,
    /// Search, category and sort inputs
    pub filter: ViewFilter,
    /// Progress of the current page request
    pub status: LoadStatus,
    /// Bumped by every page request; results carry the epoch they were issued for
    pub epoch: u64,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            current_page: 1,
            loaded_page: None,
            entries: Vec::new(),
            total_pages: 0,
            filter: ViewFilter::default(),
            status: LoadStatus::Idle,
            epoch: 0,
        }
    }
}

impl ListState {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.total_pages > 0 && self.current_page < self.total_pages
    }
}

// ============================================================================
// Action Types
// ============================================================================

/// All possible actions on the list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// Switch to a page and start loading it
    RequestPage(u32),
    /// Go one page forward, if there is one
    NextPage,
    /// Go one page back, if there is one
    PreviousPage,
    /// A page load finished
    PageLoaded {
        epoch: u64,
        result: std::result::Result<LoadedPage, String>,
    },
    /// Replace the search text
    SetSearch(String),
    /// Select a category, or clear the selection
    SetCategory(Option<Category>),
    /// Flip between list order and name order
    ToggleSort,
}

/// A page load the session has to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub epoch: u64,
    pub page: u32,
}

// ============================================================================
// View Model Types
// ============================================================================

/// Computed list view for rendering
#[derive(Debug, Clone, Serialize)]
pub struct ListViewModel {
    pub page: u32,
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
    pub status: LoadStatus,
    pub filter: ViewFilter,
    /// Number of entries on the loaded page before filtering
    pub loaded_count: usize,
    /// Displayed subset, filtered and possibly sorted
    pub entries: Vec<Entry>,
}

// ============================================================================
// Pure Functions
// ============================================================================

/// Pure function: compute view model from state
pub fn compute_list_view_model(state: &ListState) -> ListViewModel {
    let shown = apply_filter(&state.entries, &state.filter);

    ListViewModel {
        page: state.current_page,
        total_pages: state.total_pages,
        has_previous: state.has_previous(),
        has_next: state.has_next(),
        status: state.status.clone(),
        filter: state.filter.clone(),
        loaded_count: state.entries.len(),
        entries: shown.into_iter().cloned().collect(),
    }
}

/// Pure function: apply an action to the list state.
///
/// Page changes only bump the epoch and mark the view as loading; the
/// session performs the fetch. Results for any epoch but the current one
/// are discarded.
pub fn reduce_list_state(mut state: ListState, action: ListAction) -> ListState {
    match action {
        ListAction::RequestPage(page) => {
            if page == 0 {
                tracing::debug!("ignoring request for page 0");
                return state;
            }
            state.current_page = page;
            state.epoch += 1;
            state.status = LoadStatus::Loading;
        }
        ListAction::NextPage => {
            if state.has_next() {
                let page = state.current_page + 1;
                return reduce_list_state(state, ListAction::RequestPage(page));
            }
        }
        ListAction::PreviousPage => {
            if state.has_previous() {
                let page = state.current_page - 1;
                return reduce_list_state(state, ListAction::RequestPage(page));
            }
        }
        ListAction::PageLoaded { epoch, result } => {
            if epoch != state.epoch {
                tracing::debug!(
                    epoch,
                    current = state.epoch,
                    "discarding stale page result"
                );
                return state;
            }
            match result {
                Ok(loaded) => {
                    state.loaded_page = Some(loaded.page);
                    state.entries = loaded.entries;
                    state.total_pages = loaded.total_pages;
                    state.status = LoadStatus::Ready;
                }
                Err(message) => {
                    state.status = LoadStatus::Failed(message);
                }
            }
        }
        ListAction::SetSearch(search) => state.filter.search = search,
        ListAction::SetCategory(category) => state.filter.category = category,
        ListAction::ToggleSort => state.filter.sort_by_name = !state.filter.sort_by_name,
    }
    state
}

// ============================================================================
// Session
// ============================================================================

/// Owns a list view state and performs the page loads it requests.
pub struct ListSession<S: ?Sized> {
    source: Arc<S>,
    state: Mutex<ListState>,
}

impl<S: CatalogSource + ?Sized> ListSession<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            state: Mutex::new(ListState::default()),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> ListState {
        self.state.lock().clone()
    }

    pub fn view_model(&self) -> ListViewModel {
        compute_list_view_model(&self.state.lock())
    }

    /// Apply an action synchronously.
    ///
    /// Returns the page load the action started, if any; pass it to
    /// [`ListSession::fulfill`].
    pub fn dispatch(&self, action: ListAction) -> Option<PageRequest> {
        let mut guard = self.state.lock();
        let before = guard.epoch;
        let state = std::mem::take(&mut *guard);
        *guard = reduce_list_state(state, action);

        (guard.epoch != before).then_some(PageRequest {
            epoch: guard.epoch,
            page: guard.current_page,
        })
    }

    /// Load the requested page and commit it.
    ///
    /// Returns `Ok(false)` when a newer request superseded this one while it
    /// was in flight; its result (or error) is dropped.
    pub async fn fulfill(&self, request: PageRequest) -> Result<bool> {
        let result = load_page(self.source.as_ref(), request.page).await;

        match result {
            Ok(loaded) => Ok(self.commit(request.epoch, Ok(loaded))),
            Err(err) => {
                let current = self.commit(request.epoch, Err(err.to_string()));
                if current {
                    tracing::warn!(page = request.page, kind = err.kind(), "failed to load page: {err}");
                    Err(err)
                } else {
                    Ok(false)
                }
            }
        }
    }

    /// Apply a load result under a single lock; true when it was current.
    fn commit(&self, epoch: u64, result: std::result::Result<LoadedPage, String>) -> bool {
        let mut guard = self.state.lock();
        let current = guard.epoch == epoch;
        let state = std::mem::take(&mut *guard);
        *guard = reduce_list_state(state, ListAction::PageLoaded { epoch, result });
        current
    }

    /// Switch to `page` and load it.
    pub async fn go_to_page(&self, page: u32) -> Result<bool> {
        if page == 0 {
            return Err(DexError::InvalidPage(page));
        }
        match self.dispatch(ListAction::RequestPage(page)) {
            Some(request) => self.fulfill(request).await,
            None => Ok(false),
        }
    }

    /// Load the next page; `Ok(false)` when already on the last one.
    pub async fn next_page(&self) -> Result<bool> {
        match self.dispatch(ListAction::NextPage) {
            Some(request) => self.fulfill(request).await,
            None => Ok(false),
        }
    }

    /// Load the previous page; `Ok(false)` when already on the first one.
    pub async fn previous_page(&self) -> Result<bool> {
        match self.dispatch(ListAction::PreviousPage) {
            Some(request) => self.fulfill(request).await,
            None => Ok(false),
        }
    }

    pub fn set_search(&self, search: impl Into<String>) {
        self.dispatch(ListAction::SetSearch(search.into()));
    }

    pub fn set_category(&self, category: Option<Category>) {
        self.dispatch(ListAction::SetCategory(category));
    }

    pub fn toggle_sort(&self) {
        self.dispatch(ListAction::ToggleSort);
    }
}
