//! Detail view: one entry plus the entries most similar to it.
//!
//! Loading happens in two stages. The entry is committed as soon as it
//! arrives; the similar entries follow once their derived query finishes.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::error::Result;
use crate::query::resolve_similar;
use crate::remote::CatalogSource;
use crate::types::{Entry, EntryKey};

use super::LoadStatus;

// ============================================================================
// State Types
// ============================================================================

/// Raw detail view state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailState {
    /// Entry the view is showing (or loading)
    pub key: Option<EntryKey>,
    /// The loaded entry; always belongs to `key`
    pub entry: Option<Entry>,
    /// Similar entries of `entry`
    pub similar: Vec<Entry>,
    /// Progress of the entry load
    pub status: LoadStatus,
    /// Progress of the similar-entries load
    pub similar_status: LoadStatus,
    /// Bumped whenever `key` changes
    pub epoch: u64,
}

// ============================================================================
// Action Types
// ============================================================================

/// All possible actions on the detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAction {
    /// Show another entry
    Open(EntryKey),
    /// The entry load finished
    EntryLoaded {
        epoch: u64,
        result: std::result::Result<Entry, String>,
    },
    /// The similar-entries load finished
    SimilarLoaded {
        epoch: u64,
        result: std::result::Result<Vec<Entry>, String>,
    },
}

// ============================================================================
// View Model Types
// ============================================================================

/// Computed detail view for rendering
#[derive(Debug, Clone, Serialize)]
pub struct DetailViewModel {
    pub key: Option<EntryKey>,
    pub status: LoadStatus,
    pub entry: Option<Entry>,
    pub similar_status: LoadStatus,
    pub similar: Vec<Entry>,
}

// ============================================================================
// Pure Functions
// ============================================================================

pub fn compute_detail_view_model(state: &DetailState) -> DetailViewModel {
    DetailViewModel {
        key: state.key.clone(),
        status: state.status.clone(),
        entry: state.entry.clone(),
        similar_status: state.similar_status.clone(),
        similar: state.similar.clone(),
    }
}

/// Pure function: apply an action to the detail state.
///
/// Opening the key that is already loaded or loading is a no-op; reopening
/// after a failure starts over. Results for a superseded epoch are dropped.
pub fn reduce_detail_state(mut state: DetailState, action: DetailAction) -> DetailState {
    match action {
        DetailAction::Open(key) => {
            let in_progress = matches!(state.status, LoadStatus::Loading | LoadStatus::Ready);
            if state.key.as_ref() == Some(&key) && in_progress {
                return state;
            }
            state.key = Some(key);
            state.entry = None;
            state.similar.clear();
            state.status = LoadStatus::Loading;
            state.similar_status = LoadStatus::Idle;
            state.epoch += 1;
        }
        DetailAction::EntryLoaded { epoch, result } => {
            if epoch != state.epoch {
                tracing::debug!(epoch, current = state.epoch, "discarding stale entry");
                return state;
            }
            match result {
                Ok(entry) => {
                    state.entry = Some(entry);
                    state.status = LoadStatus::Ready;
                    state.similar_status = LoadStatus::Loading;
                }
                Err(message) => state.status = LoadStatus::Failed(message),
            }
        }
        DetailAction::SimilarLoaded { epoch, result } => {
            if epoch != state.epoch || state.entry.is_none() {
                tracing::debug!(epoch, current = state.epoch, "discarding stale similar entries");
                return state;
            }
            match result {
                Ok(similar) => {
                    state.similar = similar;
                    state.similar_status = LoadStatus::Ready;
                }
                Err(message) => state.similar_status = LoadStatus::Failed(message),
            }
        }
    }
    state
}

// ============================================================================
// Session
// ============================================================================

/// Owns a detail view state and performs the loads it requests.
pub struct DetailSession<S: ?Sized> {
    source: Arc<S>,
    state: Mutex<DetailState>,
}

impl<S: CatalogSource + ?Sized> DetailSession<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            state: Mutex::new(DetailState::default()),
        }
    }

    pub fn snapshot(&self) -> DetailState {
        self.state.lock().clone()
    }

    pub fn view_model(&self) -> DetailViewModel {
        compute_detail_view_model(&self.state.lock())
    }

    /// Apply an action; returns whether the state's epoch matched `epoch`
    /// beforehand (always true for `Open`).
    fn apply(&self, action: DetailAction) -> bool {
        let mut guard = self.state.lock();
        let current = match &action {
            DetailAction::Open(_) => true,
            DetailAction::EntryLoaded { epoch, .. } | DetailAction::SimilarLoaded { epoch, .. } => {
                guard.epoch == *epoch
            }
        };
        let state = std::mem::take(&mut *guard);
        *guard = reduce_detail_state(state, action);
        current
    }

    /// Show the entry for `key`: load it, commit it, then load and commit
    /// its similar entries.
    ///
    /// Returns `Ok(false)` when nothing was loaded: the key was already
    /// current, or another `open` superseded this one midway. Errors are
    /// recorded in the state and returned only while still current.
    pub async fn open(&self, key: EntryKey) -> Result<bool> {
        let epoch = {
            let mut guard = self.state.lock();
            let before = guard.epoch;
            let state = std::mem::take(&mut *guard);
            *guard = reduce_detail_state(state, DetailAction::Open(key.clone()));
            if guard.epoch == before {
                return Ok(false);
            }
            guard.epoch
        };

        let entry = match self.source.get_entry(&key).await {
            Ok(entry) => entry,
            Err(err) => {
                let current = self.apply(DetailAction::EntryLoaded {
                    epoch,
                    result: Err(err.to_string()),
                });
                if current {
                    tracing::warn!(%key, kind = err.kind(), "failed to load entry: {err}");
                    return Err(err);
                }
                return Ok(false);
            }
        };

        let categories = entry.categories.clone();
        let source_id = entry.id;
        if !self.apply(DetailAction::EntryLoaded {
            epoch,
            result: Ok(entry),
        }) {
            return Ok(false);
        }

        match resolve_similar(self.source.as_ref(), &categories, source_id).await {
            Ok(similar) => Ok(self.apply(DetailAction::SimilarLoaded {
                epoch,
                result: Ok(similar),
            })),
            Err(err) => {
                let current = self.apply(DetailAction::SimilarLoaded {
                    epoch,
                    result: Err(err.to_string()),
                });
                if current {
                    tracing::warn!(%key, kind = err.kind(), "failed to load similar entries: {err}");
                    return Err(err);
                }
                Ok(false)
            }
        }
    }
}
