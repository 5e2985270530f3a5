//! Page-level view state machines.
//!
//! Each view is a plain state struct changed only through a pure reducer
//! (`reduce_*_state`). A session wraps the state in a mutex and performs the
//! async loads the reducer asks for. Every load is tagged with the epoch of
//! the request that started it; results whose epoch is no longer current are
//! dropped by the reducer, so a slow response can never overwrite a newer one.

pub mod detail;
pub mod list;

use serde::Serialize;

pub use detail::{
    DetailAction, DetailSession, DetailState, DetailViewModel, compute_detail_view_model,
    reduce_detail_state,
};
pub use list::{
    ListAction, ListSession, ListState, ListViewModel, PageRequest, compute_list_view_model,
    reduce_list_state,
};

/// Progress of an async load owned by a view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}
