//! Remote catalog access.
//!
//! The derived-query layer and the view sessions only talk to the catalog
//! through [`CatalogSource`]. [`PokeApiClient`] is the HTTP implementation;
//! tests supply in-memory sources.

pub mod client;
pub mod wire;

use crate::error::Result;
use crate::types::{Category, Entry, EntryKey, Summary, SummaryPage};

pub use client::PokeApiClient;

/// Read-only operations offered by the remote catalog.
///
/// Each call is a single request/response round trip: no retry, no caching.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one window of the entry list together with the total count.
    async fn list_summaries(&self, offset: u32, limit: u32) -> Result<SummaryPage>;

    /// Fetch a single entry by id or name.
    async fn get_entry(&self, key: &EntryKey) -> Result<Entry>;

    /// Fetch the entry a [`Summary::reference`] points at.
    async fn get_entry_at(&self, reference: &str) -> Result<Entry>;

    /// Fetch every entry tagged with `category`.
    async fn get_category_group(&self, category: Category) -> Result<Vec<Summary>>;
}

