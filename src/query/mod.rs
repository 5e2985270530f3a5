//! Derived queries over the remote catalog.
//!
//! Everything here fans out concurrently and reassembles results by input
//! position, never by completion order. Any failing branch aborts the whole
//! query with that error; there is no partial result.

use std::collections::HashSet;

use futures::future::try_join_all;

use crate::error::Result;
use crate::remote::CatalogSource;
use crate::types::{Category, Entry, PageWindow, SIMILAR_LIMIT, Summary, total_pages};

pub mod filter;

pub use filter::{ViewFilter, apply_filter, compare_names};

/// Resolve one window of the remote list into full entries.
///
/// All detail fetches are issued before any is awaited; the output keeps the
/// order of the list response and never holds more than `limit` entries.
pub async fn resolve_page<S>(source: &S, offset: u32, limit: u32) -> Result<Vec<Entry>>
where
    S: CatalogSource + ?Sized,
{
    let page = source.list_summaries(offset, limit).await?;
    let summaries: Vec<Summary> = page.results.into_iter().take(limit as usize).collect();

    tracing::debug!(offset, limit, count = summaries.len(), "resolving page");
    resolve_summaries(source, &summaries).await
}

/// Find up to [`SIMILAR_LIMIT`] entries that carry every one of `categories`.
///
/// Membership is decided on names across all category groups. The first
/// `SIMILAR_LIMIT` names are resolved and only then is `exclude_id` removed,
/// so a result may hold fewer than the limit when the source entry was among
/// them. Exclusion relies on names being unique in the catalog.
pub async fn resolve_similar<S>(
    source: &S,
    categories: &[Category],
    exclude_id: u32,
) -> Result<Vec<Entry>>
where
    S: CatalogSource + ?Sized,
{
    if categories.is_empty() {
        return Ok(Vec::new());
    }

    let groups = try_join_all(
        categories
            .iter()
            .map(|category| source.get_category_group(*category)),
    )
    .await?;

    let candidates: Vec<Summary> = intersect_groups(groups)
        .into_iter()
        .take(SIMILAR_LIMIT)
        .collect();

    tracing::debug!(
        ?categories,
        candidates = candidates.len(),
        "resolving similar entries"
    );

    let entries = resolve_summaries(source, &candidates).await?;
    Ok(entries
        .into_iter()
        .filter(|entry| entry.id != exclude_id)
        .collect())
}

/// Members present in every group, in the order of the first group.
///
/// The resulting member set does not depend on group order; only the
/// ordering follows the first group. Duplicate names are kept once.
pub fn intersect_groups(groups: Vec<Vec<Summary>>) -> Vec<Summary> {
    let mut groups = groups.into_iter();
    let Some(first) = groups.next() else {
        return Vec::new();
    };

    let others: Vec<HashSet<String>> = groups
        .map(|group| group.into_iter().map(|member| member.name).collect())
        .collect();

    let mut seen = HashSet::new();
    first
        .into_iter()
        .filter(|member| others.iter().all(|names| names.contains(&member.name)))
        .filter(|member| seen.insert(member.name.clone()))
        .collect()
}

/// A resolved list page together with the current total page count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPage {
    pub page: u32,
    pub entries: Vec<Entry>,
    pub total_pages: u32,
}

/// Load a 1-based list page: a `(0, 1)` count request runs alongside the page
/// resolution and yields the total page count.
pub async fn load_page<S>(source: &S, page: u32) -> Result<LoadedPage>
where
    S: CatalogSource + ?Sized,
{
    let window = PageWindow::for_page(page)?;

    let (counted, entries) = futures::try_join!(
        source.list_summaries(0, 1),
        resolve_page(source, window.offset, window.limit)
    )?;

    Ok(LoadedPage {
        page,
        entries,
        total_pages: total_pages(counted.count),
    })
}

async fn resolve_summaries<S>(source: &S, summaries: &[Summary]) -> Result<Vec<Entry>>
where
    S: CatalogSource + ?Sized,
{
    try_join_all(
        summaries
            .iter()
            .map(|summary| source.get_entry_at(&summary.reference)),
    )
    .await
}
