#[macro_use]
mod macros;

pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod query;
pub mod remote;
pub mod types;
pub mod view;

pub use config::Config;
pub use error::{DexError, Result};
pub use query::{LoadedPage, ViewFilter, apply_filter, load_page, resolve_page, resolve_similar};
pub use remote::{CatalogSource, PokeApiClient};
pub use types::{
    Category, Entry, EntryKey, PAGE_SIZE, PageWindow, SIMILAR_LIMIT, Stat, Summary, SummaryPage,
    total_pages,
};
pub use view::{DetailSession, ListSession, LoadStatus};
