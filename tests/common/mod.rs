#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use dexview::error::{DexError, Result};
use dexview::remote::CatalogSource;
use dexview::types::{Category, Entry, EntryKey, Stat, Summary, SummaryPage};

// ============================================================================
// Fixtures
// ============================================================================

pub fn entry(id: u32, name: &str, categories: &[Category]) -> Entry {
    Entry {
        id,
        name: name.to_string(),
        categories: categories.to_vec(),
        stats: vec![Stat {
            name: "hp".to_string(),
            base: 45,
        }],
        image: None,
        height: 7,
        weight: 69,
    }
}

/// `count` entries named `mon-1`, `mon-2`, ... with ids matching their position.
pub fn numbered(count: u32) -> Vec<Entry> {
    (1..=count)
        .map(|id| entry(id, &format!("mon-{id}"), &[Category::Normal]))
        .collect()
}

pub fn ids(entries: &[Entry]) -> Vec<u32> {
    entries.iter().map(|e| e.id).collect()
}

pub fn names(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

// ============================================================================
// In-memory catalog
// ============================================================================

/// Catalog backed by a list of entries, with optional per-request delays and
/// failures for exercising ordering and error paths.
#[derive(Default)]
pub struct FakeCatalog {
    entries: Vec<Entry>,
    count: Option<u32>,
    groups: HashMap<Category, Vec<String>>,
    entry_delays: HashMap<String, Duration>,
    page_delays: HashMap<u32, Duration>,
    failing_entries: HashSet<String>,
    failing_groups: HashSet<Category>,
    ignore_limit: bool,
    pub list_calls: AtomicUsize,
    pub entry_calls: AtomicUsize,
    pub group_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            ..Default::default()
        }
    }

    /// Report this total count instead of the number of entries.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Fix the member order of a category group.
    pub fn with_group(mut self, category: Category, members: &[&str]) -> Self {
        self.groups
            .insert(category, members.iter().map(|m| m.to_string()).collect());
        self
    }

    /// Delay detail fetches of the named entry.
    pub fn with_entry_delay(mut self, name: &str, millis: u64) -> Self {
        self.entry_delays
            .insert(name.to_string(), Duration::from_millis(millis));
        self
    }

    /// Delay list requests starting at `offset`.
    pub fn with_page_delay(mut self, offset: u32, millis: u64) -> Self {
        self.page_delays
            .insert(offset, Duration::from_millis(millis));
        self
    }

    pub fn failing_entry(mut self, name: &str) -> Self {
        self.failing_entries.insert(name.to_string());
        self
    }

    pub fn failing_group(mut self, category: Category) -> Self {
        self.failing_groups.insert(category);
        self
    }

    /// Return every entry from `offset` on, whatever limit was asked for.
    pub fn ignoring_limit(mut self) -> Self {
        self.ignore_limit = true;
        self
    }

    pub fn entry_calls(&self) -> usize {
        self.entry_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn group_calls(&self) -> usize {
        self.group_calls.load(Ordering::SeqCst)
    }

    fn reference(name: &str) -> String {
        format!("mem://pokemon/{name}")
    }

    fn summary(entry: &Entry) -> Summary {
        Summary {
            name: entry.name.clone(),
            reference: Self::reference(&entry.name),
        }
    }

    async fn fetch(&self, name: &str) -> Result<Entry> {
        self.entry_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.entry_delays.get(name) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing_entries.contains(name) {
            return Err(DexError::Network(format!("connection reset fetching {name}")));
        }
        self.entries
            .iter()
            .find(|e| e.name == name)
            .cloned()
            .ok_or_else(|| DexError::NotFound(format!("pokemon/{name}")))
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn list_summaries(&self, offset: u32, limit: u32) -> Result<SummaryPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.page_delays.get(&offset) {
            tokio::time::sleep(*delay).await;
        }

        let take = if self.ignore_limit {
            usize::MAX
        } else {
            limit as usize
        };
        let results = self
            .entries
            .iter()
            .skip(offset as usize)
            .take(take)
            .map(Self::summary)
            .collect();

        Ok(SummaryPage {
            count: self.count.unwrap_or(self.entries.len() as u32),
            results,
        })
    }

    async fn get_entry(&self, key: &EntryKey) -> Result<Entry> {
        let name = match key {
            EntryKey::Name(name) => name.clone(),
            EntryKey::Id(id) => match self.entries.iter().find(|e| e.id == *id) {
                Some(entry) => entry.name.clone(),
                None => {
                    self.entry_calls.fetch_add(1, Ordering::SeqCst);
                    return Err(DexError::NotFound(format!("pokemon/{id}")));
                }
            },
        };
        self.fetch(&name).await
    }

    async fn get_entry_at(&self, reference: &str) -> Result<Entry> {
        let name = reference
            .strip_prefix("mem://pokemon/")
            .ok_or_else(|| DexError::Decode(format!("unexpected reference {reference}")))?;
        self.fetch(name).await
    }

    async fn get_category_group(&self, category: Category) -> Result<Vec<Summary>> {
        self.group_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_groups.contains(&category) {
            return Err(DexError::Network(format!("HTTP 503 for type/{category}")));
        }

        let members = match self.groups.get(&category) {
            Some(names) => names
                .iter()
                .map(|name| Summary {
                    name: name.clone(),
                    reference: Self::reference(name),
                })
                .collect(),
            None => self
                .entries
                .iter()
                .filter(|e| e.has_category(category))
                .map(Self::summary)
                .collect(),
        };
        Ok(members)
    }
}

// ============================================================================
// Binary runner
// ============================================================================

/// Runs the dexview binary with an isolated config file.
pub struct DexTest {
    pub temp_dir: TempDir,
    base_url: Option<String>,
}

impl DexTest {
    pub fn new() -> Self {
        DexTest {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            base_url: None,
        }
    }

    /// Point the binary at a (mock) catalog server.
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_dexview"));
        command
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("DEXVIEW_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("DEXVIEW_BASE_URL")
            .env_remove("RUST_LOG");
        if let Some(url) = &self.base_url {
            command.env("DEXVIEW_BASE_URL", url);
        }
        command.output().expect("Failed to execute dexview")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}
