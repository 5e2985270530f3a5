use serde::{Deserialize, Serialize};

use crate::error::{DexError, Result};

/// Number of entries shown per list page.
pub const PAGE_SIZE: u32 = 10;

/// Maximum number of similar entries shown on a detail view.
pub const SIMILAR_LIMIT: usize = 5;

/// Highest base stat value in the catalog, used to scale stat bars.
pub const MAX_BASE_STAT: u32 = 255;

/// Classification tag of an entry (a "type" in the catalog API).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl Category {
    /// All categories in the order the catalog lists them.
    pub const ALL: [Category; 18] = [
        Category::Normal,
        Category::Fire,
        Category::Water,
        Category::Electric,
        Category::Grass,
        Category::Ice,
        Category::Fighting,
        Category::Poison,
        Category::Ground,
        Category::Flying,
        Category::Psychic,
        Category::Bug,
        Category::Rock,
        Category::Ghost,
        Category::Dragon,
        Category::Dark,
        Category::Steel,
        Category::Fairy,
    ];
}

enum_display_fromstr!(
    Category,
    DexError::InvalidCategory,
    {
        Normal => "normal",
        Fire => "fire",
        Water => "water",
        Electric => "electric",
        Grass => "grass",
        Ice => "ice",
        Fighting => "fighting",
        Poison => "poison",
        Ground => "ground",
        Flying => "flying",
        Psychic => "psychic",
        Bug => "bug",
        Rock => "rock",
        Ghost => "ghost",
        Dragon => "dragon",
        Dark => "dark",
        Steel => "steel",
        Fairy => "fairy",
    }
);

/// One named base stat of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub base: u32,
}

impl Stat {
    /// Display label: the API uses dashes ("special-attack").
    pub fn label(&self) -> String {
        self.name.replace('-', " ")
    }
}

/// A fully resolved catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: u32,
    pub name: String,
    pub categories: Vec<Category>,
    pub stats: Vec<Stat>,
    /// Official artwork URL, when the catalog has one.
    pub image: Option<String>,
    /// Height in decimetres.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
}

impl Entry {
    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    /// Zero-padded catalog number, e.g. `#025`.
    pub fn number(&self) -> String {
        format!("#{:03}", self.id)
    }
}

/// Lightweight list row: a name and the URL its detail record lives at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub name: String,
    pub reference: String,
}

/// One page of the remote list plus the total number of entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummaryPage {
    pub count: u32,
    pub results: Vec<Summary>,
}

/// How to address a single entry on the detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum EntryKey {
    Id(u32),
    Name(String),
}

impl EntryKey {
    /// Parse user input: digits are an id, anything else is a name.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        match s.parse::<u32>() {
            Ok(id) => EntryKey::Id(id),
            Err(_) => EntryKey::Name(s.to_lowercase()),
        }
    }

    /// Path segment used on the detail endpoint.
    pub fn path_segment(&self) -> String {
        match self {
            EntryKey::Id(id) => id.to_string(),
            EntryKey::Name(name) => name.clone(),
        }
    }
}

impl std::fmt::Display for EntryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path_segment())
    }
}

/// Contiguous slice of the remote list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u32,
    pub limit: u32,
}

impl PageWindow {
    /// Window for a 1-based page number with the fixed page size.
    pub fn for_page(page: u32) -> Result<Self> {
        if page == 0 {
            return Err(DexError::InvalidPage(page));
        }
        Ok(PageWindow {
            offset: (page - 1) * PAGE_SIZE,
            limit: PAGE_SIZE,
        })
    }
}

/// Number of pages needed to show `count` entries.
pub fn total_pages(count: u32) -> u32 {
    count.div_ceil(PAGE_SIZE)
}
