//! Terminal rendering of the list and detail views.
//!
//! Colors go through `if_supports_color`, so piped output and `NO_COLOR`
//! produce plain text.

use owo_colors::{AnsiColors, OwoColorize, Stream};

use crate::types::{Category, Entry, MAX_BASE_STAT, Stat};
use crate::view::{DetailViewModel, ListViewModel, LoadStatus};

/// Width of a full stat bar in cells.
const STAT_BAR_WIDTH: usize = 20;

/// Badge background for each category.
pub fn category_color(category: Category) -> AnsiColors {
    match category {
        Category::Normal => AnsiColors::BrightBlack,
        Category::Fire => AnsiColors::Red,
        Category::Water => AnsiColors::Blue,
        Category::Electric => AnsiColors::BrightYellow,
        Category::Grass => AnsiColors::Green,
        Category::Ice => AnsiColors::BrightCyan,
        Category::Fighting => AnsiColors::BrightRed,
        Category::Poison => AnsiColors::Magenta,
        Category::Ground => AnsiColors::Yellow,
        Category::Flying => AnsiColors::BrightBlue,
        Category::Psychic => AnsiColors::BrightMagenta,
        Category::Bug => AnsiColors::BrightGreen,
        Category::Rock => AnsiColors::Yellow,
        Category::Ghost => AnsiColors::Magenta,
        Category::Dragon => AnsiColors::Blue,
        Category::Dark => AnsiColors::Black,
        Category::Steel => AnsiColors::White,
        Category::Fairy => AnsiColors::BrightMagenta,
    }
}

/// Human name of a badge color, for the `types` listing.
pub fn color_name(color: AnsiColors) -> &'static str {
    match color {
        AnsiColors::Black => "black",
        AnsiColors::Red => "red",
        AnsiColors::Green => "green",
        AnsiColors::Yellow => "yellow",
        AnsiColors::Blue => "blue",
        AnsiColors::Magenta => "magenta",
        AnsiColors::Cyan => "cyan",
        AnsiColors::White => "white",
        AnsiColors::Default => "default",
        AnsiColors::BrightBlack => "bright black",
        AnsiColors::BrightRed => "bright red",
        AnsiColors::BrightGreen => "bright green",
        AnsiColors::BrightYellow => "bright yellow",
        AnsiColors::BrightBlue => "bright blue",
        AnsiColors::BrightMagenta => "bright magenta",
        AnsiColors::BrightCyan => "bright cyan",
        AnsiColors::BrightWhite => "bright white",
    }
}

pub fn category_badge(category: Category) -> String {
    let label = format!(" {category} ");
    let background = category_color(category);
    label
        .if_supports_color(Stream::Stdout, |text| {
            text.color(AnsiColors::BrightWhite)
                .on_color(background)
                .to_string()
        })
        .to_string()
}

fn bold(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.bold().to_string())
        .to_string()
}

fn dimmed(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.dimmed().to_string())
        .to_string()
}

fn error_text(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.red().to_string())
        .to_string()
}

/// Uppercase the first letter, as the catalog stores names in lowercase.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Single-line card: number, name and category badges.
pub fn format_entry_card(entry: &Entry) -> String {
    let badges: Vec<String> = entry.categories.iter().map(|c| category_badge(*c)).collect();
    format!(
        "{}  {:<14} {}",
        dimmed(&entry.number()),
        bold(&capitalize(&entry.name)),
        badges.join(" ")
    )
}

/// Bar proportional to `base` out of [`MAX_BASE_STAT`].
pub fn stat_bar(base: u32) -> String {
    let capped = base.min(MAX_BASE_STAT) as usize;
    let filled = (capped * STAT_BAR_WIDTH + MAX_BASE_STAT as usize / 2) / MAX_BASE_STAT as usize;
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(STAT_BAR_WIDTH - filled)
    )
}

fn format_stat(stat: &Stat) -> String {
    format!(
        "  {:<16} {:>3} {}",
        capitalize(&stat.label()),
        stat.base,
        stat_bar(stat.base)
    )
}

fn format_status(status: &LoadStatus, what: &str) -> Option<String> {
    match status {
        LoadStatus::Idle | LoadStatus::Ready => None,
        LoadStatus::Loading => Some(dimmed(&format!("Loading {what}..."))),
        LoadStatus::Failed(message) => {
            Some(error_text(&format!("Failed to load {what}: {message}")))
        }
    }
}

/// Page footer, e.g. `‹ Previous  Page 2 of 15  Next ›`; unavailable
/// directions are dimmed.
pub fn format_pagination(vm: &ListViewModel) -> String {
    let previous = if vm.has_previous {
        "‹ Previous".to_string()
    } else {
        dimmed("‹ Previous")
    };
    let next = if vm.has_next {
        "Next ›".to_string()
    } else {
        dimmed("Next ›")
    };
    format!(
        "{previous}  Page {} of {}  {next}",
        vm.page, vm.total_pages
    )
}

/// Render the whole list view.
pub fn format_list_view(vm: &ListViewModel) -> String {
    let mut lines = vec![bold("Pokédex"), String::new()];

    let mut narrowing = Vec::new();
    if !vm.filter.search.is_empty() {
        narrowing.push(format!("search \"{}\"", vm.filter.search));
    }
    if let Some(category) = vm.filter.category {
        narrowing.push(format!("type {category}"));
    }
    if vm.filter.sort_by_name {
        narrowing.push("sorted by name".to_string());
    }
    if !narrowing.is_empty() {
        lines.push(dimmed(&format!("Filter: {}", narrowing.join(", "))));
        lines.push(String::new());
    }

    if let Some(status) = format_status(&vm.status, "page") {
        lines.push(status);
        lines.push(String::new());
    }

    if vm.entries.is_empty() {
        if vm.loaded_count > 0 && vm.filter.is_narrowing() {
            lines.push(format!(
                "No entries on this page match the filter ({} loaded).",
                vm.loaded_count
            ));
        } else if !vm.status.is_loading() {
            lines.push("No entries on this page.".to_string());
        }
    } else {
        lines.extend(vm.entries.iter().map(format_entry_card));
    }

    lines.push(String::new());
    lines.push(format_pagination(vm));
    lines.join("\n")
}

/// Render the detail view: entry header, measurements, stats, similar entries.
pub fn format_detail_view(vm: &DetailViewModel) -> String {
    let mut lines = Vec::new();

    let Some(entry) = &vm.entry else {
        let status = format_status(&vm.status, "entry").unwrap_or_else(|| "Loading...".to_string());
        return status;
    };

    lines.push(dimmed(&entry.number()));
    lines.push(bold(&capitalize(&entry.name)));
    let badges: Vec<String> = entry.categories.iter().map(|c| category_badge(*c)).collect();
    lines.push(badges.join(" "));
    lines.push(String::new());
    lines.push(format!(
        "Height  {}m    Weight  {}kg",
        entry.height_m(),
        entry.weight_kg()
    ));
    if let Some(image) = &entry.image {
        lines.push(format!("Artwork {}", dimmed(image)));
    }

    if !entry.stats.is_empty() {
        lines.push(String::new());
        lines.push(bold("Stats"));
        lines.extend(entry.stats.iter().map(format_stat));
    }

    if let Some(status) = format_status(&vm.similar_status, "similar entries") {
        lines.push(String::new());
        lines.push(status);
    } else if !vm.similar.is_empty() {
        lines.push(String::new());
        lines.push(bold("Similar"));
        lines.extend(
            vm.similar
                .iter()
                .map(|similar| format!("  {}", format_entry_card(similar))),
        );
    }

    lines.join("\n")
}
