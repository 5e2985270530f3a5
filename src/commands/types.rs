use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::display::{category_badge, category_color, color_name};
use crate::error::Result;
use crate::types::Category;

/// A row in the category table
#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Type")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Badge")]
    badge: String,
}

/// List every category with its badge color
pub fn cmd_types(output: OutputOptions) -> Result<()> {
    let json_output = json!(
        Category::ALL
            .iter()
            .map(|category| json!({
                "name": category.as_str(),
                "color": color_name(category_color(*category)),
            }))
            .collect::<Vec<_>>()
    );

    let rows: Vec<CategoryRow> = Category::ALL
        .iter()
        .map(|category| CategoryRow {
            name: category.to_string(),
            color: color_name(category_color(*category)).to_string(),
            badge: category_badge(*category),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());

    CommandOutput::new(json_output)
        .with_text(format!("{table}\n\n{} type(s)", Category::ALL.len()))
        .print(output)
}
