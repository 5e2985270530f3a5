use crate::cli::OutputOptions;
use crate::commands::{catalog_client, print_json};
use crate::display::format_list_view;
use crate::error::Result;
use crate::types::Category;
use crate::view::ListSession;

/// Inputs of the `list` command
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub page: u32,
    pub search: Option<String>,
    pub category: Option<Category>,
    pub sort_by_name: bool,
}

/// Load one page of the catalog and show it through the list view.
pub async fn cmd_list(options: ListOptions, output: OutputOptions) -> Result<()> {
    let session = ListSession::new(catalog_client()?);

    if let Some(search) = options.search {
        session.set_search(search);
    }
    session.set_category(options.category);
    if options.sort_by_name {
        session.toggle_sort();
    }

    session.go_to_page(options.page).await?;

    let vm = session.view_model();
    if output.json {
        print_json(&vm)
    } else {
        println!("{}", format_list_view(&vm));
        Ok(())
    }
}
