use crate::cli::OutputOptions;
use crate::commands::{catalog_client, print_json};
use crate::display::format_detail_view;
use crate::error::Result;
use crate::types::EntryKey;
use crate::view::DetailSession;

/// Show one entry and the entries most similar to it.
///
/// A failed similar-entries load still prints the entry; only a failed
/// entry load is an error.
pub async fn cmd_show(key: &str, output: OutputOptions) -> Result<()> {
    let session = DetailSession::new(catalog_client()?);

    if let Err(err) = session.open(EntryKey::parse(key)).await
        && session.snapshot().entry.is_none()
    {
        return Err(err);
    }

    let vm = session.view_model();
    if output.json {
        print_json(&vm)
    } else {
        println!("{}", format_detail_view(&vm));
        Ok(())
    }
}
