mod config;
mod list;
mod show;
mod types;

pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use list::{ListOptions, cmd_list};
pub use show::cmd_show;
pub use types::cmd_types;

use std::sync::Arc;

use serde::Serialize;

use crate::cli::OutputOptions;
use crate::config::Config;
use crate::error::Result;
use crate::remote::PokeApiClient;

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Output of a command, in both of its renderings.
pub struct CommandOutput {
    json: serde_json::Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: serde_json::Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print the JSON form when requested, the text form otherwise.
    pub fn print(self, output: OutputOptions) -> Result<()> {
        match self.text {
            Some(text) if !output.json => {
                println!("{text}");
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}

/// Catalog client built from the loaded configuration.
fn catalog_client() -> Result<Arc<PokeApiClient>> {
    let config = Config::load()?;
    let client = PokeApiClient::from_config(&config)?;
    tracing::debug!(base_url = %client.base_url(), "using catalog");
    Ok(Arc::new(client))
}
