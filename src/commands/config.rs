//! Configuration commands.
//!
//! - `config show`: Display the effective configuration
//! - `config get`: Print a single value
//! - `config set`: Validate and store a value

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::error::Result;

/// Show current configuration, including environment overrides
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let path = Config::config_path()?;

    let json_output = json!({
        "base_url": config.base_url,
        "timeout_secs": config.timeout_secs,
        "connect_timeout_secs": config.connect_timeout_secs,
        "config_file": path.to_string_lossy(),
    });

    let mut text_output = format!("{}\n\n", "Configuration:".cyan().bold());
    for key in Config::KEYS {
        text_output.push_str(&format!("{}: {}\n", key.cyan(), config.get(key)?));
    }
    text_output.push('\n');
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}", path.display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}

/// Print one configuration value
pub fn cmd_config_get(key: &str, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let value = config.get(key)?;

    CommandOutput::new(json!({ "key": key, "value": value }))
        .with_text(value)
        .print(output)
}

/// Set a configuration value in the config file
///
/// Environment overrides are not persisted: the file is read and written
/// as-is.
pub fn cmd_config_set(key: &str, value: &str, output: OutputOptions) -> Result<()> {
    let path = Config::config_path()?;
    let mut config = Config::load_from(&path)?;
    config.set(key, value)?;
    config.save_to(&path)?;

    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": value,
        "success": true,
    }))
    .with_text(format!("Set {} to {}", key.cyan(), value))
    .print(output)
}
