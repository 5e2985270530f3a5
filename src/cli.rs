use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;

use crate::commands::{
    ListOptions, cmd_config_get, cmd_config_set, cmd_config_show, cmd_list, cmd_show, cmd_types,
};
use crate::types::Category;

#[derive(Parser)]
#[command(name = "dexview")]
#[command(about = "Browse the Pokémon catalog from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Output flags shared by every command
#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List one page of entries
    #[command(visible_alias = "ls")]
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1", value_parser = parse_page)]
        page: u32,

        /// Only show entries whose name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only show entries of this type
        #[arg(short = 't', long = "type", value_parser = parse_category)]
        category: Option<Category>,

        /// Order the page by name
        #[arg(long)]
        sort: bool,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Show an entry and its most similar entries
    Show {
        /// Entry id or name
        key: String,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// List the entry types and their colors
    Types {
        #[command(flatten)]
        output: OutputOptions,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        #[command(flatten)]
        output: OutputOptions,
    },
    /// Print a configuration value
    Get {
        /// Configuration key
        key: String,

        #[command(flatten)]
        output: OutputOptions,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (base_url, timeout_secs, connect_timeout_secs)
        key: String,
        /// Value to store
        value: String,

        #[command(flatten)]
        output: OutputOptions,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self) -> crate::error::Result<()> {
        match self {
            Commands::List {
                page,
                search,
                category,
                sort,
                output,
            } => {
                let options = ListOptions {
                    page,
                    search,
                    category,
                    sort_by_name: sort,
                };
                cmd_list(options, output).await
            }

            Commands::Show { key, output } => cmd_show(&key, output).await,

            Commands::Types { output } => cmd_types(output),

            Commands::Config { action } => match action {
                ConfigAction::Show { output } => cmd_config_show(output),
                ConfigAction::Get { key, output } => cmd_config_get(&key, output),
                ConfigAction::Set { key, value, output } => cmd_config_set(&key, &value, output),
            },

            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

fn parse_page(s: &str) -> Result<u32, String> {
    match s.trim().parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(format!("invalid page '{s}': must be a number starting at 1")),
    }
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse::<Category>().map_err(|_| {
        let valid: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        format!("invalid type '{s}'. Must be one of: {}", valid.join(", "))
    })
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "dexview", &mut io::stdout());
}
