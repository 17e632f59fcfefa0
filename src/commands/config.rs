use clap::Subcommand;

use crate::shared::config::generate_schema;

/// Configuration file commands.
#[derive(Subcommand, Clone, PartialEq, Eq, Debug)]
pub enum ConfigCommands {
    /// Print JSON Schema for the configuration file
    Schema,
}

impl ConfigCommands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Schema => {
                let json = serde_json::to_string_pretty(&generate_schema())?;
                println!("{json}");
                Ok(())
            }
        }
    }
}
