use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use crate::commands::comment::CommentArgs;
use crate::commands::config::ConfigCommands;
use crate::commands::edit::EditArgs;
use crate::commands::init::InitArgs;
use crate::commands::list::ListArgs;
use crate::commands::new::NewArgs;
use crate::commands::show::ShowArgs;

#[derive(Parser)]
#[command(
    name = "git-issues",
    bin_name = "git-issues",
    version,
    about,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List issues
    List(ListArgs),

    /// Create an issue
    New(NewArgs),

    /// Show an issue and its comments
    Show(ShowArgs),

    /// Edit an issue
    Edit(EditArgs),

    /// List, show, add, edit or delete comments
    Comment(CommentArgs),

    /// Record the user, repository and remote in the local git config
    Init(InitArgs),

    /// Configuration file tools
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}
