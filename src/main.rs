mod cli;
mod commands;
mod infra;
mod message;
mod shared;

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use commands::Session;
use shared::config::load_config;
use shared::env_var::EnvVars;
use shared::{dirs, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config()?;
    let env = EnvVars::load();

    let filter = logging::resolve_filter(
        cli.verbose,
        env.log.as_deref(),
        config.log.level.as_deref(),
    );
    let log_dir = config.log.dir.as_deref().map(dirs::expand_home);
    let _log_guard = logging::init(&filter, log_dir.as_deref())?;

    match cli.command {
        Commands::List(args) => commands::list::run(&args, &Session::start(&config, &env)?).await,
        Commands::New(args) => commands::new::run(&args, &Session::start(&config, &env)?).await,
        Commands::Show(args) => commands::show::run(&args, &Session::start(&config, &env)?).await,
        Commands::Edit(args) => commands::edit::run(&args, &Session::start(&config, &env)?).await,
        Commands::Comment(args) => {
            commands::comment::run(&args, &Session::start(&config, &env)?).await
        }
        Commands::Init(args) => commands::init::run(&args),
        Commands::Config(config_cmd) => config_cmd.run(),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "git-issues", &mut io::stdout());
            Ok(())
        }
    }
}
