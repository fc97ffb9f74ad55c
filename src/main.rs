mod cli;
mod commands;
mod config;
mod data_source;
mod engine;
mod provider;
mod registry;
mod resource;
mod schema;
mod state;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use config::Overrides;
use std::io;
use std::path::PathBuf;

/// Global context for the application
pub struct Context {
    pub quiet: bool,
    /// Explicit config file, if one was given
    pub config: Option<PathBuf>,
    /// Connection settings from flags and environment
    pub overrides: Overrides,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        quiet: cli.quiet,
        config: cli.config.clone(),
        overrides: cli.connection.overrides(),
    };

    let result = match cli.command {
        Command::Schema { name, data_source } => {
            commands::schema::run(name.as_deref(), data_source)
        }
        Command::Check => commands::check::run(&ctx),
        Command::Create(args) => commands::resource::create(&ctx, &args),
        Command::Read(args) => commands::resource::read(&ctx, &args),
        Command::Update(args) => commands::resource::update(&ctx, &args),
        Command::Delete(args) => commands::resource::delete(&ctx, &args),
        Command::Plan(args) => commands::resource::plan(&ctx, &args),
        Command::Data(args) => commands::data::run(&ctx, &args),
        Command::Completions { shell } => {
            generate(shell, &mut Cli::command(), "tamer", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(err) = &result
        && !ctx.quiet
        && let Some(hint) = commands::hint(err)
    {
        ui::info(&hint);
    }

    result
}
