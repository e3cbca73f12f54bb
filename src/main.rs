use std::process::ExitCode;

use arg_parser::{Action, Args};
use build_file::build_file_path;
use err::Result;
use termal::eprintcln;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod arg_parser;
mod build_file;
mod builder;
mod commands;
mod compiler;
mod config;
mod dir_structure;
mod err;
mod file_type;
mod serde_config;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bind=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match start() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintcln!("{'red}✗ Error:{'reset} {}", e);
            ExitCode::FAILURE
        }
    }
}

fn start() -> Result<()> {
    let args = Args::get()?;

    match args.action {
        Action::Help => commands::help(),
        Action::New(name) => {
            commands::new_project(&build_file_path(&name), &name)?
        }
        Action::Build(name) => {
            commands::build_project(&build_file_path(&name), &name)?;
        }
        Action::Clean(name) => {
            commands::clean_project(&build_file_path(&name))?;
        }
    }

    Ok(())
}
