use std::env;

use thiserror::Error;

use crate::err::Result;

macro_rules! next_arg {
    ($args:ident, $err:expr) => {
        if let Some(arg) = $args.next() {
            arg
        } else {
            return Err($err.into());
        }
    };
}

#[derive(Error, Debug)]
pub enum ArgError {
    #[error("Invalid value `{value}` for argument `{arg}`: {expl}")]
    InvalidValue {
        value: String,
        arg: String,
        expl: &'static str,
    },
    #[error("Missing argument after `{}`, usage: bind {} <name>", .0, .0)]
    MissingArgument(String),
    #[error("Unknown argument `{}`", .0)]
    UnknownArgument(String),
}

#[derive(PartialEq, Eq, Debug)]
pub enum Action {
    Help,
    /// Create template build file for the project
    New(String),
    /// Build the project
    Build(String),
    /// Remove the output directory of the project
    Clean(String),
}

#[derive(Debug)]
pub struct Args {
    pub action: Action,
}

impl Args {
    pub fn get() -> Result<Args> {
        let args: Vec<_> = env::args().collect();
        let mut args = args.iter().map(|a| a.as_str());
        args.next();
        Self::parse(args)
    }

    /// Parses the arguments (without the program name). No arguments shows
    /// help.
    pub fn parse<'a, I>(mut args: I) -> Result<Args>
    where
        I: Iterator<Item = &'a str>,
    {
        let Some(arg) = args.next() else {
            return Ok(Args::default());
        };

        let action = match arg {
            "help" | "h" | "-h" | "-?" | "--help" => Action::Help,
            "new" => {
                let value = next_arg!(
                    args,
                    ArgError::MissingArgument(arg.to_owned())
                );
                Action::New(project_name(arg, value)?)
            }
            "clean" => {
                let value = next_arg!(
                    args,
                    ArgError::MissingArgument(arg.to_owned())
                );
                Action::Clean(project_name(arg, value)?)
            }
            _ => Action::Build(project_name("<name>", arg)?),
        };

        if let Some(arg) = args.next() {
            return Err(ArgError::UnknownArgument(arg.to_owned()).into());
        }

        Ok(Args { action })
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            action: Action::Help,
        }
    }
}

fn project_name(arg: &str, value: &str) -> Result<String> {
    if value.trim().is_empty() {
        Err(ArgError::InvalidValue {
            value: value.into(),
            arg: arg.into(),
            expl: "Expected project name",
        }
        .into())
    } else {
        Ok(value.to_owned())
    }
}
