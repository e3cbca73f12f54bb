use std::path::PathBuf;

use thiserror::Error;

use crate::arg_parser::ArgError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Build file '{}' not found", .0.to_string_lossy())]
    MissingConfigFile(PathBuf),
    #[error("Missing required key `{key}` in section [{section}]")]
    MissingRequiredKey {
        section: &'static str,
        key: &'static str,
    },
    #[error(
        "Unsupported file extension of source file '{}'",
        .0.to_string_lossy()
    )]
    UnsupportedExtension(PathBuf),
    #[error("Source file '{}' not found", .0.to_string_lossy())]
    MissingSourceFile(PathBuf),
    #[error(
        "Failed to compile '{}', compiler exited with code {}",
        .file.to_string_lossy(),
        if let Some(c) = .code { *c } else { 1 }
    )]
    CompilerInvocationFailed {
        file: PathBuf,
        code: Option<i32>,
    },
    #[error(
        "Failed to produce '{}', linker exited with code {}",
        .output.to_string_lossy(),
        if let Some(c) = .code { *c } else { 1 }
    )]
    LinkerInvocationFailed {
        output: PathBuf,
        code: Option<i32>,
    },
    #[error("Invalid compiler flags `{}`: unbalanced quotes", .0)]
    InvalidFlags(String),
    #[error("'{}' already exists", .0.to_string_lossy())]
    TemplateAlreadyExists(PathBuf),
    #[error("Cannot find `{tool}`: {err}")]
    ToolNotFound { tool: String, err: which::Error },
    #[error(transparent)]
    Arg(#[from] ArgError),
    #[error("Invalid build file: {}", .0)]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
