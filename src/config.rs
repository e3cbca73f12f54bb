use std::{fmt::Display, path::PathBuf};

use crate::compiler;

pub struct Config {
    pub project: Project,
    pub output: Output,
    pub compiler: CompilerConfig,
    pub sources: Sources,
    pub linking: Linking,
}

pub struct Project {
    pub name: String,
    pub typ: ProjectType,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProjectType {
    Executable,
    /// Static archive `lib<name>.a`
    Library,
}

pub struct Output {
    pub name: String,
    pub directory: PathBuf,
}

pub struct Sources {
    /// Sources in the order in which they are compiled and linked
    pub files: Vec<PathBuf>,
    pub include_dirs: Vec<PathBuf>,
}

pub struct Linking {
    pub libraries: Vec<String>,
    pub lib_dirs: Vec<PathBuf>,
}

pub type CompilerConfig = compiler::config::Config;

impl ProjectType {
    /// Anything that is not `library` builds an executable.
    pub fn from_name(name: &str) -> Self {
        if name == "library" {
            Self::Library
        } else {
            Self::Executable
        }
    }
}

impl Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Executable => write!(f, "executable"),
            Self::Library => write!(f, "library"),
        }
    }
}
