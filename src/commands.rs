use std::{
    fs::OpenOptions,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use termal::{eprintcln, printcln};
use tracing::info;

use crate::{
    build_file::BuildFile,
    builder::Builder,
    config::Config,
    dir_structure,
    err::{Error, Result},
    serde_config::SerdeOutput,
};

const TEMPLATE: &str = "\
# Bind Build File
# Generated for: {name}

[project]
name = {name}
type = executable

[output]
name =
directory = ./build

[compiler]
c_compiler =
cpp_compiler =
flags = -Wall -O2

[sources]
files =
include_dirs =

[linking]
libraries =
lib_dirs =
";

/// Gets the contents of new build file for project `name`.
pub fn template(name: &str) -> String {
    TEMPLATE.replace("{name}", name)
}

/// Writes template build file to `path`. Existing file is never
/// overwritten.
pub fn new_project(path: &Path, name: &str) -> Result<()> {
    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(Error::TemplateAlreadyExists(path.to_owned()));
        }
        Err(e) => return Err(e.into()),
    };
    file.write_all(template(name).as_bytes())?;

    printcln!("{'green}✓{'reset} Created '{}'", path.to_string_lossy());
    println!();
    println!("Edit the file to configure your build, then run:");
    println!("  bind {name}");
    Ok(())
}

/// Parses, validates and builds the project described by the build file at
/// `path`. Returns path to the built artifact.
pub fn build_project(path: &Path, name: &str) -> Result<PathBuf> {
    let file = match BuildFile::from_file(path) {
        Err(e @ Error::MissingConfigFile(_)) => {
            eprintln!("Create it first with:");
            eprintln!("  bind new {name}");
            return Err(e);
        }
        r => r?,
    };
    file.validate()?;
    let conf = Config::from_build_file(&file)?;

    printcln!("{'bold}Building:{'reset} {}", conf.project.name);
    printcln!("{'bold}Type:{'reset} {}", conf.project.typ);
    println!();

    let builder = Builder::from_config(&conf);
    match builder.build() {
        Ok(artifact) => {
            println!();
            printcln!("{'green}✓ Build successful!{'reset}");
            info!("Built '{}'", artifact.to_string_lossy());
            Ok(artifact.to_owned())
        }
        Err(e) => {
            println!();
            eprintcln!("{'red}✗ Build failed{'reset}");
            Err(e)
        }
    }
}

/// Removes the output directory of the project described by the build file
/// at `path`. Only the `[output]` section is read, the rest of the build
/// file is neither validated nor deserialized. Returns the removed
/// directory, or [`None`] if there was nothing to clean.
pub fn clean_project(path: &Path) -> Result<Option<PathBuf>> {
    let file = BuildFile::from_file(path)?;
    let out_dir = SerdeOutput::from_build_file(&file)?.out_dir();

    if dir_structure::clean(&out_dir)? {
        let dir = out_dir.to_string_lossy();
        printcln!("{'green}✓{'reset} Cleaned '{}'", dir);
        Ok(Some(out_dir))
    } else {
        println!("Nothing to clean");
        Ok(None)
    }
}

pub fn help() {
    printcln!(
        "{'green}bind{'reset} {}, simple C/C++ build tool

{'bold}Usage:{'reset}
  {'green}bind new {'yellow}<name>{'reset}
    Create a new {'yellow}<name>{'reset}.st build file.

  {'green}bind {'yellow}<name>{'reset}
    Build project using {'yellow}<name>{'reset}.st.

  {'green}bind clean {'yellow}<name>{'reset}
    Remove the output directory of {'yellow}<name>{'reset}.st.

  {'green}bind help{'reset}
    Show this help.

{'bold}File format (.st):{'reset}
  [project]
  name = MyProject
  type = executable          # or library

  [output]
  name = my_program
  directory = ./build

  [compiler]
  c_compiler = gcc
  cpp_compiler = g++
  flags = -Wall -O2

  [sources]
  files = main.cpp, utils.c
  include_dirs = ./include

  [linking]
  libraries = m, pthread
  lib_dirs = /usr/local/lib

Lists may continue on indented lines:
  files =
      main.cpp,
      utils.c

Set {'yellow}RUST_LOG{'reset}=bind=debug to see more details.",
        env!("CARGO_PKG_VERSION")
    );
}
