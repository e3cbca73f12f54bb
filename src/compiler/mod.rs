use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::{
    config::Config,
    err::{Error, Result},
    file_type::Language,
};

use self::{ar::Ar, gcc::Gcc};

mod ar;
pub mod config;
mod gcc;

/// Toolchain used for a single build: C compiler, C++ compiler and the
/// archiver.
pub struct Compiler {
    c: Gcc,
    cpp: Gcc,
    ar: Ar,
}

impl Compiler {
    pub fn new(conf: &Config) -> Self {
        let cc = &conf.compiler;
        Self {
            c: Gcc::new(
                cc.c_compiler.clone(),
                cc,
                &conf.sources,
                &conf.linking,
            ),
            cpp: Gcc::new(
                cc.cpp_compiler.clone(),
                cc,
                &conf.sources,
                &conf.linking,
            ),
            ar: Ar::new(cc.archiver.clone()),
        }
    }

    /// Gets the compiler for the language of the source file.
    pub fn for_language(&self, lang: Language) -> &Gcc {
        match lang {
            Language::C => &self.c,
            Language::Cpp => &self.cpp,
        }
    }

    /// Gets the compiler that will link the objects. C++ compiler is used if
    /// any of the sources is not C source.
    pub fn linker<'a, I>(&self, sources: I) -> &Gcc
    where
        I: IntoIterator<Item = &'a PathBuf>,
    {
        if sources
            .into_iter()
            .all(|s| Language::of(s) == Some(Language::C))
        {
            &self.c
        } else {
            &self.cpp
        }
    }

    /// Creates command that compiles `src` into `obj`.
    pub fn compile(&self, src: &Path, obj: &Path) -> Result<Command> {
        let lang = Language::of(src)
            .ok_or_else(|| Error::UnsupportedExtension(src.to_owned()))?;
        Ok(self.for_language(lang).build_object(src, obj))
    }

    /// Creates command that links the objects into executable.
    pub fn link(
        &self,
        sources: &[PathBuf],
        objs: &[PathBuf],
        out: &Path,
    ) -> Command {
        self.linker(sources).build_executable(objs, out)
    }

    /// Creates command that archives the objects into static library.
    pub fn archive(&self, objs: &[PathBuf], out: &Path) -> Command {
        self.ar.build_archive(objs, out)
    }
}
