use std::path::PathBuf;

use serde::Deserialize;

use crate::{
    build_file::BuildFile,
    compiler::config::{DEFAULT_AR, DEFAULT_CC, DEFAULT_CPP},
    config::{
        CompilerConfig, Config, Linking, Output, Project, ProjectType,
        Sources,
    },
    err::Result,
};

pub const DEFAULT_OUT_DIR: &str = "./build";

#[derive(Deserialize, Default)]
pub struct SerdeConfig {
    #[serde(default)]
    pub project: SerdeProject,
    #[serde(default)]
    pub output: SerdeOutput,
    #[serde(default)]
    pub compiler: SerdeCompiler,
    #[serde(default)]
    pub sources: SerdeSources,
    #[serde(default)]
    pub linking: SerdeLinking,
}

#[derive(Deserialize, Default)]
pub struct SerdeProject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub typ: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct SerdeOutput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub directory: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct SerdeCompiler {
    #[serde(default)]
    pub c_compiler: Option<String>,
    #[serde(default)]
    pub cpp_compiler: Option<String>,
    #[serde(default)]
    pub archiver: Option<String>,
    #[serde(default)]
    pub flags: Option<SerdeValue>,
}

#[derive(Deserialize, Default)]
pub struct SerdeSources {
    #[serde(default)]
    pub files: Option<SerdeValue>,
    #[serde(default)]
    pub include_dirs: Option<SerdeValue>,
}

#[derive(Deserialize, Default)]
pub struct SerdeLinking {
    #[serde(default)]
    pub libraries: Option<SerdeValue>,
    #[serde(default)]
    pub lib_dirs: Option<SerdeValue>,
}

/// Single value or a list of values.
#[derive(Deserialize, Clone)]
#[serde(untagged)]
pub enum SerdeValue {
    One(String),
    Many(Vec<String>),
}

impl Config {
    /// Creates typed configuration from parsed build file. Missing keys are
    /// replaced with defaults, required keys should be checked with
    /// [`BuildFile::validate`] first.
    pub fn from_build_file(file: &BuildFile) -> Result<Self> {
        SerdeConfig::from_build_file(file)?.resolve()
    }
}

impl SerdeConfig {
    pub fn from_build_file(file: &BuildFile) -> Result<Self> {
        Ok(toml::Value::Table(file.to_toml()).try_into()?)
    }

    fn resolve(self) -> Result<Config> {
        let directory = self.output.out_dir();
        Ok(Config {
            project: self.project.resolve(),
            output: Output {
                name: self.output.name.unwrap_or_default(),
                directory,
            },
            compiler: self.compiler.resolve()?,
            sources: self.sources.resolve(),
            linking: self.linking.resolve(),
        })
    }
}

impl SerdeOutput {
    /// Reads only the `[output]` section, values in the other sections are
    /// not checked.
    pub fn from_build_file(file: &BuildFile) -> Result<Self> {
        match file.to_toml().remove("output") {
            Some(output) => Ok(output.try_into()?),
            None => Ok(Self::default()),
        }
    }

    /// Gets the configured output directory.
    pub fn out_dir(&self) -> PathBuf {
        or_default(self.directory.as_deref(), DEFAULT_OUT_DIR).into()
    }
}

impl SerdeProject {
    fn resolve(self) -> Project {
        Project {
            name: self.name.unwrap_or_default(),
            typ: ProjectType::from_name(self.typ.as_deref().unwrap_or("")),
        }
    }
}

impl SerdeCompiler {
    fn resolve(self) -> Result<CompilerConfig> {
        let mut flags = vec![];
        for f in self.flags.map(SerdeValue::into_vec).unwrap_or_default() {
            flags.extend(CompilerConfig::split_flags(&f)?);
        }

        Ok(CompilerConfig {
            c_compiler: or_default(self.c_compiler.as_deref(), DEFAULT_CC)
                .into(),
            cpp_compiler: or_default(
                self.cpp_compiler.as_deref(),
                DEFAULT_CPP,
            )
            .into(),
            archiver: or_default(self.archiver.as_deref(), DEFAULT_AR).into(),
            flags,
        })
    }
}

impl SerdeSources {
    fn resolve(self) -> Sources {
        Sources {
            files: paths(self.files),
            include_dirs: paths(self.include_dirs),
        }
    }
}

impl SerdeLinking {
    fn resolve(self) -> Linking {
        Linking {
            libraries: self
                .libraries
                .map(|l| l.into_vec())
                .unwrap_or_default(),
            lib_dirs: paths(self.lib_dirs),
        }
    }
}

impl SerdeValue {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(s) => vec![s],
            Self::Many(v) => v,
        }
    }
}

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default,
    }
}

fn paths(value: Option<SerdeValue>) -> Vec<PathBuf> {
    value
        .map(|v| v.into_vec().into_iter().map(PathBuf::from).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::err::Error;

    fn config(content: &str) -> Config {
        Config::from_build_file(&BuildFile::parse(content)).unwrap()
    }

    #[test]
    fn defaults() {
        let c = config(
            "[project]\nname = p\ntype = executable\n\
             [sources]\nfiles = main.c\n[output]\nname = app\n",
        );

        assert_eq!(c.project.name, "p");
        assert_eq!(c.project.typ, ProjectType::Executable);
        assert_eq!(c.output.name, "app");
        assert_eq!(c.output.directory, Path::new("./build"));
        assert_eq!(c.compiler.c_compiler, Path::new("gcc"));
        assert_eq!(c.compiler.cpp_compiler, Path::new("g++"));
        assert_eq!(c.compiler.archiver, Path::new("ar"));
        assert!(c.compiler.flags.is_empty());
        assert_eq!(c.sources.files, vec![PathBuf::from("main.c")]);
        assert!(c.sources.include_dirs.is_empty());
        assert!(c.linking.libraries.is_empty());
        assert!(c.linking.lib_dirs.is_empty());
    }

    #[test]
    fn configured_values() {
        let c = config(
            "[project]\nname = p\ntype = library\n\
             [output]\nname = core\ndirectory = out/bin\n\
             [compiler]\nc_compiler = clang\ncpp_compiler = clang++\n\
             archiver = llvm-ar\nflags = -Wall  -O2 -g\n\
             [sources]\nfiles =\n  a.c,\n  b.cpp\ninclude_dirs = inc, lib/inc\n\
             [linking]\nlibraries = m, pthread\nlib_dirs = /opt/lib\n",
        );

        assert_eq!(c.project.typ, ProjectType::Library);
        assert_eq!(c.output.directory, Path::new("out/bin"));
        assert_eq!(c.compiler.c_compiler, Path::new("clang"));
        assert_eq!(c.compiler.cpp_compiler, Path::new("clang++"));
        assert_eq!(c.compiler.archiver, Path::new("llvm-ar"));
        assert_eq!(c.compiler.flags, ["-Wall", "-O2", "-g"]);
        assert_eq!(
            c.sources.files,
            [PathBuf::from("a.c"), PathBuf::from("b.cpp")]
        );
        assert_eq!(
            c.sources.include_dirs,
            [PathBuf::from("inc"), PathBuf::from("lib/inc")]
        );
        assert_eq!(c.linking.libraries, ["m", "pthread"]);
        assert_eq!(c.linking.lib_dirs, [PathBuf::from("/opt/lib")]);
    }

    #[test]
    fn unknown_type_is_executable() {
        let c = config("[project]\ntype = plugin\n");
        assert_eq!(c.project.typ, ProjectType::Executable);
    }

    #[test]
    fn list_where_scalar_expected() {
        let f = BuildFile::parse("[project]\nname = a, b\n");
        assert!(matches!(Config::from_build_file(&f), Err(Error::Config(_))));
    }

    #[test]
    fn quoted_flags() {
        let c = config(
            "[compiler]\nflags = -DMSG=\"hello world\" -O2\n",
        );
        assert_eq!(c.compiler.flags, ["-DMSG=hello world", "-O2"]);

        let c = config("[compiler]\nflags = -Wall, '-DA=1 2'\n");
        assert_eq!(c.compiler.flags, ["-Wall", "-DA=1 2"]);
    }

    #[test]
    fn unbalanced_flags() {
        let f = BuildFile::parse("[compiler]\nflags = -DMSG=\"oops\n");
        assert!(matches!(
            Config::from_build_file(&f),
            Err(Error::InvalidFlags(_))
        ));
    }

    #[test]
    fn out_dir_without_validation() {
        let f = BuildFile::parse("[output]\ndirectory = target/c\n");
        let o = SerdeOutput::from_build_file(&f).unwrap();
        assert_eq!(o.out_dir(), Path::new("target/c"));

        let f = BuildFile::parse("[project]\nname = p\n");
        let o = SerdeOutput::from_build_file(&f).unwrap();
        assert_eq!(o.out_dir(), Path::new(DEFAULT_OUT_DIR));
    }

    #[test]
    fn out_dir_ignores_other_sections() {
        let f = BuildFile::parse(
            "[project]\nname = My, App\n\
             [compiler]\nc_compiler = gcc, clang\n\
             [output]\ndirectory = out\n",
        );
        assert!(Config::from_build_file(&f).is_err());
        let o = SerdeOutput::from_build_file(&f).unwrap();
        assert_eq!(o.out_dir(), Path::new("out"));
    }
}
