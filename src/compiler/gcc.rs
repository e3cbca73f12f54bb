use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::Command,
};

use crate::config::{Linking, Sources};

use super::config::Config;

/// Compiler driver with gcc compatible command line (gcc, g++, clang, ...).
pub struct Gcc {
    bin: PathBuf,
    compile_args: Vec<OsString>,
    link_args: Vec<OsString>,
}

impl Gcc {
    pub fn new(
        bin: PathBuf,
        conf: &Config,
        sources: &Sources,
        linking: &Linking,
    ) -> Self {
        let mut compile_args: Vec<OsString> =
            conf.flags.iter().map(Into::into).collect();
        compile_args.extend(sources.include_dirs.iter().map(|d| arg("-I", d)));

        let mut link_args: Vec<OsString> =
            linking.lib_dirs.iter().map(|d| arg("-L", d)).collect();
        link_args.extend(
            linking.libraries.iter().map(|l| format!("-l{l}").into()),
        );

        Self {
            bin,
            compile_args,
            link_args,
        }
    }

    /// `<bin> <flags> -I<dir>... -c <src> -o <obj>`
    pub fn build_object(&self, src: &Path, obj: &Path) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.args(&self.compile_args)
            .arg("-c")
            .arg(src)
            .arg("-o")
            .arg(obj);
        cmd
    }

    /// `<bin> <objs>... -o <out> -L<dir>... -l<lib>...`
    pub fn build_executable<'a, I>(&self, objs: I, out: &Path) -> Command
    where
        I: IntoIterator<Item = &'a PathBuf>,
    {
        let mut cmd = Command::new(&self.bin);
        cmd.args(objs).arg("-o").arg(out).args(&self.link_args);
        cmd
    }
}

/// Joins flag with path without any separator, e.g. `-I./include`.
fn arg(flag: &str, path: &Path) -> OsString {
    let mut res = OsString::from(flag);
    res.push(path);
    res
}
