use std::{
    path::{Path, PathBuf},
    process::Command,
};

/// Archiver for static libraries.
pub struct Ar {
    bin: PathBuf,
}

impl Ar {
    pub fn new(bin: PathBuf) -> Self {
        Self { bin }
    }

    /// `<bin> rcs <out> <objs>...`
    pub fn build_archive<'a, I>(&self, objs: I, out: &Path) -> Command
    where
        I: IntoIterator<Item = &'a PathBuf>,
    {
        let mut cmd = Command::new(&self.bin);
        cmd.arg("rcs").arg(out).args(objs);
        cmd
    }
}
