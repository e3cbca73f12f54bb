use std::{
    collections::HashSet,
    fs::{create_dir_all, remove_dir_all},
    path::{Path, PathBuf},
};

use anyhow::Context;
use tracing::warn;

use crate::{
    config::{Config, ProjectType},
    err::Result,
};

pub struct DirStructure {
    /// directory with objects and the final artifact
    out_dir: PathBuf,
    /// all source files, each file coresponds to obj file
    src_files: Vec<PathBuf>,
    /// path to object files, each obj file coresponds to src file at the same
    /// position
    obj: Vec<PathBuf>,
    /// path to the executable or library
    artifact: PathBuf,
}

//===========================================================================//
//                                   Public                                  //
//===========================================================================//

impl DirStructure {
    pub fn new(conf: &Config) -> Self {
        let out_dir = conf.output.directory.clone();
        let artifact = match conf.project.typ {
            ProjectType::Executable => out_dir.join(&conf.output.name),
            ProjectType::Library => {
                out_dir.join(format!("lib{}.a", conf.output.name))
            }
        };

        let mut res = Self {
            out_dir,
            src_files: conf.sources.files.clone(),
            obj: vec![],
            artifact,
        };
        res.gen_objs();
        res
    }

    /// gets the source files
    pub fn srcs(&self) -> &[PathBuf] {
        &self.src_files
    }

    /// gets the object files
    pub fn objs(&self) -> &[PathBuf] {
        &self.obj
    }

    /// gets path to the executable or library
    pub fn artifact(&self) -> &Path {
        &self.artifact
    }

    /// Creates the output directory with all its parents.
    pub fn create_out_dir(&self) -> Result<()> {
        Ok(create_dir_all(&self.out_dir).with_context(|| {
            format!(
                "Failed to create directory '{}'",
                self.out_dir.to_string_lossy()
            )
        })?)
    }
}

/// Gets the object file for the source file: `<out_dir>/<stem>.o`.
pub fn obj_path(out_dir: &Path, src: &Path) -> PathBuf {
    let stem = src.file_stem().unwrap_or(src.as_os_str());
    let mut res = out_dir.join(stem);
    res.as_mut_os_string().push(".o");
    res
}

/// Recursively removes the output directory. Returns `false` if there was
/// nothing to remove.
pub fn clean(out_dir: &Path) -> Result<bool> {
    if !out_dir.exists() {
        return Ok(false);
    }

    remove_dir_all(out_dir).with_context(|| {
        format!("Failed to remove '{}'", out_dir.to_string_lossy())
    })?;
    Ok(true)
}

//===========================================================================//
//                                  Private                                  //
//===========================================================================//

impl DirStructure {
    /// Generates obj file for each src file
    fn gen_objs(&mut self) {
        let mut seen = HashSet::new();
        for s in &self.src_files {
            let o = obj_path(&self.out_dir, s);
            if !seen.insert(o.clone()) {
                warn!(
                    "'{}' has the same object file as previous source, \
                    '{}' will be overwritten",
                    s.to_string_lossy(),
                    o.to_string_lossy()
                );
            }
            self.obj.push(o);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_file::BuildFile;

    fn dirs(content: &str) -> DirStructure {
        let file = BuildFile::parse(content);
        DirStructure::new(&Config::from_build_file(&file).unwrap())
    }

    #[test]
    fn objects_follow_sources() {
        let d = dirs(
            "[output]\nname = app\ndirectory = out\n\
             [sources]\nfiles = src/main.cpp, lib/util.c, x.y.c\n",
        );
        assert_eq!(
            d.objs(),
            [
                PathBuf::from("out/main.o"),
                PathBuf::from("out/util.o"),
                PathBuf::from("out/x.y.o"),
            ]
        );
        assert_eq!(d.srcs().len(), d.objs().len());
        assert_eq!(d.artifact(), Path::new("out/app"));
    }

    #[test]
    fn default_directory() {
        let d = dirs("[output]\nname = app\n[sources]\nfiles = a.c\n");
        assert_eq!(d.objs(), [PathBuf::from("./build/a.o")]);
        assert_eq!(d.artifact(), Path::new("./build/app"));
    }

    #[test]
    fn library_artifact() {
        let d = dirs(
            "[project]\ntype = library\n[output]\nname = core\n\
             directory = out\n",
        );
        assert_eq!(d.artifact(), Path::new("out/libcore.a"));
    }

    #[test]
    fn create_and_clean() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("a/b/build");
        let d = dirs(&format!(
            "[output]\nname = app\ndirectory = {}\n",
            out.to_string_lossy()
        ));

        d.create_out_dir().unwrap();
        assert!(out.is_dir());
        std::fs::write(out.join("main.o"), b"").unwrap();

        assert!(clean(&out).unwrap());
        assert!(!out.exists());
        assert!(!clean(&out).unwrap());
    }
}
