use std::{
    path::{Path, PathBuf},
    process::{Child, Command, ExitStatus},
};

use termal::printcln;
use tracing::debug;

use crate::{
    compiler::Compiler,
    config::{Config, ProjectType},
    dir_structure::DirStructure,
    err::{Error, Result},
};

pub struct Builder {
    compiler: Compiler,
    dir: DirStructure,
    typ: ProjectType,
}

//===========================================================================//
//                                   Public                                  //
//===========================================================================//

impl Builder {
    pub fn from_config(conf: &Config) -> Self {
        Self {
            compiler: Compiler::new(conf),
            dir: DirStructure::new(conf),
            typ: conf.project.typ,
        }
    }

    /// Compiles all the sources one by one and links them. Stops at the
    /// first failure, objects that were already built are kept. Returns
    /// path to the built executable or library.
    pub fn build(&self) -> Result<&Path> {
        let mut objs = vec![];
        for (src, obj) in self.dir.srcs().iter().zip(self.dir.objs()) {
            self.compile(src, obj)?;
            objs.push(obj.clone());
        }

        self.link(&objs)?;
        Ok(self.dir.artifact())
    }
}

//===========================================================================//
//                                  Private                                  //
//===========================================================================//

impl Builder {
    fn compile(&self, src: &Path, obj: &Path) -> Result<()> {
        if !src.exists() {
            return Err(Error::MissingSourceFile(src.to_owned()));
        }

        let cmd = self.compiler.compile(src, obj)?;
        self.dir.create_out_dir()?;

        let res = self.sync_run(cmd)?;
        if !res.success() {
            return Err(Error::CompilerInvocationFailed {
                file: src.to_owned(),
                code: res.code(),
            });
        }

        printcln!("  {'green}✓{'reset} {}", obj.to_string_lossy());
        Ok(())
    }

    fn link(&self, objs: &[PathBuf]) -> Result<()> {
        let out = self.dir.artifact();
        let cmd = match self.typ {
            ProjectType::Executable => {
                self.compiler.link(self.dir.srcs(), objs, out)
            }
            ProjectType::Library => self.compiler.archive(objs, out),
        };
        self.dir.create_out_dir()?;

        let res = self.sync_run(cmd)?;
        if !res.success() {
            return Err(Error::LinkerInvocationFailed {
                output: out.to_owned(),
                code: res.code(),
            });
        }

        printcln!("  {'green}✓{'reset} {}", out.to_string_lossy());
        Ok(())
    }

    fn start(&self, mut cmd: Command) -> Result<Child> {
        let prog = cmd.get_program();
        if let Err(err) = which::which(prog) {
            return Err(Error::ToolNotFound {
                tool: prog.to_string_lossy().into_owned(),
                err,
            });
        }

        printcln!("{'yellow}CMD:{'reset} {:?}", cmd);
        debug!("Running {cmd:?}");

        Ok(cmd.spawn()?)
    }

    fn sync_run(&self, cmd: Command) -> Result<ExitStatus> {
        Ok(self.start(cmd)?.wait()?)
    }
}
