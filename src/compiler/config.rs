use std::path::PathBuf;

use crate::err::{Error, Result};

pub const DEFAULT_CC: &str = "gcc";
pub const DEFAULT_CPP: &str = "g++";
pub const DEFAULT_AR: &str = "ar";

pub struct Config {
    pub c_compiler: PathBuf,
    pub cpp_compiler: PathBuf,
    pub archiver: PathBuf,
    /// Flags passed to every compilation, in the order they were written
    pub flags: Vec<String>,
}

impl Config {
    /// Splits the flags string into arguments with POSIX shell quoting
    /// rules, so `-DMSG="a b"` stays a single argument.
    pub fn split_flags(flags: &str) -> Result<Vec<String>> {
        shlex::split(flags).ok_or_else(|| Error::InvalidFlags(flags.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_plain_flags() {
        assert_eq!(
            Config::split_flags("  -Wall   -O2\t-g ").unwrap(),
            ["-Wall", "-O2", "-g"]
        );
        assert!(Config::split_flags("").unwrap().is_empty());
    }

    #[test]
    fn split_quoted_flags() {
        assert_eq!(
            Config::split_flags(r#"-DMSG="hello world" -O2"#).unwrap(),
            ["-DMSG=hello world", "-O2"]
        );
        assert_eq!(
            Config::split_flags(r#"-DNAME='a "b"' -Iwith\ space"#).unwrap(),
            ["-DNAME=a \"b\"", "-Iwith space"]
        );
    }

    #[test]
    fn unbalanced_quotes() {
        assert!(matches!(
            Config::split_flags(r#"-DMSG="oops -O2"#),
            Err(Error::InvalidFlags(f)) if f == r#"-DMSG="oops -O2"#
        ));
    }
}
