use std::{ffi::OsStr, path::Path};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Language {
    C,
    Cpp,
}

impl Language {
    pub fn from_ext(ext: &OsStr) -> Option<Language> {
        if ext == "c" {
            Some(Self::C)
        } else if ext == "C"
            || ext == "cc"
            || ext == "cpp"
            || ext == "CPP"
            || ext == "c++"
            || ext == "cp"
            || ext == "cxx"
        {
            Some(Self::Cpp)
        } else {
            None
        }
    }

    /// Classifies the source file by its extension. Returns [`None`] for
    /// files that are neither C nor C++ sources.
    pub fn of<P>(path: P) -> Option<Language>
    where
        P: AsRef<Path>,
    {
        path.as_ref().extension().and_then(Self::from_ext)
    }
}
