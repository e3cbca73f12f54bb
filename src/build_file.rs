use std::{
    collections::BTreeMap,
    fs::read_to_string,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tracing::{debug, warn};

use crate::err::{Error, Result};

/// Sections that every build file has, even when they are not written in
/// the file.
pub const SECTIONS: [&str; 5] =
    ["project", "output", "compiler", "sources", "linking"];

/// Keys that must be present for a build to start.
pub const REQUIRED: [(&str, &str); 4] = [
    ("project", "name"),
    ("project", "type"),
    ("sources", "files"),
    ("output", "name"),
];

/// Value of a single key in the build file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
}

pub type Section = BTreeMap<String, Value>;

/// Raw contents of a `.st` build file: section -> key -> value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFile {
    sections: BTreeMap<String, Section>,
}

//===========================================================================//
//                                   Public                                  //
//===========================================================================//

impl Value {
    /// Appends `item`, turning a scalar into a list when it gets its second
    /// item.
    pub fn push(&mut self, item: String) {
        match self {
            Self::Scalar(s) => {
                let first = std::mem::take(s);
                *self = Self::List(vec![first, item]);
            }
            Self::List(l) => l.push(item),
        }
    }
}

impl From<&Value> for toml::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Scalar(s) => toml::Value::String(s.clone()),
            Value::List(l) => toml::Value::Array(
                l.iter().cloned().map(toml::Value::String).collect(),
            ),
        }
    }
}

impl BuildFile {
    /// Reads and parses the build file at `path`.
    pub fn from_file<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingConfigFile(path.to_owned()));
        }

        let content = read_to_string(path).with_context(|| {
            format!("Failed to read '{}'", path.to_string_lossy())
        })?;
        Ok(Self::parse(&content))
    }

    /// Parses the contents of a build file. Lines that don't fit the
    /// grammar are skipped, parsing itself never fails.
    pub fn parse(content: &str) -> Self {
        let mut res = Self::default();

        let mut current: Option<String> = None;
        let mut last_key: Option<String> = None;

        for raw in content.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let indented = raw.starts_with([' ', '\t']);

            if let Some(name) =
                line.strip_prefix('[').and_then(|l| l.strip_suffix(']'))
            {
                let name = name.trim();
                current = (!name.is_empty()).then(|| name.to_owned());
                last_key = None;
                if let Some(name) = &current {
                    res.open_section(name);
                }
                continue;
            }

            // continuation of the last key
            if let (true, Some(sec), Some(key)) =
                (indented, &current, &last_key)
            {
                let item = line.trim_end_matches(',').trim();
                if item.is_empty() {
                    continue;
                }
                res.push(sec, key, item.to_owned());
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };

            let Some(sec) = &current else {
                let key = key.trim();
                debug!("Key `{key}` outside of any section is ignored");
                continue;
            };

            let key = key.trim().to_owned();
            let value = value
                .split('#')
                .next()
                .unwrap_or_default()
                .trim()
                .trim_end_matches(',')
                .trim();

            last_key = Some(key.clone());

            // pending key, its value may come on the continuation lines
            if value.is_empty() {
                continue;
            }

            let value = if value.contains(',') {
                Value::List(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_owned)
                        .collect(),
                )
            } else {
                Value::Scalar(value.to_owned())
            };

            res.section_mut(sec).insert(key, value);
        }

        res
    }

    /// Checks that all the [`REQUIRED`] keys are present.
    pub fn validate(&self) -> Result<()> {
        for (section, key) in REQUIRED {
            if self.get(section, key).is_none() {
                return Err(Error::MissingRequiredKey { section, key });
            }
        }
        Ok(())
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&Value> {
        self.sections.get(section).and_then(|s| s.get(key))
    }

    /// Converts the known sections into a toml table so that they can be
    /// deserialized into typed configuration.
    pub fn to_toml(&self) -> toml::Table {
        SECTIONS
            .iter()
            .filter_map(|name| self.sections.get(*name).map(|s| (name, s)))
            .map(|(name, sec)| {
                let table: toml::Table =
                    sec.iter().map(|(k, v)| (k.clone(), v.into())).collect();
                (name.to_string(), toml::Value::Table(table))
            })
            .collect()
    }
}

impl Default for BuildFile {
    fn default() -> Self {
        Self {
            sections: SECTIONS
                .iter()
                .map(|s| (s.to_string(), Section::new()))
                .collect(),
        }
    }
}

/// Gets the path of the build file for the project `name`.
pub fn build_file_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{name}.st"))
}

//===========================================================================//
//                                  Private                                  //
//===========================================================================//

impl BuildFile {
    fn open_section(&mut self, name: &str) {
        if !SECTIONS.contains(&name) && !self.sections.contains_key(name) {
            warn!("Unknown section [{name}] is ignored");
        }
        debug!("Parsing section [{name}]");
        self.section_mut(name);
    }

    fn section_mut(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_owned()).or_default()
    }

    fn push(&mut self, section: &str, key: &str, item: String) {
        let sec = self.section_mut(section);
        match sec.get_mut(key) {
            Some(v) => v.push(item),
            None => _ = sec.insert(key.to_owned(), Value::Scalar(item)),
        }
    }
}
