//! In-memory source filesystem for fixtures and tests.

use crate::runtime::path::normalize;
use crate::source::{base_name, SourceFs, SourceMeta};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{Cursor, Error, ErrorKind, Read};

/// A source tree held entirely in memory.
///
/// Built from `(path, content)` pairs; intermediate directories are
/// implied. All nodes report the same modification time (the unix epoch
/// unless overridden).
#[derive(Debug, Clone, Default)]
pub struct MemFs {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
    mod_time: Option<DateTime<Utc>>,
}

impl MemFs {
    pub fn new<P, C>(entries: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<str>,
        C: Into<Vec<u8>>,
    {
        let mut fs = MemFs {
            files: BTreeMap::new(),
            dirs: BTreeSet::new(),
            mod_time: None,
        };
        fs.dirs.insert("/".to_string());
        for (path, content) in entries {
            let path = normalize(path.as_ref());
            let mut ancestor = path.as_str();
            while let Some((parent, _)) = ancestor.rsplit_once('/') {
                let parent = if parent.is_empty() { "/" } else { parent };
                fs.dirs.insert(parent.to_string());
                ancestor = parent;
                if parent == "/" {
                    break;
                }
            }
            fs.files.insert(path, content.into());
        }
        fs
    }

    /// Report `mod_time` for every node instead of the epoch.
    pub fn with_mod_time(mut self, mod_time: DateTime<Utc>) -> Self {
        self.mod_time = Some(mod_time);
        self
    }

    fn mod_time(&self) -> DateTime<Utc> {
        self.mod_time.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    fn not_found(path: &str) -> Error {
        Error::new(ErrorKind::NotFound, format!("no such node: {}", path))
    }
}

impl SourceFs for MemFs {
    fn stat(&self, path: &str) -> std::io::Result<SourceMeta> {
        let path = normalize(path);
        if let Some(content) = self.files.get(&path) {
            return Ok(SourceMeta {
                name: base_name(&path).to_string(),
                is_dir: false,
                size: content.len() as u64,
                mod_time: self.mod_time(),
            });
        }
        if self.dirs.contains(&path) {
            return Ok(SourceMeta {
                name: base_name(&path).to_string(),
                is_dir: true,
                size: 0,
                mod_time: self.mod_time(),
            });
        }
        Err(Self::not_found(&path))
    }

    fn read_dir(&self, path: &str) -> std::io::Result<Vec<String>> {
        let path = normalize(path);
        if !self.dirs.contains(&path) {
            return Err(Self::not_found(&path));
        }
        let prefix = if path == "/" {
            "/".to_string()
        } else {
            format!("{}/", path)
        };
        let mut names = BTreeSet::new();
        for candidate in self.files.keys().chain(self.dirs.iter()) {
            if let Some(rest) = candidate.strip_prefix(&prefix) {
                if rest.is_empty() {
                    continue;
                }
                let name = rest.split('/').next().unwrap_or(rest);
                names.insert(name.to_string());
            }
        }
        Ok(names.into_iter().collect())
    }

    fn open(&self, path: &str) -> std::io::Result<Box<dyn Read + '_>> {
        let path = normalize(path);
        match self.files.get(&path) {
            Some(content) => Ok(Box::new(Cursor::new(content.clone()))),
            None => Err(Self::not_found(&path)),
        }
    }
}
