//! Source filesystem rooted at a directory on disk.

use crate::source::{base_name, SourceFs, SourceMeta};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Serves an on-disk directory tree through the abstract path space:
/// abstract `/a/b.txt` resolves to `<root>/a/b.txt`.
#[derive(Debug, Clone)]
pub struct OsFs {
    root: PathBuf,
}

impl OsFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        OsFs { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let mut full = self.root.clone();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            full.push(segment);
        }
        full
    }
}

impl SourceFs for OsFs {
    fn stat(&self, path: &str) -> std::io::Result<SourceMeta> {
        let meta = fs::metadata(self.resolve(path))?;
        let mod_time = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| DateTime::<Utc>::UNIX_EPOCH);
        Ok(SourceMeta {
            name: base_name(path).to_string(),
            is_dir: meta.is_dir(),
            size: if meta.is_dir() { 0 } else { meta.len() },
            mod_time,
        })
    }

    fn read_dir(&self, path: &str) -> std::io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.resolve(path))? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn open(&self, path: &str) -> std::io::Result<Box<dyn Read + '_>> {
        let file = fs::File::open(self.resolve(path))?;
        Ok(Box::new(file))
    }
}
