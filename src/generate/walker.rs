//! Depth-first source tree traversal.
//!
//! Visits every node exactly once starting at `/`. A directory is
//! recorded before its children; children are visited in lexicographic
//! order of their full path, which fixes the manifest order and makes
//! generation deterministic. Every read failure is fatal to the run.

use crate::error::GenerateError;
use crate::generate::assembler::Assembler;
use crate::source::{join, SourceFs};
use tracing::debug;

/// Walk the whole source tree into the assembler.
pub fn walk<S: SourceFs>(source: &S, asm: &mut Assembler) -> Result<(), GenerateError> {
    walk_node(source, "/", asm)
}

fn walk_node<S: SourceFs>(
    source: &S,
    path: &str,
    asm: &mut Assembler,
) -> Result<(), GenerateError> {
    let meta = source.stat(path).map_err(|source| GenerateError::Source {
        path: path.to_string(),
        source,
    })?;

    if meta.is_dir {
        let entries = read_dir_paths(source, path)?;
        debug!(path, children = entries.len(), "visiting directory");
        asm.dir(path, &meta.name, meta.mod_time, entries.clone())
            .map_err(|source| GenerateError::Encode {
                path: path.to_string(),
                source,
            })?;
        for child in &entries {
            walk_node(source, child, asm)?;
        }
    } else {
        debug!(path, size = meta.size, "visiting file");
        let mut content = source.open(path).map_err(|source| GenerateError::Source {
            path: path.to_string(),
            source,
        })?;
        asm.file(path, &meta.name, meta.mod_time, content.as_mut(), meta.size)?;
    }

    Ok(())
}

/// Full child paths of a directory, lexicographically sorted.
fn read_dir_paths<S: SourceFs>(source: &S, dir: &str) -> Result<Vec<String>, GenerateError> {
    let names = source.read_dir(dir).map_err(|source| GenerateError::Source {
        path: dir.to_string(),
        source,
    })?;
    let mut paths: Vec<String> = names.iter().map(|name| join(dir, name)).collect();
    paths.sort();
    Ok(paths)
}
