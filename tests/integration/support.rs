//! Shared helpers: a line-level reader of generated artifacts.
//!
//! Mirrors what the Rust compiler does when the artifact is built:
//! replays the `fs.file` / `fs.dir` / `fs.entries` calls against a real
//! `FsBuilder` and hands back the loaded filesystem.

use embedfs::runtime::EmbeddedFs;

/// Extract the two quoted strings at the start of a builder call line.
fn quoted(line: &str) -> Vec<String> {
    line.split('"')
        .skip(1)
        .step_by(2)
        .map(|s| s.to_string())
        .collect()
}

/// Parse a `(secs, nanos)` tuple literal.
fn timestamp(line: &str) -> (i64, u32) {
    let inner = line
        .trim()
        .trim_start_matches('(')
        .trim_end_matches([',', ')', ';']);
    let mut parts = inner.split(',').map(|p| p.trim());
    let secs = parts.next().unwrap().parse().unwrap();
    let nanos = parts.next().unwrap().parse().unwrap();
    (secs, nanos)
}

/// Parse one row of `0x!!,` tokens.
fn row_bytes(line: &str) -> Vec<u8> {
    line.split_whitespace()
        .map(|token| {
            let token = token.trim_end_matches(',').trim_start_matches("0x");
            u8::from_str_radix(token, 16).unwrap()
        })
        .collect()
}

/// Replay a generated artifact into an `EmbeddedFs`.
pub fn load_artifact(text: &str) -> EmbeddedFs {
    let mut builder = EmbeddedFs::builder();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        let trimmed = line.trim();
        if trimmed == "fs.file(" {
            let path = quoted(lines.next().unwrap())[0].clone();
            let name = quoted(lines.next().unwrap())[0].clone();
            let mod_time = timestamp(lines.next().unwrap());
            assert_eq!(lines.next().unwrap().trim(), "&[");
            let mut content = Vec::new();
            for row in lines.by_ref() {
                if row.trim() == "][..]," {
                    break;
                }
                content.extend(row_bytes(row));
            }
            assert_eq!(lines.next().unwrap().trim(), ");");
            builder.file(&path, &name, mod_time, content);
        } else if trimmed.starts_with("fs.dir(") {
            let strings = quoted(trimmed);
            let tuple_start = trimmed.rfind('(').unwrap();
            let mod_time = timestamp(&trimmed[tuple_start..]);
            builder.dir(&strings[0], &strings[1], mod_time);
        } else if trimmed.starts_with("fs.entries(") {
            let path = quoted(trimmed)[0].clone();
            let mut entry_paths = Vec::new();
            for row in lines.by_ref() {
                if row.trim() == "]);" {
                    break;
                }
                entry_paths.push(quoted(row)[0].clone());
            }
            let refs: Vec<&str> = entry_paths.iter().map(String::as_str).collect();
            builder.entries(&path, &refs);
        }
    }

    builder.build()
}
