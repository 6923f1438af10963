//! Path normalization for registry lookups.
//!
//! Every path handed to the runtime is resolved against the absolute root
//! before lookup, so `//folderB/../folderA/file1.txt` and
//! `/folderA/file1.txt` address the same node.

/// Normalize a slash-separated path to its canonical absolute form.
///
/// Collapses repeated separators, drops `.` segments, resolves `..`
/// against the root (never above it), and strips any trailing slash.
/// The result always starts with `/`; the root normalizes to `"/"`.
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    if segments.is_empty() {
        "/".to_string()
    } else {
        let mut out = String::new();
        for s in &segments {
            out.push('/');
            out.push_str(s);
        }
        out
    }
}
