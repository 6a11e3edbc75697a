use std::env;
use std::path::Path;

/// Force forward slashes so prefix and marker matching works for Windows paths too.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Absolute, symlink-free form of the repository root, with forward slashes.
/// Falls back to the (absolutized) input when the directory does not exist.
pub fn canonical_repo_root(repo_root: &Path) -> String {
    let absolute = if repo_root.is_absolute() {
        repo_root.to_path_buf()
    } else {
        env::current_dir().unwrap_or_default().join(repo_root)
    };

    // dunce avoids the \\?\ prefix std::fs::canonicalize produces on Windows
    let canonical = dunce::canonicalize(&absolute).unwrap_or(absolute);
    let mut final_path = normalize_separators(&canonical.to_string_lossy());

    // Windows Drive Letter Normalization (C:/ not c:/)
    if cfg!(windows) && final_path.chars().nth(1) == Some(':') {
        final_path[..1].make_ascii_uppercase();
    }
    final_path
}
