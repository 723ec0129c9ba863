//! Path and enumeration utilities over a cache root directory.
//!
//! A cache root holds three kinds of entries, distinguished by extension:
//! compiled engines (`.engine`), shape profiles (`.profile`), and compiler
//! timing data (`.timing`). Timing caches additionally embed the hardware
//! compute capability in their file name so a timing cache built on one
//! hardware class is never loaded on another.

use std::path::{Path, PathBuf};

/// File stem used for timing-cache entries, ahead of the `sm<NN>` token.
const TIMING_CACHE_STEM: &str = "kiln_engine_cache_sm";

/// Builds the path for a named cache entry under `root`.
///
/// An empty root leaves `name` caller-relative; there is no error path — a
/// nonexistent root only surfaces at actual file I/O time.
pub fn cache_path(root: &Path, name: &str) -> PathBuf {
    if root.as_os_str().is_empty() {
        PathBuf::from(name)
    } else {
        root.join(name)
    }
}

/// Builds the engine cache file name for a prefix and fingerprint.
pub fn engine_file_name(prefix: &str, fingerprint: u64) -> String {
    format!("{prefix}_{fingerprint}.engine")
}

/// Builds the shape-profile cache file name for a prefix and fingerprint.
pub fn profile_file_name(prefix: &str, fingerprint: u64) -> String {
    format!("{prefix}_{fingerprint}.profile")
}

/// Formats a device's compute capability as the short decimal token used in
/// timing-cache file names, e.g. major 8 minor 6 becomes `"86"`.
pub fn compute_capability(major: u32, minor: u32) -> String {
    (major * 10 + minor).to_string()
}

/// Builds the timing-cache path for a compute capability.
///
/// The capability token is embedded in the file name; loading a timing cache
/// built for different hardware makes the compiler fail, so each hardware
/// class gets a distinct entry.
pub fn timing_cache_path(root: &Path, compute_capability: &str) -> PathBuf {
    let name = format!("{TIMING_CACHE_STEM}{compute_capability}.timing");
    cache_path(root, &name)
}

/// Lists all cache entries under `root` with the given file extension.
///
/// The extension may be given with or without a leading dot. Non-recursive.
/// A missing or unreadable root yields an empty vector; callers must not
/// treat empty as an error.
pub fn caches_by_type(root: &Path, extension: &str) -> Vec<PathBuf> {
    let want = extension.strip_prefix('.').unwrap_or(extension);
    let Ok(entries) = std::fs::read_dir(root) else {
        return Vec::new();
    };

    let mut files = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some(want) {
            files.push(path);
        }
    }
    files
}

/// Returns `true` if `root` contains at least one entry with the extension.
pub fn cache_exists_by_type(root: &Path, extension: &str) -> bool {
    !caches_by_type(root, extension).is_empty()
}

/// Deletes every cache entry under `root` with the given extension.
///
/// Best-effort eviction: an individual delete failure is logged and skipped,
/// never surfaced to the caller.
pub fn remove_caches_by_type(root: &Path, extension: &str) {
    for path in caches_by_type(root, extension) {
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to evict cache entry");
        }
    }
}
