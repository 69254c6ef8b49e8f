use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// A candidate artifact file found by a directory scan.
///
/// Transient: rebuilt on every resolution attempt, since artifacts can
/// appear asynchronously from out-of-process analysis runs.
#[derive(Debug, Clone)]
pub struct ResultFileDescriptor {
    /// Bare file name
    pub name: String,

    /// Full path
    pub path: PathBuf,

    pub last_modified: SystemTime,
}

/// Find the most recently modified file in `directory` whose name starts
/// with `name_prefix`, ends with `name_suffix`, and (if given) contains
/// `substring`.
///
/// Any listing or stat failure, including a missing directory, yields
/// `None` so the caller can continue to the next source.
///
/// Known limitation: entries with identical modification times resolve in
/// directory-listing order, which is stable within one call but otherwise
/// unspecified.
pub fn find_latest(
    directory: &Path,
    name_prefix: &str,
    name_suffix: &str,
    substring: Option<&str>,
) -> Option<ResultFileDescriptor> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(
                directory = %directory.display(),
                error = %e,
                "Results directory not readable"
            );
            return None;
        }
    };

    let mut candidates = Vec::new();

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();

        if !name.starts_with(name_prefix) || !name.ends_with(name_suffix) {
            continue;
        }
        if let Some(needle) = substring {
            if !name.contains(needle) {
                continue;
            }
        }

        let last_modified = match entry.metadata().and_then(|meta| meta.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                debug!(file = %name, error = %e, "Skipping unstatable artifact");
                continue;
            }
        };

        candidates.push(ResultFileDescriptor {
            path: entry.path(),
            name,
            last_modified,
        });
    }

    // Stable sort keeps listing order for equal timestamps.
    candidates.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

    let winner = candidates.into_iter().next();
    if let Some(descriptor) = &winner {
        debug!(
            file = %descriptor.name,
            scoped = substring.is_some(),
            "Selected artifact file"
        );
    }
    winner
}
