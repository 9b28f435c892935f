//! Staleness detection for incremental builds.
//!
//! The output tree itself is the incremental-build cache: there is no
//! manifest, no database, no content hashing. An artifact's modification
//! time is compared against the modification times of its declared
//! sources, and the artifact is rebuilt whenever it is not strictly
//! newer than *every* source.
//!
//! Granularity is per-artifact, not per-build — a single stale document
//! never forces rebuilding unrelated documents, which bounds rebuild
//! cost to O(changed files).
//!
//! Consequence of the no-manifest design: if someone deletes an output
//! file or alters its timestamp externally, the next build simply
//! believes the filesystem. There is no tamper detection.

use std::fs;
use std::io;
use std::path::Path;

/// Decide whether `artifact` must be regenerated from `sources`.
///
/// Returns `true` when the artifact does not exist, or when its
/// modification time is not strictly later than that of every source.
/// Equal timestamps count as stale — better one redundant rebuild than
/// a silently outdated artifact on coarse-granularity filesystems.
///
/// Sources must exist; a missing source is an I/O error, not a
/// staleness verdict. The caller resolves sources (document, template)
/// before asking.
pub fn is_stale(artifact: &Path, sources: &[&Path]) -> io::Result<bool> {
    let artifact_mtime = match fs::metadata(artifact) {
        Ok(meta) => meta.modified()?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(true),
        Err(err) => return Err(err),
    };

    for source in sources {
        let source_mtime = fs::metadata(source)?.modified()?;
        if artifact_mtime <= source_mtime {
            return Ok(true);
        }
    }

    Ok(false)
}
