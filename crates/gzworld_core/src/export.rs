//! Writing documents to disk
//!
//! Writes are atomic: content goes to a temporary sibling file which is then
//! renamed over the destination, so readers never observe a partial document.
//! A crash mid-write leaves at most a stray `.tmp` file next to the target.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::WorldResult;
use crate::world::World;

/// Canonical extension of world documents
pub const SDF_EXTENSION: &str = "sdf";

/// Append `.sdf` unless the path already ends with it
///
/// `foo` and `foo.sdf` both become `foo.sdf`; `foo.world` becomes
/// `foo.world.sdf`.
pub fn normalize_extension(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_some_and(|ext| ext == SDF_EXTENSION) {
        return path.to_path_buf();
    }
    let mut normalized = path.as_os_str().to_owned();
    normalized.push(".");
    normalized.push(SDF_EXTENSION);
    PathBuf::from(normalized)
}

/// Replace `path` with `contents` atomically
pub fn write_atomic(path: &Path, contents: &str) -> WorldResult<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp = path.with_file_name(format!(".{}.tmp", file_name));

    let result = (|| {
        let mut file = fs::File::create(&temp)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp);
    }
    result.map_err(Into::into)
}

/// Writes a world in simulator format
///
/// A thin sink over [`World::save`] for callers that keep export separate
/// from world construction.
pub struct Exporter<'a> {
    world: &'a World,
}

impl<'a> Exporter<'a> {
    pub fn new(world: &'a World) -> Self {
        Self { world }
    }

    /// Save the world as SDF, returning the path actually written
    pub fn to_gazebo_format(&self, path: impl AsRef<Path>) -> WorldResult<PathBuf> {
        self.world.save(path)
    }
}
