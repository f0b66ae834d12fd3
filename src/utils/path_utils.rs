//! Path helpers for output layout

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{ChunkError, ChunkResult};

/// File name without its final extension, lossily converted to UTF-8
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Output directory mirroring `file`'s position under `input_root`
///
/// `input_root/a/b/img.tif` maps to `output_root/a/b/img`. A file outside
/// `input_root` lands directly under `output_root`.
pub fn mirrored_output_dir(input_root: &Path, output_root: &Path, file: &Path) -> PathBuf {
    let parent = file.strip_prefix(input_root).ok()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new(""));

    output_root.join(parent).join(file_stem(file))
}

/// Creates `dir` and its parents
pub fn ensure_dir(dir: &Path) -> ChunkResult<()> {
    fs::create_dir_all(dir).map_err(|e| ChunkError::Io(dir.to_path_buf(), e))
}
