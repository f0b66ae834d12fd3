//! Output file naming

/// File name of the chunk at row `i`, column `j` of `source_stem`
///
/// With a non-empty prefix the name is `{prefix}_{stem}_chunk_{i}_{j}.jpg`,
/// otherwise `{stem}_chunk_{i}_{j}.jpg`.
pub fn chunk_file_name(prefix: &str, source_stem: &str, i: u32, j: u32) -> String {
    if prefix.is_empty() {
        format!("{}_chunk_{}_{}.jpg", source_stem, i, j)
    } else {
        format!("{}_{}_chunk_{}_{}.jpg", prefix, source_stem, i, j)
    }
}
