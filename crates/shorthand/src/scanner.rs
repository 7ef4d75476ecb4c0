//! Discovery of category headers beneath a source root

use crate::error::Result;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

static CATEGORY_HEADER: Lazy<glob::Pattern> =
    Lazy::new(|| glob::Pattern::new(crate::CATEGORY_HEADER_GLOB).unwrap());

/// Find every `Object+Category.h` beneath the root, recursively
///
/// A root that is itself a file is returned as a singleton; whether it is
/// actually a header is checked during processing, not here.
pub fn find_category_headers(root: &Path) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let files = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .map(|name| CATEGORY_HEADER.matches(name))
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    Ok(files)
}
