//! Input validation performed before any processing.

use std::path::{Path, PathBuf};

use fa_minify_filter::ASSET_EXTENSION;

/// A problem with the paths given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("-t contains paths that are not directories: {}", .0.join(", "))]
    NotDirectories(Vec<String>),

    #[error("-f is not an existing {} file: {}", ASSET_EXTENSION, .0.display())]
    NotAnAssetFile(PathBuf),
}

/// Return the template paths that are not existing directories.
pub fn non_directories(paths: &[String]) -> Vec<&str> {
    paths
        .iter()
        .map(String::as_str)
        .filter(|path| !Path::new(path).is_dir())
        .collect()
}

/// Whether `path` is an existing file whose name ends with `.js`.
pub fn is_asset_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(ASSET_EXTENSION))
}

/// Collect every problem with the template directories and the asset path.
pub fn validate(templates: &[String], asset: &Path) -> Vec<InvalidInput> {
    let mut problems = Vec::new();

    let missing = non_directories(templates);
    if !missing.is_empty() {
        problems.push(InvalidInput::NotDirectories(
            missing.into_iter().map(str::to_owned).collect(),
        ));
    }
    if !is_asset_file(asset) {
        problems.push(InvalidInput::NotAnAssetFile(asset.to_path_buf()));
    }

    problems
}
