//! Asset file I/O and the minified output path.

use std::{
    ffi::OsStr,
    fs::{read_to_string, write},
    path::{Path, PathBuf},
};

use log::info;

use crate::{
    error::{Error, Result},
    filter::{AssetFilter, FilterStats},
};

/// Extension of the asset files accepted for minification.
pub const ASSET_EXTENSION: &str = ".js";

/// Extension that replaces [`ASSET_EXTENSION`] in the output file name.
pub const MINIFIED_EXTENSION: &str = ".min.js";

/// Derives the output path: `icons.js` becomes `icons.min.js` in the same directory.
///
/// The `.js` suffix is matched case-sensitively; any other name is rejected.
pub fn minified_path(path: &Path) -> Result<PathBuf> {
    let stem = path
        .file_name()
        .and_then(OsStr::to_str)
        .and_then(|name| name.strip_suffix(ASSET_EXTENSION))
        .ok_or_else(|| Error::UnexpectedExtension(path.to_path_buf()))?;
    Ok(path.with_file_name(format!("{stem}{MINIFIED_EXTENSION}")))
}

/// Outcome of minifying one asset file.
#[derive(Debug, Clone, PartialEq)]
pub struct MinifyReport {
    pub output: PathBuf,
    /// Size of the source asset in bytes.
    pub original_size: usize,
    /// Size of the written output in bytes.
    pub minified_size: usize,
    pub stats: FilterStats,
}

impl MinifyReport {
    /// Size reduction in KiB; negative if the output grew.
    pub fn reduction_kib(&self) -> f64 {
        (self.original_size as f64 - self.minified_size as f64) / 1024.0
    }
}

/// A FontAwesome bundle and the path its minified copy is written to.
#[derive(Debug, Clone)]
pub struct AssetFile {
    path: PathBuf,
    output: PathBuf,
}

impl AssetFile {
    /// Wraps `path`, failing if no `.min.js` name can be derived from it.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let output = minified_path(&path)?;
        Ok(Self { path, output })
    }

    /// Where [`AssetFile::minify`] writes its output.
    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Read the asset text.
    pub fn read(&self) -> Result<String> {
        read_to_string(&self.path).map_err(|source| Error::Read {
            path: self.path.clone(),
            source,
        })
    }

    /// Filter the asset and write the result next to it.
    ///
    /// The source is never modified, and nothing is written if any literal fails to parse.
    pub fn minify(&self, filter: &AssetFilter) -> Result<MinifyReport> {
        let source = self.read()?;
        let filtered = filter.filter_source(&source)?;
        write(&self.output, &filtered.content).map_err(|source| Error::Write {
            path: self.output.clone(),
            source,
        })?;

        let report = MinifyReport {
            output: self.output.clone(),
            original_size: source.len(),
            minified_size: filtered.content.len(),
            stats: filtered.stats,
        };
        info!(
            "Minified {} -> {} ({:.2} KB -> {:.2} KB, {})",
            self.path.file_name().unwrap_or_default().to_string_lossy(),
            self.output.file_name().unwrap_or_default().to_string_lossy(),
            report.original_size as f64 / 1024.0,
            report.minified_size as f64 / 1024.0,
            report.stats
        );
        Ok(report)
    }
}
