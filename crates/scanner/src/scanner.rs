//! Recursive template discovery and scanning.

use std::{
    collections::BTreeSet,
    fs::read_to_string,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use log::{debug, info};

use crate::{
    error::{Error, Result},
    pattern::extract_icon_names,
};

/// Default extension of the template files to scan.
pub const DEFAULT_TEMPLATE_EXTENSION: &str = "html";

/// Scanner over a set of template directories.
///
/// # Example
///
/// ```no_run
/// use fa_minify_scanner::TemplateScanner;
///
/// let icons = TemplateScanner::new(["templates/", "app/views"]).scan().unwrap();
/// println!("{} icons in use", icons.len());
/// ```
#[derive(Debug, Clone)]
pub struct TemplateScanner {
    dirs: Vec<String>,
    extension: String,
}

impl TemplateScanner {
    /// Creates a scanner over `dirs`, in the given order.
    ///
    /// A single trailing `/` or `\` is stripped from each directory.
    pub fn new<I, S>(dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            dirs: dirs
                .into_iter()
                .map(|dir| strip_trailing_separator(dir.as_ref()).to_owned())
                .collect(),
            extension: DEFAULT_TEMPLATE_EXTENSION.to_owned(),
        }
    }

    /// Sets the extension of the template files, without the leading dot.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Template directories, with trailing separators stripped.
    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }

    /// Finds every template file below the directories, at any depth.
    ///
    /// Files are returned directory by directory, in glob order within each.
    pub fn template_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for dir in &self.dirs {
            let pattern = format!("{}/**/*.{}", Pattern::escape(dir), self.extension);
            let paths = glob(&pattern).map_err(|source| Error::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            for path in paths {
                let path = path?;
                debug!("Found template {}", path.display());
                files.push(path);
            }
        }
        Ok(files)
    }

    /// Reads every template file and joins them, each preceded by a newline.
    pub fn combined_markup(&self) -> Result<String> {
        let files = self.template_files()?;
        glue_files(&files)
    }

    /// Collects the distinct icon names referenced by the templates.
    pub fn scan(&self) -> Result<BTreeSet<String>> {
        let files = self.template_files()?;
        let markup = glue_files(&files)?;
        let icons = extract_icon_names(&markup);
        info!(
            "Scanned {} template files, {} distinct icons referenced",
            files.len(),
            icons.len()
        );
        Ok(icons)
    }
}

fn glue_files(files: &[PathBuf]) -> Result<String> {
    let mut markup = String::new();
    for file in files {
        markup.push('\n');
        markup.push_str(&read_template(file)?);
    }
    Ok(markup)
}

fn read_template(path: &Path) -> Result<String> {
    read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn strip_trailing_separator(dir: &str) -> &str {
    dir.strip_suffix(['/', '\\']).unwrap_or(dir)
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, write};

    use pretty_assertions::assert_eq;
    use tempfile::{TempDir, tempdir};

    use super::*;

    fn dir_str(dir: &Path) -> String {
        dir.to_str().unwrap().to_owned()
    }

    fn template_tree() -> TempDir {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("admin").join("users");
        create_dir_all(&nested).unwrap();
        write(temp.path().join("index.html"), r#"<i class="fas fa-home"></i>"#).unwrap();
        write(
            nested.join("list.html"),
            r#"<i class="fas fa-spin fa-sync"></i> <i class="fas fa-home"></i>"#,
        )
        .unwrap();
        write(temp.path().join("notes.txt"), r#"<i class="fas fa-ghost"></i>"#).unwrap();
        temp
    }

    #[test]
    fn test_strip_trailing_separator() {
        assert_eq!(strip_trailing_separator("templates/"), "templates");
        assert_eq!(strip_trailing_separator("templates\\"), "templates");
        assert_eq!(strip_trailing_separator("templates"), "templates");
    }

    #[test]
    fn test_scan_is_recursive() {
        let temp = template_tree();
        let icons = TemplateScanner::new([dir_str(temp.path())]).scan().unwrap();
        assert_eq!(icons.into_iter().collect::<Vec<_>>(), ["home", "sync"]);
    }

    #[test]
    fn test_trailing_separator_is_tolerated() {
        let temp = template_tree();
        let dir = format!("{}/", dir_str(temp.path()));
        let scanner = TemplateScanner::new([dir]);
        assert_eq!(scanner.dirs(), [dir_str(temp.path())]);
        assert_eq!(scanner.template_files().unwrap().len(), 2);
    }

    #[test]
    fn test_custom_extension() {
        let temp = template_tree();
        let icons = TemplateScanner::new([dir_str(temp.path())])
            .with_extension("txt")
            .scan()
            .unwrap();
        assert_eq!(icons.into_iter().collect::<Vec<_>>(), ["ghost"]);
    }

    #[test]
    fn test_no_directories() {
        let scanner = TemplateScanner::new(Vec::<String>::new());
        assert_eq!(scanner.combined_markup().unwrap(), "");
        assert!(scanner.scan().unwrap().is_empty());
    }

    #[test]
    fn test_directory_without_templates() {
        let temp = tempdir().unwrap();
        write(temp.path().join("readme.md"), "nothing here").unwrap();
        let scanner = TemplateScanner::new([dir_str(temp.path())]);
        assert!(scanner.template_files().unwrap().is_empty());
        assert!(scanner.scan().unwrap().is_empty());
    }

    #[test]
    fn test_combined_markup_prefixes_each_file() {
        let temp = tempdir().unwrap();
        write(temp.path().join("a.html"), "first").unwrap();
        write(temp.path().join("b.html"), "second").unwrap();
        let markup = TemplateScanner::new([dir_str(temp.path())])
            .combined_markup()
            .unwrap();
        assert_eq!(markup, "\nfirst\nsecond");
    }

    #[test]
    fn test_scan_union_of_directories() {
        let first = template_tree();
        let second = tempdir().unwrap();
        write(
            second.path().join("page.html"),
            r#"<i class="far fa-envelope"></i><i class="fas fa-home"></i>"#,
        )
        .unwrap();

        let one = TemplateScanner::new([dir_str(first.path())]).scan().unwrap();
        let two = TemplateScanner::new([dir_str(second.path())]).scan().unwrap();
        let both = TemplateScanner::new([dir_str(first.path()), dir_str(second.path())])
            .scan()
            .unwrap();

        assert_eq!(both, one.union(&two).cloned().collect());
    }

    #[test]
    fn test_unreadable_template_aborts() {
        let temp = tempdir().unwrap();
        write(temp.path().join("ok.html"), r#"<i class="fas fa-home"></i>"#).unwrap();
        write(temp.path().join("bad.html"), [0xff, 0xfe, 0x00]).unwrap();
        let err = TemplateScanner::new([dir_str(temp.path())]).scan().unwrap_err();
        assert!(matches!(err, Error::Read { ref path, .. } if path.ends_with("bad.html")));
    }
}
