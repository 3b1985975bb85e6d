//! CLI definitions and command dispatch.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::debug;

use fa_minify_filter::{AssetFile, AssetFilter, MinifyReport};
use fa_minify_scanner::{DEFAULT_TEMPLATE_EXTENSION, TemplateScanner};

use crate::validate::validate;

#[derive(Debug, Parser)]
#[command(name = "fa-minify", version)]
#[command(about = "Shrink a FontAwesome 5 JavaScript bundle to the icons your templates use")]
#[command(after_help = "Example:\n  fa-minify -t templates/ app/views -f static/fontawesome/all.js")]
pub struct Cli {
    /// Directories of the templates
    #[arg(short, long, value_name = "DIR", num_args = 1..)]
    pub templates: Vec<String>,
    /// Path to the FontAwesome .js bundle
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,
    /// Extension of the template files to scan
    #[arg(short, long, default_value = DEFAULT_TEMPLATE_EXTENSION)]
    pub extension: String,
    /// Suppress output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn run(&self) -> ExitCode {
        let Some(file) = self.file.as_deref().filter(|_| !self.templates.is_empty()) else {
            return Self::command()
                .print_help()
                .map_or(ExitCode::FAILURE, |()| ExitCode::SUCCESS);
        };

        let problems = validate(&self.templates, file);
        if !problems.is_empty() {
            for problem in problems {
                eprintln!("{problem}");
            }
            return ExitCode::FAILURE;
        }

        self.execute(file).map_or_else(
            |e| {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            },
            |_| ExitCode::SUCCESS,
        )
    }

    /// Scan the templates, then write the minified bundle next to `file`.
    pub fn execute(&self, file: &Path) -> Result<MinifyReport> {
        debug!(
            "Scanning {} template directories for *.{}",
            self.templates.len(),
            self.extension
        );
        let icons = TemplateScanner::new(&self.templates)
            .with_extension(&self.extension)
            .scan()
            .context("Failed to scan templates")?;
        self.status("Template files are handled.");

        let report = AssetFile::new(file)?
            .minify(&AssetFilter::new(icons))
            .with_context(|| format!("Failed to minify {}", file.display()))?;
        self.status("FontAwesome file is handled.");
        self.status(&format!("File {} is created.", report.output.display()));
        self.status(&reduction_message(&report));

        Ok(report)
    }

    fn status(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }
}

pub fn reduction_message(report: &MinifyReport) -> String {
    format!("The file size is reduced by {:.2} KB.", report.reduction_kib())
}
