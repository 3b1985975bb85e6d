//! Collect the FontAwesome icon names referenced from HTML templates.
//!
//! Templates are found recursively below each directory, glued together and
//! matched against the `<i class="fa fa-<name>"></i>` idiom.
//!
//! # Example
//!
//! ```
//! use fa_minify_scanner::extract_icon_names;
//!
//! let icons = extract_icon_names(r#"<i class="fa fa-pulse fa-star fw"></i>"#);
//! assert!(icons.contains("star"));
//! ```

mod error;
mod pattern;
mod scanner;

pub use error::{Error, Result};
pub use pattern::{MODIFIER_KEYWORDS, extract_icon_names};
pub use scanner::{DEFAULT_TEMPLATE_EXTENSION, TemplateScanner};
