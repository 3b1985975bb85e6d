//! Drop unused icon definitions from a FontAwesome JavaScript bundle.
//!
//! FontAwesome 5 bundles register their icons from a map literal assigned to
//! `var f`. This crate parses each such literal, keeps only the allow-listed
//! icons and writes the result to a sibling `.min.js` file.
//!
//! # Example
//!
//! ```
//! use fa_minify_filter::AssetFilter;
//!
//! let filter = AssetFilter::new(["adjust"]);
//! let filtered = filter
//!     .filter_source(r#"var f = { "address-book": [], adjust: []};"#)
//!     .unwrap();
//! assert_eq!(filtered.content, r#"var f = {"adjust":[]};"#);
//! ```

mod asset;
mod error;
mod filter;
mod literal;

pub use asset::{ASSET_EXTENSION, AssetFile, MINIFIED_EXTENSION, MinifyReport, minified_path};
pub use error::{Error, LiteralErrorKind, Result};
pub use filter::{AssetFilter, FilterStats, FilteredAsset};
pub use literal::{IconMap, parse_literal};
