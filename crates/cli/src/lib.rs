//! fa-minify CLI library.

pub mod cli;
pub mod validate;
