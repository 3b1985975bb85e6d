//! Allow-list filtering of the icon literals in an asset.

use std::{
    collections::BTreeSet,
    fmt::{self, Display, Formatter},
    ops::{AddAssign, Range},
};

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::{error::Result, literal::parse_literal};

/// Matches the `{...};` literal assigned by `var f = ` or `var f=`, on one line.
static ICON_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"var f(?: = |=)(\{.*?\};)").unwrap());

/// Counters collected while filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Number of icon literals found.
    pub literals: usize,
    /// Icon definitions kept.
    pub kept: usize,
    /// Icon definitions dropped.
    pub dropped: usize,
}

impl AddAssign for FilterStats {
    fn add_assign(&mut self, other: Self) {
        self.literals += other.literals;
        self.kept += other.kept;
        self.dropped += other.dropped;
    }
}

impl Display for FilterStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} icon literals, {} icons kept, {} dropped",
            self.literals, self.kept, self.dropped
        )
    }
}

/// Asset text with every icon literal filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredAsset {
    pub content: String,
    pub stats: FilterStats,
}

/// A replacement of `span` in the original text.
#[derive(Debug)]
struct Edit {
    span: Range<usize>,
    replacement: String,
}

/// Keeps only the allow-listed icons of each embedded literal.
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    allowed: BTreeSet<String>,
}

impl AssetFilter {
    /// Creates a filter that keeps the icons named in `allowed`.
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_allowed(&self, name: &str) -> bool {
        self.allowed.contains(name)
    }

    /// Filters one `{...};` literal and serializes it back in compact form.
    ///
    /// Surviving entries keep their source order and their values untouched.
    pub fn filter_literal(&self, literal: &str) -> Result<(String, FilterStats)> {
        let mut icons = parse_literal(literal)?;
        let total = icons.len();
        icons.retain(|name, _| self.is_allowed(name));

        let stats = FilterStats {
            literals: 1,
            kept: icons.len(),
            dropped: total - icons.len(),
        };
        let mut text = Value::Object(icons.into_iter().collect::<Map<_, _>>()).to_string();
        text.push(';');
        Ok((text, stats))
    }

    /// Filters every icon literal in `source`, leaving the rest untouched.
    ///
    /// Fails on the first malformed literal, with the offset relative to `source`.
    pub fn filter_source(&self, source: &str) -> Result<FilteredAsset> {
        let mut edits = Vec::new();
        let mut stats = FilterStats::default();

        for literal in ICON_LITERAL.captures_iter(source).filter_map(|caps| caps.get(1)) {
            let (replacement, literal_stats) = self
                .filter_literal(literal.as_str())
                .map_err(|e| e.shifted(literal.start()))?;
            debug!(
                "Icon literal at byte {}: kept {}, dropped {}",
                literal.start(),
                literal_stats.kept,
                literal_stats.dropped
            );
            stats += literal_stats;
            edits.push(Edit {
                span: literal.range(),
                replacement,
            });
        }

        Ok(FilteredAsset {
            content: apply_edits(source, &edits),
            stats,
        })
    }
}

/// Applies sorted, non-overlapping edits in a single pass.
fn apply_edits(source: &str, edits: &[Edit]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in edits {
        out.push_str(&source[cursor..edit.span.start]);
        out.push_str(&edit.replacement);
        cursor = edit.span.end;
    }
    out.push_str(&source[cursor..]);
    out
}
