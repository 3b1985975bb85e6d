//! Icon reference extraction from markup.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Modifier classes that may precede the icon class, as regex fragments.
///
/// Each is written in markup as `fa-<modifier>` and never names an icon.
pub const MODIFIER_KEYWORDS: &[&str] = &[
    r"pulse",
    r"rotate-\d+",
    r"flip-horizontal",
    r"flip-vertical",
    r"spin",
    r"border",
    r"pull-right",
    r"pull-left",
    r"inverse",
    r"stack-\d+x",
    r"xs",
    r"sm",
    r"lg",
    r"fw",
    r"\d+x",
];

/// Matches `<i class="fa[s|r|b|l] [fa-<modifier> ...] fa-<name> [...]"></i>`.
static ICON_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    let modifiers = MODIFIER_KEYWORDS.join("|");
    Regex::new(&format!(
        r#"<i class="fa[a-z]?\s+(?:fa-(?:{modifiers})\s+)*fa-(?P<name>[^\s"]+)(?:\s+[^\s"]+)*\s*"></i>"#
    ))
    .unwrap()
});

/// Extract the distinct icon names referenced in `markup`.
///
/// Only the name after the `fa-` marker is captured; modifier classes and
/// trailing tokens are skipped.
pub fn extract_icon_names(markup: &str) -> BTreeSet<String> {
    ICON_REFERENCE
        .captures_iter(markup)
        .filter_map(|caps| caps.name("name"))
        .map(|name| name.as_str().to_owned())
        .collect()
}
