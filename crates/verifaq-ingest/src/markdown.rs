//! Light Markdown markup stripping so headings, emphasis and links read as prose.

use once_cell::sync::Lazy;
use regex::Regex;

static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*(```|~~~).*$").unwrap());
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]{0,3}#{1,6}[ \t]+").unwrap());
static QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*>[ \t]?").unwrap());
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:[-*+]|\d+[.)])[ \t]+").unwrap());
static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").unwrap());
static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\*\*|__|\*|`)").unwrap());
static RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*[-*_](?:[ \t]*[-*_]){2,}[ \t]*$").unwrap());

/// Remove common Markdown syntax while keeping the prose intact.
pub fn strip_markup(text: &str) -> String {
    let text = FENCE.replace_all(text, "");
    let text = RULE.replace_all(&text, "");
    let text = HEADING.replace_all(&text, "");
    let text = QUOTE.replace_all(&text, "");
    let text = BULLET.replace_all(&text, "");
    let text = IMAGE.replace_all(&text, "$1");
    let text = LINK.replace_all(&text, "$1");
    EMPHASIS.replace_all(&text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        let md = "# Overview\n\nThe **gateway** validates [tokens](https://example.com).\n- First item here\n> Quoted `code` line";
        let plain = strip_markup(md);
        assert_eq!(
            plain,
            "Overview\n\nThe gateway validates tokens.\nFirst item here\nQuoted code line"
        );
    }

    #[test]
    fn test_horizontal_rule_removed() {
        assert_eq!(strip_markup("Above.\n---\nBelow."), "Above.\n\nBelow.");
    }
}
