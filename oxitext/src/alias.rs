//! Label normalization and alias resolution.
//!
//! Two profiles are supported. The web profile follows the Encoding
//! Standard's label table, under which `us-ascii` and `iso-8859-1` both mean
//! windows-1252. The email profile keeps those two distinct, knows UTF-7, and
//! treats unknown `iso-8859-*` labels as US-ASCII the way MIME readers do.
//!
//! Both functions return the canonical name, or `""` when the label is
//! empty or unknown.

use crate::labels::LABELS;

/// ASCII whitespace as the Encoding Standard defines it.
fn is_ascii_white(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
}

/// Trim ASCII whitespace and lowercase ASCII letters. Other characters are
/// left alone.
pub fn normalize(label: &str) -> String {
    label.trim_matches(is_ascii_white).to_ascii_lowercase()
}

fn lookup(normalized: &str) -> Option<&'static str> {
    LABELS
        .binary_search_by(|&(label, _)| label.cmp(normalized))
        .ok()
        .map(|i| LABELS[i].1)
}

/// Every web-profile label with its canonical name, sorted by label.
pub fn labels() -> impl Iterator<Item = (&'static str, &'static str)> {
    LABELS.iter().copied()
}

/// Resolve a label to its canonical name under the web profile.
///
/// ```rust
/// use oxitext::resolve_alias;
///
/// assert_eq!(resolve_alias(" Latin1 "), "windows-1252");
/// assert_eq!(resolve_alias("csISO2022KR"), "replacement");
/// assert_eq!(resolve_alias("utf-7"), "");
/// ```
pub fn resolve_alias(label: &str) -> &'static str {
    lookup(&normalize(label)).unwrap_or("")
}

/// Resolve a label to its canonical name under the email profile.
///
/// ```rust
/// use oxitext::resolve_alias_for_email;
///
/// assert_eq!(resolve_alias_for_email("ISO-8859-1"), "iso-8859-1");
/// assert_eq!(resolve_alias_for_email("iso-8859-99"), "us-ascii");
/// ```
pub fn resolve_alias_for_email(label: &str) -> String {
    let name = normalize(label);
    match name.as_str() {
        "" => String::new(),
        "utf-8" | "iso-8859-1" => name,
        "us-ascii" | "ascii" | "ansi_x3.4-1968" => "us-ascii".to_string(),
        other => {
            if let Some(canonical) = lookup(other) {
                return canonical.to_string();
            }
            match other {
                "iso-2022-jp-2" => "iso-2022-jp".to_string(),
                "utf-7" | "unicode-1-1-utf-7" => "utf-7".to_string(),
                _ if other.len() > 9 && other.starts_with("iso-8859-") => "us-ascii".to_string(),
                _ => String::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_sorted_and_unique() {
        assert!(LABELS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_every_canonical_name_is_a_fixed_point() {
        for &(_, canonical) in LABELS {
            if canonical != "replacement" {
                assert_eq!(resolve_alias(canonical), canonical);
            }
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("\t UTF-8\r\n"), "utf-8");
        assert_eq!(normalize("  "), "");
        // Only ASCII letters are folded
        assert_eq!(normalize("\u{130}SO"), "\u{130}so");
    }

    #[test]
    fn test_web_profile() {
        assert_eq!(resolve_alias("ISO-8859-1"), "windows-1252");
        assert_eq!(resolve_alias("us-ascii"), "windows-1252");
        assert_eq!(resolve_alias("utf-16"), "utf-16le");
        assert_eq!(resolve_alias("utf8"), "utf-8");
        assert_eq!(resolve_alias("x-sjis"), "shift_jis");
        assert_eq!(resolve_alias("hz-gb-2312"), "replacement");
        assert_eq!(resolve_alias("replacement"), "");
        assert_eq!(resolve_alias("utf-7"), "");
        assert_eq!(resolve_alias(""), "");
        assert_eq!(resolve_alias("nonsense"), "");
    }

    #[test]
    fn test_email_profile() {
        assert_eq!(resolve_alias_for_email("iso-8859-1"), "iso-8859-1");
        assert_eq!(resolve_alias_for_email("US-ASCII"), "us-ascii");
        assert_eq!(resolve_alias_for_email("ascii"), "us-ascii");
        assert_eq!(resolve_alias_for_email("ansi_x3.4-1968"), "us-ascii");
        assert_eq!(resolve_alias_for_email("utf-7"), "utf-7");
        assert_eq!(resolve_alias_for_email("unicode-1-1-utf-7"), "utf-7");
        assert_eq!(resolve_alias_for_email("iso-2022-jp-2"), "iso-2022-jp");
        assert_eq!(resolve_alias_for_email("latin1"), "windows-1252");
        assert_eq!(resolve_alias_for_email("iso-8859-2"), "iso-8859-2");
        assert_eq!(resolve_alias_for_email("iso-8859-12"), "us-ascii");
        // Exactly nine characters is not enough for the MIME rule
        assert_eq!(resolve_alias_for_email("iso-8859-"), "");
        assert_eq!(resolve_alias_for_email("hz-gb-2312"), "replacement");
        assert_eq!(resolve_alias_for_email("replacement"), "");
        assert_eq!(resolve_alias_for_email(""), "");
    }
}
