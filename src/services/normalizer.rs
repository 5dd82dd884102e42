//! Name normalization for ROM files and remote artwork entries.
//! Remote listings never contain certain characters, so local names are
//! sanitized the same way before any comparison.

use regex::Regex;
use std::sync::LazyLock;

/// Compiled regex for characters that never survive into remote entries.
static RE_ILLEGAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[&*/:`<>?|"]"#).expect("Invalid regex"));

/// Compiled regex for the `N) ` ordinal prefix found on curated rom lists.
static RE_ORDINAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\)\s*").expect("Invalid regex"));

/// Compiled regex for `(...)` and `[...]` annotation groups (region,
/// language, revision tags).
static RE_ANNOTATIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\(.*?\)|\[.*?\])").expect("Invalid regex"));

/// Sanitize a name for comparison against remote listing entries.
///
/// Replaces `& * / : ` < > ? | "` with `_`.
pub fn sanitize_remote_name(name: &str) -> String {
    RE_ILLEGAL_CHARS.replace_all(name, "_").to_string()
}

/// Sanitize a local display/output name.
///
/// Additionally strips a leading `N) ` ordinal prefix before applying the
/// same character substitution as [`sanitize_remote_name`].
pub fn sanitize_local_name(name: &str) -> String {
    let unnumbered = RE_ORDINAL_PREFIX.replace(name, "");
    RE_ILLEGAL_CHARS.replace_all(&unnumbered, "_").to_string()
}

/// Remove all parenthetical and bracketed annotation groups and trim.
pub fn strip_annotations(name: &str) -> String {
    RE_ANNOTATIONS.replace_all(name, "").trim().to_string()
}

/// Remove every literal `DX` token and trim. Applied after
/// [`strip_annotations`] to widen a search that found nothing.
pub fn strip_dx(name: &str) -> String {
    name.replace("DX", "").trim().to_string()
}

/// Truncate at the first `" - "` separator to drop a subtitle, and trim.
pub fn strip_subtitle(name: &str) -> String {
    name.split(" - ").next().unwrap_or(name).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_remote_name() {
        assert_eq!(
            sanitize_remote_name("Ren & Stimpy: The Movie?"),
            "Ren _ Stimpy_ The Movie_"
        );
        assert_eq!(sanitize_remote_name("plain name.png"), "plain name.png");
        assert_eq!(sanitize_remote_name(r#"a/b\c"d"#), r#"a_b\c_d"#);
    }

    #[test]
    fn test_sanitize_local_name_strips_ordinal_prefix() {
        assert_eq!(sanitize_local_name("1) Super Mario"), "Super Mario");
        assert_eq!(sanitize_local_name("12)Tetris"), "Tetris");
        // Ordinal must be leading; elsewhere it stays.
        assert_eq!(sanitize_local_name("Area 51) intro"), "Area 51) intro");
    }

    #[test]
    fn test_strip_annotations() {
        assert_eq!(
            strip_annotations("Super Mario World (USA) [Rev 1]"),
            "Super Mario World"
        );
        assert_eq!(strip_annotations("No tags here"), "No tags here");
        assert_eq!(
            strip_annotations("Mid (Japan) Word"),
            "Mid  Word" // interior gap stays, only edges are trimmed
        );
    }

    #[test]
    fn test_strip_dx() {
        assert_eq!(strip_dx("Super Mario Land 2 DX"), "Super Mario Land 2");
        assert_eq!(strip_dx("No token"), "No token");
    }

    #[test]
    fn test_strip_subtitle() {
        assert_eq!(
            strip_subtitle("Castlevania - Symphony of the Night"),
            "Castlevania"
        );
        assert_eq!(strip_subtitle("Plain"), "Plain");
    }
}
