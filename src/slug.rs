/// Turn a post file stem (or any title) into a `snake_case` slug.
///
/// Whitespace and hyphen runs become a single `_`, everything outside
/// `[a-z0-9_]` is dropped, repeated underscores collapse and leading or
/// trailing underscores are trimmed. Non-ASCII characters are dropped rather
/// than transliterated, so `"Café"` becomes `"caf"`.
pub fn generate_slug(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_sep = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() || c == '-' || c == '_' {
            pending_sep = true;
            continue;
        }
        if !(c.is_ascii_lowercase() || c.is_ascii_digit()) {
            continue;
        }
        if pending_sep && !slug.is_empty() {
            slug.push('_');
        }
        pending_sep = false;
        slug.push(c);
    }

    slug
}

/// Whether `candidate` is already in slug form.
pub fn is_slug(candidate: &str) -> bool {
    !candidate.is_empty() && generate_slug(candidate) == candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_to_slug() {
        assert_eq!(
            generate_slug("Building Offline-First Apps"),
            "building_offline_first_apps"
        );
        assert_eq!(generate_slug("Rust & WASM"), "rust_wasm");
        assert_eq!(generate_slug("  leading and trailing  "), "leading_and_trailing");
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert_eq!(generate_slug(""), "");
        assert_eq!(generate_slug("!!!"), "");
        assert_eq!(generate_slug("- _ -"), "");
    }

    #[test]
    fn test_collapses_separators() {
        assert_eq!(generate_slug("a  --  b"), "a_b");
        assert_eq!(generate_slug("a__b"), "a_b");
        assert_eq!(generate_slug("_a_"), "a");
        // dropped characters do not introduce separators
        assert_eq!(generate_slug("C++ Programming"), "c_programming");
        assert_eq!(generate_slug("node.js"), "nodejs");
    }

    #[test]
    fn test_non_ascii_is_dropped() {
        assert_eq!(generate_slug("Café Notes"), "caf_notes");
        assert_eq!(generate_slug("🚀 Launch Day"), "launch_day");
        assert_eq!(generate_slug("日本語"), "");
    }

    #[test]
    fn test_idempotent_on_output() {
        for input in [
            "Building Offline-First Apps",
            "My 2nd post!",
            "__weird--input__",
            "Ünïcödé and ascii",
        ] {
            let once = generate_slug(input);
            assert_eq!(generate_slug(&once), once);
        }
    }

    #[test]
    fn test_is_slug() {
        assert!(is_slug("building_offline_first_apps"));
        assert!(!is_slug(""));
        assert!(!is_slug("../etc/passwd"));
        assert!(!is_slug("Hello"));
    }
}
