use regex::Regex;
use std::sync::LazyLock;

static METACHARACTERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[;'"\\]"#).unwrap());

/// Strip the query-injection metacharacters `;` `'` `"` `\` from free
/// text. Best-effort input normalization; the store's own
/// parameterization is the security boundary.
pub fn scrub(raw: &str) -> String {
    METACHARACTERS.replace_all(raw, "").into_owned()
}

/// Cap a string for display in notices and error messages.
pub fn clip(raw: &str, max: usize) -> String {
    if raw.chars().count() <= max {
        raw.to_string()
    } else {
        let kept: String = raw.chars().take(max).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrub_strips_metacharacters() {
        assert_eq!(scrub(r#"Robert'); DROP TABLE projects;--"#), "Robert) DROP TABLE projects--");
        assert_eq!(scrub(r#"say "hi" \ bye"#), "say hi  bye");
    }

    #[test]
    fn test_scrub_leaves_clean_text_alone() {
        assert_eq!(scrub("Quarterly report, phase 2"), "Quarterly report, phase 2");
        assert_eq!(scrub(""), "");
    }

    #[test]
    fn test_clip_caps_long_strings() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("abcdefgh", 4), "abcd...");
    }
}
