//! String utility functions.

use regex::Regex;
use std::sync::OnceLock;

/// Converts a string to a file-name-friendly slug.
///
/// Converts to lowercase, removes non-alphanumeric characters (except hyphens
/// and spaces), replaces spaces with hyphens, and collapses consecutive hyphens.
///
/// # Examples
///
/// ```
/// use formforge_core::utils::text::slugify;
///
/// assert_eq!(slugify("Customer Feedback!"), "customer-feedback");
/// assert_eq!(slugify("  Spaced  Out  "), "spaced-out");
/// ```
pub fn slugify(s: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    static MULTI_HYPHEN: OnceLock<Regex> = OnceLock::new();

    let non_alnum = NON_ALNUM.get_or_init(|| Regex::new(r"[^\w\s-]").unwrap());
    let multi_hyphen = MULTI_HYPHEN.get_or_init(|| Regex::new(r"[-\s]+").unwrap());

    let s = s.to_lowercase();
    let s = non_alnum.replace_all(&s, "");
    let s = multi_hyphen.replace_all(&s, "-");
    let s = s.trim_matches('-');
    s.to_string()
}

/// Escapes HTML special characters in a string.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their HTML entity equivalents.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Truncates a string to at most `n` characters, ending in "..." when cut.
///
/// # Examples
///
/// ```
/// use formforge_core::utils::text::truncate_chars;
///
/// assert_eq!(truncate_chars("Customer Feedback", 8), "Custo...");
/// assert_eq!(truncate_chars("Hi", 10), "Hi");
/// ```
pub fn truncate_chars(s: &str, n: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= n {
        return s.to_string();
    }
    if n <= 3 {
        return ".".repeat(n);
    }
    let mut result: String = chars[..n - 3].iter().collect();
    result.push_str("...");
    result
}
