//! Text cleanup and token filtering for raw fragments pulled out of a page.

/// Normalize a raw text fragment.
///
/// Line breaks, tabs, carriage returns and hyphens become a single space
/// and possessive `'s` suffixes are dropped, then everything that is not
/// alphanumeric or whitespace is stripped. With `trim` set, leading and
/// trailing whitespace is removed after the replacements. Empty input
/// yields an empty string.
pub fn clean(raw: &str, trim: bool) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut replaced = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\n' | '\t' | '\r' | '-' => replaced.push(' '),
            _ => replaced.push(ch),
        }
    }
    let replaced = replaced.replace("'s", "");

    let candidate = if trim {
        replaced.trim()
    } else {
        replaced.as_str()
    };

    candidate
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Split `value` into non-empty tokens on `separator`, preserving order.
///
/// An empty separator yields the whole input as a single token.
pub fn tokenize(value: &str, separator: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    if separator.is_empty() {
        return vec![value.to_string()];
    }

    value
        .split(separator)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// A token counts as a word when it is non-empty and every character is
/// alphabetic. Single-letter tokens such as "a" or "I" are words.
pub fn is_valid_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}
