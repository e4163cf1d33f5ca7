/// Builds a URL slug from a display name.
///
/// Lowercases ASCII letters, keeps digits, and collapses every other run of
/// characters into a single `-`. Leading and trailing separators are dropped.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Treats blank strings as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Converts an optional update field into a column patch.
///
/// `None` leaves the column untouched, a blank string clears it to NULL, and any
/// other string replaces it.
pub fn patch_text(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| non_empty(Some(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Science Fiction"), "science-fiction");
        assert_eq!(slugify("  Sci-Fi & Fantasy!! "), "sci-fi-fantasy");
        assert_eq!(slugify("Books 2024"), "books-2024");
    }

    #[test]
    fn blank_strings_become_null() {
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(Some(" x ".to_string())), Some("x".to_string()));
        assert_eq!(patch_text(None), None);
        assert_eq!(patch_text(Some(String::new())), Some(None));
        assert_eq!(
            patch_text(Some("isbn".to_string())),
            Some(Some("isbn".to_string()))
        );
    }
}
