/// Separator used when collapsing whitespace and punctuation.
const SEPARATOR: char = '_';

/// Normalize a user supplied base name into a lower-case slug.
///
/// Runs of whitespace and non-alphanumeric characters become a single `_`;
/// leading and trailing separators are dropped. Returns an empty string when
/// nothing alphanumeric is left (callers substitute a placeholder).
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for ch in raw.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn spaces_become_underscores() {
        assert_eq!(slugify("my Name File"), "my_name_file");
    }

    #[test]
    fn separators_collapse_and_trim() {
        assert_eq!(slugify("  --Hello,   World!--  "), "hello_world");
        assert_eq!(slugify("already_slugged"), "already_slugged");
        assert_eq!(slugify("a__b--c"), "a_b_c");
    }

    #[test]
    fn non_ascii_letters_are_kept() {
        assert_eq!(slugify("Año Nuevo"), "año_nuevo");
    }

    #[test]
    fn punctuation_only_is_empty() {
        assert_eq!(slugify("  ()!? "), "");
        assert_eq!(slugify(""), "");
    }
}
