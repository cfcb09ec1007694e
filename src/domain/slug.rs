//! Slug derivation and collision avoidance for category URLs.

/// Appended to a candidate slug while it collides with another row.
pub const SLUG_COLLISION_SUFFIX: &str = "-1";

/// Used when a name contains nothing that survives [`slugify`].
pub const FALLBACK_SLUG: &str = "category";

/// Lowercase `input`, keep alphanumerics and join words with `-`.
///
/// Whitespace, hyphens and underscores act as separators and collapse into a
/// single hyphen; every other character is dropped.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for ch in input.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_separator = true;
        }
    }

    slug
}

/// Derive the slug for `name`, falling back to [`FALLBACK_SLUG`] when empty.
pub fn base_slug(name: &str) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Append [`SLUG_COLLISION_SUFFIX`] to `base` until `is_taken` reports a free
/// candidate.
///
/// `is_taken` must only report slugs held by *other* rows so that renaming a
/// record to its current name keeps its slug.
pub fn unique_slug<E, F>(base: &str, mut is_taken: F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<bool, E>,
{
    let mut candidate = base.to_string();
    while is_taken(&candidate)? {
        candidate.push_str(SLUG_COLLISION_SUFFIX);
    }
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::convert::Infallible;

    use super::*;

    #[test]
    fn slugify_normalizes_names() {
        assert_eq!(slugify("Fresh Produce"), "fresh-produce");
        assert_eq!(slugify("  Hot -- Drinks_2 "), "hot-drinks-2");
        assert_eq!(slugify("Tea & Coffee!"), "tea-coffee");
    }

    #[test]
    fn slugify_keeps_unicode_letters() {
        assert_eq!(slugify("Горячие напитки"), "горячие-напитки");
    }

    #[test]
    fn base_slug_falls_back_for_symbols() {
        assert_eq!(base_slug("!!!"), FALLBACK_SLUG);
    }

    #[test]
    fn unique_slug_appends_suffix_until_free() {
        let taken: HashSet<&str> = ["drinks", "drinks-1"].into_iter().collect();

        let slug = unique_slug::<Infallible, _>("drinks", |candidate| Ok(taken.contains(candidate)));

        assert_eq!(slug, Ok("drinks-1-1".to_string()));
    }

    #[test]
    fn unique_slug_returns_base_when_free() {
        let slug = unique_slug::<Infallible, _>("snacks", |_| Ok(false));

        assert_eq!(slug, Ok("snacks".to_string()));
    }

    #[test]
    fn unique_slug_propagates_lookup_errors() {
        let result = unique_slug("snacks", |_| Err("lookup failed"));

        assert_eq!(result, Err("lookup failed"));
    }
}
