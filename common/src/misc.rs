/// Derives the URL slug a business is routed by from its display name.
/// Lowercases, keeps alphanumerics, collapses everything else into single
/// hyphens: "Acme Grooming" -> "acme-grooming".
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn slugifies_display_names() {
        assert_eq!(slugify("Acme Grooming"), "acme-grooming");
        assert_eq!(slugify("Paws & Claws, Ltd."), "paws-claws-ltd");
        assert_eq!(slugify("  Shaggy  Dog  "), "shaggy-dog");
    }

    #[test]
    fn empty_and_symbol_only_names_produce_empty_slugs() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
