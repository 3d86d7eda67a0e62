/// Extract the routed path from a hash location such as `#/skills?tab=1`.
///
/// The leading `#` is optional, query strings and nested fragments are
/// dropped, and a missing leading slash is added. An empty hash yields the
/// empty path, which the header treats as Home.
pub fn location_from_hash(hash: &str) -> String {
    let raw = hash.strip_prefix('#').unwrap_or(hash);
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let path = raw[..end].trim();

    if path.is_empty() {
        return String::new();
    }
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_hash_and_query() {
        assert_eq!(location_from_hash("#/skills?tab=1"), "/skills");
        assert_eq!(location_from_hash("/contact"), "/contact");
        assert_eq!(location_from_hash("#projects"), "/projects");
    }

    #[test]
    fn empty_hash_is_untouched_path() {
        assert_eq!(location_from_hash(""), "");
        assert_eq!(location_from_hash("#"), "");
        assert_eq!(location_from_hash("#?x=1"), "");
    }
}
