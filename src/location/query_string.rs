use url::form_urlencoded;

/// Look up `key` in an `application/x-www-form-urlencoded` query string.
///
/// A leading `?` is ignored. The first occurrence wins.
#[must_use]
pub fn get_param(search: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(strip(search).as_bytes())
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

/// Return `search` with `key` set to `value`, or removed when `value` is
/// `None` or empty. Other keys keep their relative order.
#[must_use]
pub fn set_param(search: &str, key: &str, value: Option<&str>) -> String {
    let value = value.filter(|value| !value.is_empty());
    let mut replaced = false;
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    for (name, existing) in form_urlencoded::parse(strip(search).as_bytes()) {
        if name != key {
            serializer.append_pair(&name, &existing);
            continue;
        }
        if let Some(value) = value
            && !replaced
        {
            serializer.append_pair(key, value);
        }
        replaced = true;
    }

    if !replaced && let Some(value) = value {
        serializer.append_pair(key, value);
    }

    serializer.finish()
}

fn strip(search: &str) -> &str {
    search.strip_prefix('?').unwrap_or(search)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_decoded_values() {
        assert_eq!(
            get_param("?q=octo+cat&expanded=octocat", "q").as_deref(),
            Some("octo cat")
        );
        assert_eq!(get_param("q=a%26b", "q").as_deref(), Some("a&b"));
        assert_eq!(get_param("", "q"), None);
        assert_eq!(get_param("expanded=x", "q"), None);
    }

    #[test]
    fn setting_preserves_other_keys() {
        assert_eq!(
            set_param("q=octo&expanded=a", "expanded", Some("b")),
            "q=octo&expanded=b"
        );
        assert_eq!(set_param("q=octo", "expanded", Some("a")), "q=octo&expanded=a");
    }

    #[test]
    fn empty_or_missing_values_remove_the_key() {
        assert_eq!(set_param("q=octo&expanded=a", "expanded", Some("")), "q=octo");
        assert_eq!(set_param("q=octo&expanded=a", "q", None), "expanded=a");
        assert_eq!(set_param("", "q", None), "");
    }

    #[test]
    fn duplicate_keys_collapse_into_one() {
        assert_eq!(set_param("q=a&q=b&x=1", "q", Some("c")), "q=c&x=1");
    }

    #[test]
    fn values_are_form_encoded() {
        assert_eq!(set_param("", "q", Some("octo cat&co")), "q=octo+cat%26co");
    }
}
