/// Iterate the `name=value` pairs of one `Cookie` header.
///
/// Names and values are trimmed and a value wrapped in double quotes is
/// unquoted. Empty segments and segments without `=` are skipped.
pub fn cookie_pairs<'a>(cookie_header: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    cookie_header.split(';').filter_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        let k = k.trim();
        if k.is_empty() {
            return None;
        }
        Some((k, unquote(v.trim())))
    })
}

/// Raw (still encoded) value of the first cookie named exactly `name`.
pub fn get_cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    if name.is_empty() {
        return None;
    }
    cookie_pairs(cookie_header)
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}

fn unquote(v: &str) -> &str {
    v.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_value_among_pairs() {
        let h = "foo=1; bar=2;baz=3";
        assert_eq!(get_cookie_value(h, "foo"), Some("1"));
        assert_eq!(get_cookie_value(h, "bar"), Some("2"));
        assert_eq!(get_cookie_value(h, "baz"), Some("3"));
    }

    #[test]
    fn strips_quotes_and_trailing_separator() {
        let h = r#"myStuff="eyJteSI6MX0=";"#;
        assert_eq!(get_cookie_value(h, "myStuff"), Some("eyJteSI6MX0="));
    }

    #[test]
    fn keeps_padding_inside_value() {
        assert_eq!(get_cookie_value("a=YWI=", "a"), Some("YWI="));
    }

    #[test]
    fn lone_quote_is_left_alone() {
        assert_eq!(get_cookie_value("a=\"", "a"), Some("\""));
    }

    #[test]
    fn name_match_is_exact() {
        let h = "MyStuff=1; myStuffExtra=2";
        assert_eq!(get_cookie_value(h, "myStuff"), None);
        assert_eq!(get_cookie_value(h, "MyStuff"), Some("1"));
    }

    #[test]
    fn first_duplicate_wins() {
        assert_eq!(get_cookie_value("a=first; a=second", "a"), Some("first"));
    }

    #[test]
    fn empty_name_never_matches() {
        assert_eq!(get_cookie_value("=orphan; a=1", ""), None);
    }

    #[test]
    fn skips_malformed_segments() {
        let pairs: Vec<_> = cookie_pairs(" ; flag; =x; a = 1 ;").collect();
        assert_eq!(pairs, vec![("a", "1")]);
    }
}
