//! Page number query-string sync
//!
//! The browsing shell mirrors the current page into a 1-based `page` query
//! parameter. These helpers convert between that parameter and the 0-based
//! page index used everywhere else.

use url::Url;

/// Default name of the page query parameter.
pub const PAGE_PARAM: &str = "page";

/// Reads the 0-based page index from the `page` parameter of `url`.
///
/// A missing or non-numeric parameter means the first page; values below 1
/// clamp to the first page.
///
/// # Example
///
/// ```
/// use url::Url;
/// use gallery_lib::query::page_index_from_url;
///
/// let url = Url::parse("https://example.org/browse?page=4").unwrap();
/// assert_eq!(page_index_from_url(&url), 3);
///
/// let url = Url::parse("https://example.org/browse").unwrap();
/// assert_eq!(page_index_from_url(&url), 0);
/// ```
pub fn page_index_from_url(url: &Url) -> usize {
    page_index_from_param(url, PAGE_PARAM)
}

/// Like [`page_index_from_url`] with a custom parameter name.
pub fn page_index_from_param(url: &Url, param: &str) -> usize {
    url.query_pairs()
        .find(|(key, _)| key == param)
        .and_then(|(_, value)| parse_int_prefix(&value))
        .and_then(|number| usize::try_from(number.max(1) - 1).ok())
        .unwrap_or(0)
}

/// Writes `page_index` into `url` as the 1-based `page` parameter.
///
/// Other parameters keep their values and positions.
pub fn set_page_index(url: &mut Url, page_index: usize) {
    set_page_param(url, PAGE_PARAM, page_index);
}

/// Like [`set_page_index`] with a custom parameter name.
pub fn set_page_param(url: &mut Url, param: &str, page_index: usize) {
    let number = page_index.saturating_add(1).to_string();
    let mut replaced = false;

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter_map(|(key, value)| {
            if key != param {
                return Some((key.into_owned(), value.into_owned()));
            }
            if replaced {
                // Drop duplicates of the page parameter.
                return None;
            }
            replaced = true;
            Some((key.into_owned(), number.clone()))
        })
        .collect();

    let mut query = url.query_pairs_mut();
    query.clear().extend_pairs(pairs);
    if !replaced {
        query.append_pair(param, &number);
    }
}

/// Parses a leading integer: optional whitespace, optional sign, digits.
///
/// Trailing characters are ignored. Returns `None` if there are no digits.
/// Out-of-range values saturate.
pub(crate) fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: Vec<i64> = digits
        .chars()
        .map_while(|c| c.to_digit(10).map(i64::from))
        .collect();
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits
        .into_iter()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(d));

    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("42"), Some(42));
        assert_eq!(parse_int_prefix("  7 items"), Some(7));
        assert_eq!(parse_int_prefix("-3"), Some(-3));
        assert_eq!(parse_int_prefix("+5"), Some(5));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn test_page_index_from_url() {
        assert_eq!(page_index_from_url(&url("http://x/?page=1")), 0);
        assert_eq!(page_index_from_url(&url("http://x/?q=a&page=12")), 11);
        assert_eq!(page_index_from_url(&url("http://x/?page=0")), 0);
        assert_eq!(page_index_from_url(&url("http://x/?page=-4")), 0);
        assert_eq!(page_index_from_url(&url("http://x/?page=abc")), 0);
        assert_eq!(page_index_from_url(&url("http://x/?p=9")), 0);
    }

    #[test]
    fn test_set_page_index_replaces_in_place() {
        let mut u = url("http://x/browse?sort=title&page=2&view=grid");
        set_page_index(&mut u, 6);
        assert_eq!(u.as_str(), "http://x/browse?sort=title&page=7&view=grid");
    }

    #[test]
    fn test_set_page_index_appends() {
        let mut u = url("http://x/browse");
        set_page_index(&mut u, 0);
        assert_eq!(u.as_str(), "http://x/browse?page=1");

        let mut u = url("http://x/browse?page=1&page=3");
        set_page_index(&mut u, 1);
        assert_eq!(u.as_str(), "http://x/browse?page=2");
    }

    #[test]
    fn test_custom_param_round_trip() {
        let mut u = url("http://x/");
        set_page_param(&mut u, "p", 4);
        assert_eq!(page_index_from_param(&u, "p"), 4);
    }
}
