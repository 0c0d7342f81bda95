//! `Link` header pagination.

use reqwest::header::{HeaderMap, LINK};

/// Extract the `rel="next"` target from a `Link` header, if any.
///
/// GitHub sends links as
/// `<https://api.github.com/...&page=2>; rel="next", <...>; rel="last"`.
pub fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(LINK)?.to_str().ok()?;
    parse_next(value)
}

fn parse_next(value: &str) -> Option<String> {
    value.split(',').find_map(|part| {
        let mut segments = part.split(';').map(str::trim);
        let target = segments.next()?;
        let is_next = segments.any(|param| {
            param
                .strip_prefix("rel=")
                .map(|rel| rel.trim_matches('"').split_whitespace().any(|r| r == "next"))
                .unwrap_or(false)
        });

        if !is_next {
            return None;
        }

        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
