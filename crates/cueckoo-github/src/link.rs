//! `Link` header parsing for paginated responses.

use reqwest::Url;

/// Extracts the `page` of the `rel="last"` entry from a `Link` header.
///
/// GitHub omits the header (or the `last` entry) when the current page is the
/// last one, so anything that cannot be read yields 0.
pub fn last_page_from_link(header: &str) -> u32 {
    header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let target = parts.next()?.trim();
            let url = target.strip_prefix('<')?.strip_suffix('>')?;
            let is_last = parts.any(|param| {
                param
                    .trim()
                    .strip_prefix("rel=")
                    .is_some_and(|rel| rel.trim_matches('"').split(' ').any(|r| r == "last"))
            });
            is_last.then_some(url)
        })
        .find_map(page_param)
        .unwrap_or(0)
}

fn page_param(url: &str) -> Option<u32> {
    let url = Url::parse(url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_github_style() {
        let header = r#"<https://api.github.com/repositories/1/compare/a...b?page=2>; rel="next", <https://api.github.com/repositories/1/compare/a...b?page=5>; rel="last""#;
        assert_eq!(last_page_from_link(header), 5);
    }

    #[test]
    fn test_last_page_on_last_page() {
        let header = r#"<https://api.github.com/x?page=1>; rel="prev", <https://api.github.com/x?page=1>; rel="first""#;
        assert_eq!(last_page_from_link(header), 0);
    }

    #[test]
    fn test_last_page_other_query_params() {
        let header = r#"<https://api.github.com/x?per_page=100&page=7>; rel="last""#;
        assert_eq!(last_page_from_link(header), 7);
    }

    #[test]
    fn test_last_page_empty() {
        assert_eq!(last_page_from_link(""), 0);
    }

    #[test]
    fn test_last_page_garbage() {
        assert_eq!(last_page_from_link("not a link header"), 0);
        assert_eq!(last_page_from_link(r#"<not a url>; rel="last""#), 0);
    }
}
