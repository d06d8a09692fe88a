use std::collections::BTreeMap;

/// Splits a URL at its first `?` into the bare endpoint and the raw query.
pub fn url_to_endpoint_and_query(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((endpoint, query)) => (endpoint, Some(query)),
        None => (url, None),
    }
}

/// Parses a url-style query string into a map.
///
/// Each pair is split once at the first `=`; a pair without `=` maps to an
/// empty value. Keys and values are kept as they appear on the wire, no
/// decoding happens here. A repeated key keeps its last value.
pub fn query_to_map(query: &str) -> BTreeMap<&str, &str> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|s| s.split_once('=').unwrap_or((s, "")))
        .collect()
}
