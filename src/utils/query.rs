//! Query-string forwarding onto redirect targets.

use std::collections::HashSet;
use url::{Url, form_urlencoded};

type Pairs = Vec<(String, String)>;

/// Merges the request's raw query string into `target`.
///
/// Parameters already on the target are kept in place. A request parameter
/// whose key also exists on the target takes that key's position and
/// replaces its values; all other request parameters are appended in order.
/// Fragments on the target survive. Relative targets are supported.
///
/// An empty or blank request query returns `target` unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(with_query("https://example.com", "utm=1"), "https://example.com/?utm=1");
/// assert_eq!(
///     with_query("https://example.com/p?a=1&b=2", "a=9&c=3"),
///     "https://example.com/p?a=9&b=2&c=3"
/// );
/// ```
pub fn with_query(target: &str, query: &str) -> String {
    let extra: Pairs = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();
    if extra.is_empty() {
        return target.to_string();
    }

    match Url::parse(target) {
        Ok(mut url) => {
            let merged = merge_query(url.query().unwrap_or(""), &extra);
            url.set_query(Some(&merged));
            url.to_string()
        }
        Err(_) => with_query_relative(target, &extra),
    }
}

fn with_query_relative(target: &str, extra: &[(String, String)]) -> String {
    let (rest, fragment) = match target.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (target, None),
    };
    let (path, existing) = match rest.split_once('?') {
        Some((path, query)) => (path, query),
        None => (rest, ""),
    };

    let query = merge_query(existing, extra);

    match fragment {
        Some(fragment) => format!("{path}?{query}#{fragment}"),
        None => format!("{path}?{query}"),
    }
}

/// Merges `extra` into the raw `existing` query text.
///
/// Segments of `existing` whose key is not in `extra` are copied byte for
/// byte; only the request pairs are serialized.
fn merge_query(existing: &str, extra: &[(String, String)]) -> String {
    let overridden: HashSet<&str> = extra.iter().map(|(k, _)| k.as_str()).collect();
    let mut emitted: HashSet<&str> = HashSet::new();
    let mut segments: Vec<String> = Vec::new();

    for segment in existing.split('&').filter(|s| !s.is_empty()) {
        let key = segment_key(segment);
        match overridden.get(key.as_str()) {
            None => segments.push(segment.to_string()),
            Some(&key) => {
                if emitted.insert(key) {
                    segments.push(encode(extra.iter().filter(|(k, _)| k == key)));
                }
            }
        }
    }

    let rest: Vec<&(String, String)> = extra
        .iter()
        .filter(|(k, _)| !emitted.contains(k.as_str()))
        .collect();
    if !rest.is_empty() {
        segments.push(encode(rest.into_iter()));
    }

    segments.join("&")
}

fn segment_key(segment: &str) -> String {
    let raw = segment.split_once('=').map_or(segment, |(key, _)| key);
    form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}

fn encode<'a>(pairs: impl Iterator<Item = &'a (String, String)>) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}
