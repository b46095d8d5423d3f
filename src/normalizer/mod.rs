//! URL canonicalization.
//!
//! Every URL the harvester compares or navigates to passes through
//! [`normalize`] first, so "same page" checks reduce to string equality.

use url::Url;

/// Canonicalize a raw URL string.
///
/// - Adds `https://` when no `http(s)` scheme is present.
/// - Lowercases the host (the `url` crate does this during parsing).
/// - Drops query and fragment.
/// - Drops any `user:password@` prefix; the result is `scheme://host[:port]path`.
///
/// Returns an empty string when the input has no usable authority. Each step
/// is noted in `trace`.
pub fn normalize(raw: &str, trace: &mut Vec<String>) -> String {
    trace.push(format!("Normalizing URL: {}", raw));

    let raw = raw.trim();
    let with_scheme = if has_http_scheme(raw) {
        raw.to_string()
    } else {
        let prefixed = format!("https://{}", raw);
        trace.push(format!("Added HTTPS scheme: {}", prefixed));
        prefixed
    };

    let parsed = match Url::parse(&with_scheme) {
        Ok(u) => u,
        Err(e) => {
            trace.push(format!("Invalid URL ({}): {}", e, with_scheme));
            return String::new();
        }
    };

    let Some(authority) = authority(&parsed) else {
        trace.push(format!("Invalid URL (no host): {}", with_scheme));
        return String::new();
    };

    let path = if has_explicit_path(&with_scheme) {
        parsed.path()
    } else {
        ""
    };

    let cleaned = format!("{}://{}{}", parsed.scheme(), authority, path);
    trace.push(format!("Cleaned URL (removed fragment/query): {}", cleaned));
    cleaned
}

/// `host[:port]` of a parsed URL, or `None` when it has no host.
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Authority of a URL string, `None` if it does not parse.
pub fn authority_of(url: &str) -> Option<String> {
    Url::parse(url).ok().as_ref().and_then(authority)
}

/// Path of a URL string, empty if it does not parse.
pub fn path_of(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_default()
}

/// Resolve a possibly relative `href` against the page it was found on.
pub fn resolve_href(base: &str, href: &str) -> String {
    let href = href.trim();
    if has_http_scheme(href) {
        return href.to_string();
    }
    match Url::parse(base).and_then(|b| b.join(href)) {
        Ok(joined) if joined.scheme().starts_with("http") => joined.to_string(),
        _ => href.to_string(),
    }
}

fn has_http_scheme(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Whether anything follows the authority before `?` or `#`.
fn has_explicit_path(url_with_scheme: &str) -> bool {
    let rest = url_with_scheme
        .split_once("://")
        .map(|(_, r)| r)
        .unwrap_or(url_with_scheme);
    let before_query = rest.split(['?', '#']).next().unwrap_or("");
    before_query.contains('/')
}
