// src/crawl/validate.rs
// =============================================================================
// Decides which strings are crawlable URLs and puts them in canonical form.
//
// A candidate is crawlable when it parses as an absolute URL that has both a
// scheme and a non-empty host. Anything that fails to parse is simply "not
// crawlable" - never an error.
//
// Normalizing matters because the visited tracker compares plain strings:
// "https://example.com" and "https://example.com/" must be the same key.
// =============================================================================

use url::Url;

// Returns true if `candidate` is an absolute URL with a scheme and a host
//
// Examples:
//   "https://example.com/docs" -> true
//   "mailto:someone@example.com" -> false (no host)
//   "/relative/path" -> false (does not parse on its own)
pub fn is_crawlable(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => has_scheme_and_host(&url),
        Err(_) => false,
    }
}

// Parses `candidate` and returns its canonical serialization if crawlable
//
// Parameters:
//   candidate: the string to check
//   strip_fragment: drop "#section" so anchors on one page share a key
pub fn normalize(candidate: &str, strip_fragment: bool) -> Option<String> {
    let mut url = Url::parse(candidate).ok()?;
    if !has_scheme_and_host(&url) {
        return None;
    }
    if strip_fragment {
        url.set_fragment(None);
    }
    Some(url.to_string())
}

fn has_scheme_and_host(url: &Url) -> bool {
    !url.scheme().is_empty() && url.host_str().is_some_and(|host| !host.is_empty())
}
