//! Parsing of link paths, the values stored after `dnslink=`.

use crate::errors::{Error, Result};

/// First segment of a link path that redirects to another domain, as in
/// `/dnslink/example.com/some/path`.
pub const REDIRECT_MARKER: &str = "dnslink";

/// Returns true if the first segment of `path` is the [`REDIRECT_MARKER`].
pub fn is_redirect(path: &str) -> bool {
    let mut parts = path.splitn(3, '/');
    parts.next() == Some("") && parts.next() == Some(REDIRECT_MARKER)
}

/// Builds the redirect path pointing at `domain`, with no remainder.
pub fn redirect_path(domain: &str) -> String {
    format!("/{}/{}", REDIRECT_MARKER, domain)
}

/// Splits a redirect link path into the embedded domain and the remainder.
///
/// The remainder keeps its leading `/`, or is empty when the path stops
/// at the domain. The domain is not validated beyond being non-empty, a bad
/// name surfaces when it is looked up.
///
/// ```rust
/// let (domain, rest) = dnslink::parse_link_domain("/dnslink/example.com/a/b").unwrap();
/// assert_eq!(domain, "example.com");
/// assert_eq!(rest, "/a/b");
/// ```
pub fn parse_link_domain(path: &str) -> Result<(&str, &str)> {
    let mut parts = path.splitn(3, '/');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(""), Some(REDIRECT_MARKER), Some(rest)) => {
            // The remainder starts at the separator after the domain.
            let (domain, remainder) = match rest.find('/') {
                Some(i) => rest.split_at(i),
                None => (rest, ""),
            };

            if domain.is_empty() {
                return Err(Error::InvalidLinkDomain(path.to_string()));
            }

            Ok((domain, remainder))
        }
        _ => Err(Error::InvalidLinkDomain(path.to_string())),
    }
}
