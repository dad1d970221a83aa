use crate::errors::{Error, Result};
use crate::link::{is_redirect, parse_link_domain};

/// The key every dnslink TXT entry starts with.
pub const ENTRY_PREFIX: &str = "dnslink=";

/// Parses one TXT record's text into a link path.
///
/// Returns `None` if the text is not a dnslink entry at all, that is it does
/// not start with exactly `dnslink=`. Such entries should be skipped.
/// Returns `Some(Err(Error::InvalidLink))` if it is a dnslink entry but the
/// value is not a valid link path.
///
/// ```rust
/// use dnslink::parse_entry;
///
/// assert_eq!(parse_entry("dnslink=/ipfs/Qm").unwrap().unwrap(), "/ipfs/Qm");
/// assert!(parse_entry("v=spf1 -all").is_none());
/// assert!(parse_entry("dnslink=").unwrap().is_err());
/// ```
pub fn parse_entry(text: &str) -> Option<Result<&str>> {
    let path = text.strip_prefix(ENTRY_PREFIX)?;

    if !path.starts_with('/') {
        return Some(Err(Error::InvalidLink(text.to_string())));
    }

    if is_redirect(path) && parse_link_domain(path).is_err() {
        return Some(Err(Error::InvalidLink(text.to_string())));
    }

    Some(Ok(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_entry() {
        let tests = vec![
            ("dnslink=/dnslink/foo.com", "/dnslink/foo.com"),
            ("dnslink=/dnslink/foo.com/bar/baz", "/dnslink/foo.com/bar/baz"),
            (
                "dnslink=/ipfs/QmY3hE8xgFCjGcz6PHgnvJz5HZi1BaKRfPkn1ghZUcYMjD",
                "/ipfs/QmY3hE8xgFCjGcz6PHgnvJz5HZi1BaKRfPkn1ghZUcYMjD",
            ),
            (
                "dnslink=/ipns/QmY3hE8xgFCjGcz6PHgnvJz5HZi1BaKRfPkn1ghZUcYMjD/bar",
                "/ipns/QmY3hE8xgFCjGcz6PHgnvJz5HZi1BaKRfPkn1ghZUcYMjD/bar",
            ),
            (
                "dnslink=/ipfs/QmY3hE8xgFCjGcz6PHgnvJz5HZi1BaKRfPkn1ghZUcYMjD/foo/bar/baz",
                "/ipfs/QmY3hE8xgFCjGcz6PHgnvJz5HZi1BaKRfPkn1ghZUcYMjD/foo/bar/baz",
            ),
            (
                "dnslink=/QmY3hE8xgFCjGcz6PHgnvJz5HZi1BaKRfPkn1ghZUcYMjD/foo",
                "/QmY3hE8xgFCjGcz6PHgnvJz5HZi1BaKRfPkn1ghZUcYMjD/foo",
            ),
            ("dnslink=/ipfs/Qm/=equals", "/ipfs/Qm/=equals"),
            ("dnslink=/", "/"),
        ];

        for (text, want) in tests {
            let got = match parse_entry(text) {
                Some(Ok(path)) => path,
                other => panic!("{:?} expected to parse, got {:?}", text, other),
            };
            assert_eq!(got, want, "when parsing {:?}", text);
        }
    }

    #[test]
    fn test_parse_entry_not_a_link() {
        let tests = vec![
            "",
            "/dnslink/foo.com",
            "/dnslink/foo.com/bar/baz",
            "foo.com",
            "QmY3hE8xgFCjGcz6PHgnvJz5HZi1BaKRfPkn1ghZUcYMjD",
            "quux=/ipfs/QmY3hE8xgFCjGcz6PHgnvJz5HZi1BaKRfPkn1ghZUcYMjD",
            "dnslink",
            "dnslin=/ipfs/Qm",
            "DNSLINK=/ipfs/Qm",
            " dnslink=/ipfs/Qm",
            "masked dnslink=/dnslink/example.invalid",
        ];

        for text in tests {
            assert!(
                parse_entry(text).is_none(),
                "{:?} should not be a dnslink entry",
                text
            );
        }
    }

    #[test]
    fn test_parse_entry_invalid() {
        let tests = vec![
            "dnslink=",
            "dnslink=ipns/QmY3hE8xgFCjGcz6PHgnvJz5HZi1BaKRfPkn1ghZUcYMjD/bar",
            "dnslink= /ipfs/Qm",
            "dnslink=/dnslink",
            "dnslink=/dnslink/",
            "dnslink=/dnslink//foo",
        ];

        for text in tests {
            match parse_entry(text) {
                Some(Err(Error::InvalidLink(t))) => assert_eq!(t, text),
                other => panic!("{:?} expected InvalidLink, got {:?}", text, other),
            }
        }
    }
}
