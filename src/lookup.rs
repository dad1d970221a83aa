use crate::entry::parse_entry;
use crate::errors::{Error, Result};
use log::trace;
use std::collections::HashMap;
use std::iter::FromIterator;

/// Fetches the TXT records of a domain.
///
/// This is the only capability a [`Resolver`](crate::Resolver) needs. The
/// records must be returned in the order they should be considered. A domain
/// with no records should return [`Error::NoLinkRecord`].
///
/// Any `Fn(&str) -> Result<Vec<String>>` is a `LookupTxt`:
///
/// ```rust
/// use dnslink::{Error, Resolver};
///
/// let resolver = Resolver::with_lookup(|name: &str| match name {
///     "example.com" => Ok(vec!["dnslink=/ipfs/Qm".to_string()]),
///     _ => Err(Error::NoLinkRecord(name.to_string())),
/// });
///
/// assert_eq!(resolver.resolve("example.com").unwrap(), "/ipfs/Qm");
/// ```
pub trait LookupTxt {
    fn lookup_txt(&self, name: &str) -> Result<Vec<String>>;
}

impl<F> LookupTxt for F
where
    F: Fn(&str) -> Result<Vec<String>>,
{
    fn lookup_txt(&self, name: &str) -> Result<Vec<String>> {
        self(name)
    }
}

/// A fixed table of TXT records, keyed by domain.
///
/// Useful for tests, and for resolving against records loaded from elsewhere.
#[derive(Clone, Debug, Default)]
pub struct StaticLookup {
    entries: HashMap<String, Vec<String>>,
}

impl StaticLookup {
    pub fn new() -> StaticLookup {
        StaticLookup::default()
    }

    /// Sets the TXT records for `domain`, replacing any previous ones.
    pub fn insert<S: Into<String>>(&mut self, domain: &str, records: Vec<S>) {
        self.entries.insert(
            domain.to_string(),
            records.into_iter().map(Into::into).collect(),
        );
    }
}

impl LookupTxt for StaticLookup {
    fn lookup_txt(&self, name: &str) -> Result<Vec<String>> {
        match self.entries.get(name) {
            Some(records) => Ok(records.clone()),
            None => Err(Error::NoLinkRecord(name.to_string())),
        }
    }
}

impl<'a, S: Into<String>> FromIterator<(&'a str, Vec<S>)> for StaticLookup {
    fn from_iter<I: IntoIterator<Item = (&'a str, Vec<S>)>>(iter: I) -> Self {
        let mut lookup = StaticLookup::new();
        for (domain, records) in iter {
            lookup.insert(domain, records);
        }
        lookup
    }
}

/// Prefix of the subdomain that conventionally holds a domain's dnslink.
pub const UNDERSCORE_PREFIX: &str = "_dnslink.";

/// Wraps a lookup so `_dnslink.<name>` is queried before `<name>`.
///
/// The subdomain's records are used when at least one of them is a dnslink
/// entry. Otherwise, including when the subdomain does not exist, the bare
/// name is looked up. Transport errors from the subdomain query are
/// returned as is.
pub struct UnderscoreLookup<L> {
    inner: L,
}

impl<L: LookupTxt> UnderscoreLookup<L> {
    pub fn new(inner: L) -> UnderscoreLookup<L> {
        UnderscoreLookup { inner }
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L: LookupTxt> LookupTxt for UnderscoreLookup<L> {
    fn lookup_txt(&self, name: &str) -> Result<Vec<String>> {
        // Don't stack prefixes on names that already carry one.
        if name.starts_with(UNDERSCORE_PREFIX) {
            return self.inner.lookup_txt(name);
        }

        let probe = format!("{}{}", UNDERSCORE_PREFIX, name);
        match self.inner.lookup_txt(&probe) {
            Ok(records) if records.iter().any(|r| parse_entry(r).is_some()) => {
                return Ok(records)
            }
            Ok(_) | Err(Error::NoLinkRecord(_)) => {
                trace!("{}: no dnslink entry, falling back to {}", probe, name)
            }
            Err(e) => return Err(e),
        }

        self.inner.lookup_txt(name)
    }
}
