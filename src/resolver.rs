use crate::entry::parse_entry;
use crate::errors::{Error, Result};
use crate::link::{is_redirect, parse_link_domain, redirect_path};
use crate::lookup::LookupTxt;
use log::{debug, trace};

/// The number of redirects [`Resolver::resolve`] will follow.
///
/// Even, so a two domain loop stops on a link back to the first domain.
pub const DEFAULT_DEPTH_LIMIT: usize = 16;

/// Resolves domains into paths by following their dnslink TXT records.
///
/// # Example
///
/// ```rust
/// use dnslink::{Resolver, StaticLookup};
///
/// let lookup: StaticLookup = vec![
///     ("blog.example.com", vec!["dnslink=/dnslink/example.com/blog"]),
///     ("example.com", vec!["dnslink=/ipfs/QmY3hE8xgFCjGcz6PHgnvJz5HZi1BaKRfPkn1ghZUcYMjD"]),
/// ]
/// .into_iter()
/// .collect();
///
/// let resolver = Resolver::with_lookup(lookup);
/// assert_eq!(
///     resolver.resolve("blog.example.com").unwrap(),
///     "/ipfs/QmY3hE8xgFCjGcz6PHgnvJz5HZi1BaKRfPkn1ghZUcYMjD/blog"
/// );
/// ```
///
/// A `Resolver` holds no state besides its lookup, so it can be shared
/// between threads whenever the lookup can.
pub struct Resolver<L> {
    lookup: L,
}

impl<L: LookupTxt> Resolver<L> {
    /// Creates a Resolver that fetches TXT records with `lookup`.
    pub fn with_lookup(lookup: L) -> Resolver<L> {
        Resolver { lookup }
    }

    /// Returns the lookup used to fetch TXT records.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Resolves `domain`, following at most [`DEFAULT_DEPTH_LIMIT`] redirects.
    pub fn resolve(&self, domain: &str) -> Result<String> {
        self.resolve_n(domain, DEFAULT_DEPTH_LIMIT)
    }

    /// Resolves `domain`, following at most `depth` redirects.
    ///
    /// When the budget runs out mid-chain [`Error::DepthLimitExceeded`] is
    /// returned, carrying the path resolved so far. With a `depth` of zero
    /// no lookup is made and that path is `/dnslink/<domain>`.
    ///
    /// There is no loop detection, a cycle of redirects simply runs out of
    /// budget.
    pub fn resolve_n(&self, domain: &str, depth: usize) -> Result<String> {
        let mut domain = domain.to_string();

        // Remainders of each redirect followed, outermost first.
        let mut remainders = Vec::new();

        for hops_left in (0..depth).rev() {
            let records = self.lookup.lookup_txt(&domain)?;
            let path = select_link(&domain, &records)?;

            if !is_redirect(path) {
                debug!("{}: resolved to {}", domain, path);
                return Ok(append_remainders(path, &remainders));
            }

            let (next, remainder) = parse_link_domain(path)?;
            debug!("{}: redirect to {} ({} hops left)", domain, next, hops_left);

            remainders.push(remainder.to_string());
            domain = next.to_string();
        }

        Err(Error::DepthLimitExceeded {
            path: append_remainders(&redirect_path(&domain), &remainders),
        })
    }
}

/// Appends the remainders to `prefix`, innermost redirect first.
fn append_remainders(prefix: &str, remainders: &[String]) -> String {
    let mut path = prefix.to_string();
    for remainder in remainders.iter().rev() {
        path.push_str(remainder);
    }
    path
}

/// Returns the first dnslink entry in `records`.
fn select_link<'a>(domain: &str, records: &'a [String]) -> Result<&'a str> {
    for record in records {
        match parse_entry(record) {
            Some(result) => return result,
            None => trace!("{}: skipping TXT record {:?}", domain, record),
        }
    }

    Err(Error::NoLinkRecord(domain.to_string()))
}

cfg_feature! {
    #![feature = "udp"]

    use crate::clients::{DnsLookup, UdpClient};

    impl Resolver<DnsLookup<UdpClient>> {
        /// Creates a new Resolver that queries the default DNS servers over UDP.
        pub fn new() -> Result<Resolver<DnsLookup<UdpClient>>> {
            Ok(Resolver::with_lookup(DnsLookup::new(UdpClient::default_servers()?)))
        }
    }

    /// Resolves `domain` using the default DNS servers.
    ///
    /// Shorthand for [`Resolver::new`] followed by [`Resolver::resolve`].
    pub fn resolve(domain: &str) -> Result<String> {
        Resolver::new()?.resolve(domain)
    }
}
