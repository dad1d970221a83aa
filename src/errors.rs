use crate::types::Rcode;
use std::io;
use thiserror::Error;

/// Errors returned while looking up or resolving a dnslink.
#[derive(Debug, Error)]
pub enum Error {
    /// The domain has no TXT records, or none of them start with `dnslink=`.
    #[error("no dnslink record found for {0}")]
    NoLinkRecord(String),

    /// A `dnslink=` entry whose value is not a valid link path.
    #[error("invalid dnslink entry '{0}'")]
    InvalidLink(String),

    /// A redirect link path without an embedded domain.
    #[error("invalid dnslink domain in '{0}'")]
    InvalidLinkDomain(String),

    /// The hop budget ran out while a redirect chain was still unresolved.
    ///
    /// `path` is the deepest partially resolved path, still pointing at the
    /// domain that would have been resolved next.
    #[error("dnslink resolution exceeded the depth limit at {path}")]
    DepthLimitExceeded { path: String },

    /// The DNS server answered with a failure response code.
    #[error("query for {domain} failed with rcode: {rcode}")]
    Rcode { domain: String, rcode: Rcode },

    #[error(transparent)]
    Io(#[from] io::Error),

    /// Opaque error from a caller supplied lookup.
    #[error("{0}")]
    Lookup(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Returns the partially resolved path carried by a
    /// [`Error::DepthLimitExceeded`], if this is one.
    pub fn partial_path(&self) -> Option<&str> {
        match self {
            Error::DepthLimitExceeded { path } => Some(path),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Returns early with a [`std::io::Error`] of the given kind.
#[macro_export]
#[doc(hidden)]
macro_rules! bail {
    ($kind:ident, $($arg:tt)*) => {{
        return Err(std::io::Error::new(
            std::io::ErrorKind::$kind,
            format!($($arg)*),
        ).into())
    }}
}
