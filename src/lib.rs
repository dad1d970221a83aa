//! Resolves domains into paths by following [dnslink] TXT records.
//!
//! A dnslink is a TXT record of the form `dnslink=/ipfs/<cid>`. Its value is
//! either a terminal path, returned as is, or a redirect of the form
//! `/dnslink/<domain>/<rest>`, in which case `<domain>` is resolved and
//! `<rest>` appended to the result.
//!
//! ```rust,no_run
//! fn main() -> Result<(), dnslink::Error> {
//!     let path = dnslink::resolve("_dnslink.ipfs.io")?;
//!     println!("{}", path);
//!     Ok(())
//! }
//! ```
//!
//! The TXT lookup is pluggable, see [`LookupTxt`].
//!
//! [dnslink]: https://dnslink.io
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod cfg;

mod entry;
mod errors;
mod io;
mod link;
mod lookup;
mod message;
mod resolver;
pub mod clients;
pub mod types;

#[macro_use]
extern crate num_derive;

#[doc(inline)]
pub use crate::entry::{parse_entry, ENTRY_PREFIX};
#[doc(inline)]
pub use crate::errors::{Error, Result};
#[doc(inline)]
pub use crate::link::{is_redirect, parse_link_domain, redirect_path, REDIRECT_MARKER};
#[doc(inline)]
pub use crate::lookup::{LookupTxt, StaticLookup, UnderscoreLookup, UNDERSCORE_PREFIX};
#[doc(inline)]
pub use crate::message::{Message, Question, Record, Resource};
#[doc(inline)]
pub use crate::resolver::{Resolver, DEFAULT_DEPTH_LIMIT};

cfg_feature! {
    #![feature = "udp"]

    pub use crate::resolver::resolve;
}
