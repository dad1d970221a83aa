//! Network clients for fetching TXT records from DNS servers.

use crate::Message;
use std::io;

pub use self::lookup::DnsLookup;

mod lookup;

cfg_feature! {
    #![feature = "tcp"]

    pub use self::tcp::TcpClient;

    mod tcp;
}

cfg_feature! {
    #![feature = "udp"]

    pub use self::udp::UdpClient;

    pub mod udp;
}

/// Exchanger takes a query and returns a response.
pub trait Exchanger {
    fn exchange(&self, query: &Message) -> io::Result<Message>;
}

/// Checks `response` answers `query`, as opposed to some stray packet.
pub(crate) fn check_response(query: &Message, response: &Message) -> io::Result<()> {
    if response.id != query.id {
        crate::bail!(
            InvalidData,
            "response id {} does not match query id {}",
            response.id,
            query.id
        );
    }

    if !response.qr {
        crate::bail!(InvalidData, "received a query instead of a response");
    }

    Ok(())
}
