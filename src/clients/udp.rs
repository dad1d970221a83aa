use crate::bail;
use crate::clients::{check_response, Exchanger};
use crate::Message;
use log::trace;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::net::ToSocketAddrs;
use std::net::UdpSocket;
use std::time::Duration;

pub const GOOGLE_IPV4_PRIMARY: &str = "8.8.8.8:53";
pub const GOOGLE_IPV4_SECONDARY: &str = "8.8.4.4:53";
pub const GOOGLE_IPV6_PRIMARY: &str = "[2001:4860:4860::8888]:53";
pub const GOOGLE_IPV6_SECONDARY: &str = "[2001:4860:4860::8844]:53";

pub const GOOGLE: [&str; 4] = [
    GOOGLE_IPV4_PRIMARY,
    GOOGLE_IPV4_SECONDARY,
    GOOGLE_IPV6_PRIMARY,
    GOOGLE_IPV6_SECONDARY,
];

/// A UDP DNS Client.
///
/// # Example
///
/// ```rust,no_run
/// use dnslink::clients::{Exchanger, UdpClient};
/// use dnslink::Message;
///
/// fn main() -> std::io::Result<()> {
///     let query = Message::txt_query("ipfs.io");
///     let response = UdpClient::new("8.8.8.8:53")?.exchange(&query)?;
///
///     for answer in response.answers {
///         println!("{:?}", answer.resource.txt());
///     }
///     Ok(())
/// }
/// ```
///
/// See <https://datatracker.ietf.org/doc/html/rfc1035#section-4.2.1>
pub struct UdpClient {
    servers: Vec<SocketAddr>,

    read_timeout: Option<Duration>,
}

impl Default for UdpClient {
    fn default() -> Self {
        UdpClient {
            servers: Vec::default(),
            read_timeout: Some(Duration::new(5, 0)),
        }
    }
}

impl UdpClient {
    /// Creates a new UdpClient bound to the specific servers.
    ///
    /// Fails if the servers can't be resolved into addresses, or none are given.
    pub fn new<A: ToSocketAddrs>(servers: A) -> io::Result<Self> {
        let servers: Vec<SocketAddr> = servers.to_socket_addrs()?.collect();
        if servers.is_empty() {
            bail!(InvalidInput, "no DNS servers given");
        }

        Ok(Self {
            servers,

            ..Default::default()
        })
    }

    /// Creates a new UdpClient using Google's public DNS servers.
    pub fn default_servers() -> io::Result<Self> {
        let servers = GOOGLE
            .iter()
            .flat_map(|a| a.to_socket_addrs())
            .flatten()
            .collect::<Vec<SocketAddr>>();

        UdpClient::new(&servers[..])
    }

    /// Sets how long to wait for a response. `None` waits forever.
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn servers(&self) -> &[SocketAddr] {
        &self.servers
    }

    /// Sends the query to a single server and waits for its response.
    fn exchange_with(&self, server: &SocketAddr, req: &[u8]) -> io::Result<Message> {
        // Bind to the same address family as the server, an IPv4 socket can
        // not send to an IPv6 address.
        let local: SocketAddr = if server.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(local)?;
        socket.set_read_timeout(self.read_timeout)?;

        // Connect us to the server, meaning recv will only receive directly
        // from the server.
        socket.connect(server)?;

        trace!("sending {} byte query to {}", req.len(), server);
        socket.send(req)?;

        let mut buf = [0; crate::message::MAX_PAYLOAD_SIZE as usize];
        let len = socket.recv(&mut buf)?;
        let resp = Message::from_slice(&buf[0..len])?;
        trace!("received {} byte response with {} answers", len, resp.answers.len());

        Ok(resp)
    }
}

impl Exchanger for UdpClient {
    /// Sends the query [`Message`] to each server in turn via UDP, until one
    /// responds, and returns the result.
    ///
    /// A server that fails to respond within the read timeout is skipped.
    fn exchange(&self, query: &Message) -> io::Result<Message> {
        let req = query.to_vec()?;
        let mut last_err = None;

        for server in &self.servers {
            match self.exchange_with(server, &req) {
                Ok(resp) => {
                    check_response(query, &resp)?;

                    if resp.tc {
                        bail!(Other, "response was truncated, retry over TCP");
                    }

                    return Ok(resp);
                }
                Err(e) => {
                    trace!("no response from {}: {}", server, e);
                    last_err = Some(e)
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "no DNS servers given")
        }))
    }
}
