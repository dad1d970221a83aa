use crate::bail;
use crate::clients::{check_response, Exchanger};
use crate::Message;
use log::trace;
use std::io;
use std::io::Read;
use std::io::Write;
use std::net::SocketAddr;
use std::net::TcpStream;
use std::net::ToSocketAddrs;
use std::time::Duration;

/// A TCP DNS Client.
///
/// # Example
///
/// ```rust,no_run
/// use dnslink::clients::{DnsLookup, TcpClient};
/// use dnslink::Resolver;
///
/// fn main() -> Result<(), dnslink::Error> {
///     let resolver = Resolver::with_lookup(DnsLookup::new(TcpClient::new("8.8.8.8:53")?));
///     println!("{}", resolver.resolve("ipfs.io")?);
///     Ok(())
/// }
/// ```
///
/// See <https://datatracker.ietf.org/doc/html/rfc1035#section-4.2.2>
pub struct TcpClient {
    servers: Vec<SocketAddr>,

    connect_timeout: Duration,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
}

impl Default for TcpClient {
    fn default() -> Self {
        TcpClient {
            servers: Vec::default(),
            connect_timeout: Duration::new(5, 0),
            read_timeout: Some(Duration::new(5, 0)),
            write_timeout: Some(Duration::new(5, 0)),
        }
    }
}

impl TcpClient {
    /// Creates a new TcpClient bound to the specific servers.
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

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_write_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Connects to the first server that accepts a connection.
    fn connect(&self) -> io::Result<TcpStream> {
        let mut last_err = None;

        for server in &self.servers {
            match TcpStream::connect_timeout(server, self.connect_timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    trace!("failed to connect to {}: {}", server, e);
                    last_err = Some(e)
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "no DNS servers given")
        }))
    }
}

impl Exchanger for TcpClient {
    /// Sends the [`Message`] to the server via TCP and returns the result.
    fn exchange(&self, query: &Message) -> io::Result<Message> {
        let mut stream = self.connect()?;
        stream.set_nodelay(true)?; // We send discrete packets, so we can send as soon as possible.
        stream.set_read_timeout(self.read_timeout)?;
        stream.set_write_timeout(self.write_timeout)?;

        let message = query.to_vec()?;

        // Two byte length prefix followed by the message, in one write.
        let mut req = Vec::with_capacity(message.len() + 2);
        req.extend_from_slice(&(message.len() as u16).to_be_bytes());
        req.extend_from_slice(&message);
        trace!("sending {} byte query to {}", message.len(), stream.peer_addr()?);
        stream.write_all(&req)?;

        // Now receive a two byte length
        let buf = &mut [0; 2];
        stream.read_exact(buf)?;
        let len = u16::from_be_bytes(*buf);

        // and finally the message
        let mut buf = vec![0; len.into()];
        stream.read_exact(&mut buf)?;

        let resp = Message::from_slice(&buf)?;
        trace!("received {} byte response with {} answers", len, resp.answers.len());

        check_response(query, &resp)?;

        Ok(resp)
    }
}
