use dnslink::clients::udp::GOOGLE;
use std::io;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

const DNS_PORT: u16 = 53;

/// Resolves the `@server` arguments into addresses, defaulting to port 53.
/// With no servers given, Google's public resolvers are used.
pub fn server_addrs(servers: &[String]) -> io::Result<Vec<SocketAddr>> {
    if servers.is_empty() {
        // Not every host can reach both address families, so skip failures.
        return Ok(GOOGLE
            .iter()
            .flat_map(|a| a.to_socket_addrs())
            .flatten()
            .collect());
    }

    let mut addrs = Vec::new();
    for server in servers {
        if let Ok(addr) = server.parse::<SocketAddr>() {
            addrs.push(addr);
        } else if let Ok(ip) = server.parse::<IpAddr>() {
            addrs.push(SocketAddr::new(ip, DNS_PORT));
        } else {
            addrs.extend((server.as_str(), DNS_PORT).to_socket_addrs()?);
        }
    }

    Ok(addrs)
}

pub fn join(addrs: &[SocketAddr]) -> String {
    addrs
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats one line of multi-domain output.
///
/// A partially resolved path is printed ahead of its error.
pub fn format_line(domain: &str, result: &dnslink::Result<String>) -> String {
    match result {
        Ok(path) => format!("{}: {}", domain, path),
        Err(e) => match e.partial_path() {
            Some(path) => format!("{}: {} error: {}", domain, path, e),
            None => format!("{}: error: {}", domain, e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnslink::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_line() {
        assert_eq!(
            format_line("ipfs.io", &Ok("/ipfs/Qm".to_string())),
            "ipfs.io: /ipfs/Qm"
        );
        assert_eq!(
            format_line("foo.bar", &Err(Error::NoLinkRecord("foo.bar".to_string()))),
            "foo.bar: error: no dnslink record found for foo.bar"
        );
        assert_eq!(
            format_line(
                "loop.com",
                &Err(Error::DepthLimitExceeded {
                    path: "/dnslink/loop.com".to_string()
                })
            ),
            "loop.com: /dnslink/loop.com error: dnslink resolution exceeded the depth limit at /dnslink/loop.com"
        );
    }

    #[test]
    fn test_server_addrs() {
        let servers = vec!["1.1.1.1".to_string(), "9.9.9.9:5353".to_string(), "::1".to_string()];
        assert_eq!(
            server_addrs(&servers).unwrap(),
            vec![
                "1.1.1.1:53".parse::<SocketAddr>().unwrap(),
                "9.9.9.9:5353".parse().unwrap(),
                "[::1]:53".parse().unwrap(),
            ]
        );
    }
}
