use crate::clients::Exchanger;
use crate::errors::{Error, Result};
use crate::lookup::LookupTxt;
use crate::types::Rcode;
use crate::Message;
use log::trace;

/// Looks up TXT records by querying a DNS server through an [`Exchanger`].
///
/// Each lookup is a single query, there is no caching or retrying.
pub struct DnsLookup<E> {
    client: E,
}

impl<E: Exchanger> DnsLookup<E> {
    pub fn new(client: E) -> DnsLookup<E> {
        DnsLookup { client }
    }

    pub fn client(&self) -> &E {
        &self.client
    }
}

impl<E: Exchanger> LookupTxt for DnsLookup<E> {
    /// Returns the text of every TXT answer, in the order the server sent them.
    ///
    /// A name that does not exist, or has no TXT records, is
    /// [`Error::NoLinkRecord`].
    fn lookup_txt(&self, name: &str) -> Result<Vec<String>> {
        let query = Message::txt_query(name);
        let response = self.client.exchange(&query)?;

        match response.rcode {
            Rcode::NoError => (),
            Rcode::NXDomain => return Err(Error::NoLinkRecord(name.to_string())),
            rcode => {
                return Err(Error::Rcode {
                    domain: name.to_string(),
                    rcode,
                })
            }
        };

        let records: Vec<String> = response
            .answers
            .iter()
            .filter_map(|answer| answer.resource.txt())
            .collect();

        trace!("{}: {} TXT records", name, records.len());

        if records.is_empty() {
            return Err(Error::NoLinkRecord(name.to_string()));
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Record, Resource};
    use crate::types::Class;
    use pretty_assertions::assert_eq;
    use std::io;
    use std::time::Duration;

    // Answers every query with a fixed rcode and set of resources.
    struct MockClient {
        rcode: Rcode,
        resources: Vec<Resource>,
    }

    impl Exchanger for MockClient {
        fn exchange(&self, query: &Message) -> io::Result<Message> {
            let name = query.questions[0].name.clone();
            Ok(Message {
                id: query.id,
                qr: true,
                rcode: self.rcode,
                questions: query.questions.clone(),
                answers: self
                    .resources
                    .iter()
                    .map(|resource| Record {
                        name: name.clone(),
                        class: Class::Internet,
                        ttl: Duration::from_secs(60),
                        resource: resource.clone(),
                    })
                    .collect(),

                ..Default::default()
            })
        }
    }

    struct FailingClient {}

    impl Exchanger for FailingClient {
        fn exchange(&self, _query: &Message) -> io::Result<Message> {
            Err(io::Error::new(io::ErrorKind::TimedOut, "timed out"))
        }
    }

    #[test]
    fn test_lookup_txt() {
        let lookup = DnsLookup::new(MockClient {
            rcode: Rcode::NoError,
            resources: vec![
                Resource::CNAME("other.example.com.".to_string()),
                Resource::TXT(vec![b"dnslink=/ipfs/".to_vec(), b"Qm".to_vec()]),
                Resource::TXT(vec![b"v=spf1 -all".to_vec()]),
            ],
        });

        assert_eq!(
            lookup.lookup_txt("example.com").unwrap(),
            vec!["dnslink=/ipfs/Qm".to_string(), "v=spf1 -all".to_string()]
        );
    }

    #[test]
    fn test_lookup_txt_not_found() {
        for rcode in &[Rcode::NXDomain, Rcode::NoError] {
            let lookup = DnsLookup::new(MockClient {
                rcode: *rcode,
                resources: vec![],
            });

            match lookup.lookup_txt("example.com") {
                Err(Error::NoLinkRecord(domain)) => assert_eq!(domain, "example.com"),
                other => panic!("{}: expected NoLinkRecord, got {:?}", rcode, other),
            }
        }
    }

    #[test]
    fn test_lookup_txt_server_failure() {
        let lookup = DnsLookup::new(MockClient {
            rcode: Rcode::ServFail,
            resources: vec![],
        });

        match lookup.lookup_txt("example.com") {
            Err(Error::Rcode { domain, rcode }) => {
                assert_eq!(domain, "example.com");
                assert_eq!(rcode, Rcode::ServFail);
            }
            other => panic!("expected Rcode error, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_txt_transport_error() {
        let lookup = DnsLookup::new(FailingClient {});

        match lookup.lookup_txt("example.com") {
            Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::TimedOut),
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
