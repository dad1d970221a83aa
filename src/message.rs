use crate::bail;
use crate::io::{DNSReadExt, SeekExt};
use crate::types::{Class, Rcode, Type};
use byteorder::{ReadBytesExt, BE};
use log::trace;
use num_traits::FromPrimitive;
use std::io;
use std::io::Cursor;
use std::time::Duration;

/// Largest response we advertise via EDNS(0).
pub const MAX_PAYLOAD_SIZE: u16 = 4096;

/// DNS Message, just enough of it to ask for and read TXT records.
///
/// # Examples
///
/// ```rust
/// use dnslink::Message;
///
/// let query = Message::txt_query("example.com");
/// let req = query.to_vec().expect("failed to encode DNS request");
///
/// // The question starts straight after the 12 byte header.
/// assert_eq!(&req[12..25], b"\x07example\x03com\x00");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Message {
    /// 16-bit identifier, copied into the reply so it can be matched up
    /// with its query.
    pub id: u16,

    /// Specifies whether this message is a response.
    pub qr: bool,

    /// Authoritative Answer.
    pub aa: bool,

    /// Truncation - specifies that this message was truncated.
    pub tc: bool,

    /// Recursion Desired.
    pub rd: bool,

    /// Recursion Available.
    pub ra: bool,

    /// Response code.
    pub rcode: Rcode,

    pub questions: Vec<Question>,

    /// The answer records. Records of unsupported types are dropped.
    pub answers: Vec<Record>,

    /// When set, an EDNS(0) record advertising this payload size is sent.
    pub payload_size: Option<u16>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Question {
    pub name: String,
    pub r#type: Type,
    pub class: Class,
}

/// Resource Record (RR)
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub name: String,
    pub class: Class,

    /// The number of seconds that the resource record may be cached.
    pub ttl: Duration,

    pub resource: Resource,
}

#[derive(Clone, Debug, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Resource {
    CNAME(String),

    /// A TXT record, as its list of <character-string>s.
    TXT(Vec<Vec<u8>>),
}

impl Resource {
    pub fn r#type(&self) -> Type {
        match self {
            Resource::CNAME(_) => Type::CNAME,
            Resource::TXT(_) => Type::TXT,
        }
    }

    /// Returns the text of a TXT record, or None for any other resource.
    ///
    /// Multiple strings are joined without a separator, the same way
    /// system resolvers present them.
    pub fn txt(&self) -> Option<String> {
        match self {
            Resource::TXT(strings) => Some(String::from_utf8_lossy(&strings.concat()).into_owned()),
            _ => None,
        }
    }
}

impl Message {
    /// Builds a recursive query for the TXT records of `domain`.
    pub fn txt_query(domain: &str) -> Message {
        Message {
            id: rand::random(),
            rd: true,
            questions: vec![Question {
                name: domain.to_string(),
                r#type: Type::TXT,
                class: Class::Internet,
            }],
            payload_size: Some(MAX_PAYLOAD_SIZE),

            ..Default::default()
        }
    }

    /// Returns this DNS Message as a Vec<u8> ready to be sent, as defined by [rfc1035](https://datatracker.ietf.org/doc/html/rfc1035).
    ///
    /// Only the header, questions and EDNS(0) record are written.
    pub fn to_vec(&self) -> io::Result<Vec<u8>> {
        let mut req = Vec::<u8>::with_capacity(512);

        req.extend_from_slice(&self.id.to_be_bytes());

        let mut b = 0_u8;
        b |= if self.qr { 0b1000_0000 } else { 0 };
        b |= if self.aa { 0b0000_0100 } else { 0 };
        b |= if self.tc { 0b0000_0010 } else { 0 };
        b |= if self.rd { 0b0000_0001 } else { 0 };
        req.push(b);

        let mut b = 0_u8;
        b |= if self.ra { 0b1000_0000 } else { 0 };
        b |= (self.rcode as u8) & 0b0000_1111;
        req.push(b);

        let ar_count = self.payload_size.is_some() as u16;

        req.extend_from_slice(&(self.questions.len() as u16).to_be_bytes());
        req.extend_from_slice(&0_u16.to_be_bytes());
        req.extend_from_slice(&0_u16.to_be_bytes());
        req.extend_from_slice(&ar_count.to_be_bytes());

        for question in &self.questions {
            Message::write_qname(&mut req, &question.name)?;

            req.extend_from_slice(&(question.r#type as u16).to_be_bytes());
            req.extend_from_slice(&(question.class as u16).to_be_bytes());
        }

        if let Some(payload_size) = self.payload_size {
            // OPT pseudo-record for the root, the class carries the payload size.
            req.push(0);
            req.extend_from_slice(&(Type::OPT as u16).to_be_bytes());
            req.extend_from_slice(&payload_size.to_be_bytes());
            req.extend_from_slice(&0_u32.to_be_bytes()); // extended rcode, version and flags
            req.extend_from_slice(&0_u16.to_be_bytes()); // no options
        }

        Ok(req)
    }

    /// Writes a Unicode domain name into the supplied `Vec<u8>`, IDNA encoding
    /// it first.
    fn write_qname(buf: &mut Vec<u8>, domain: &str) -> io::Result<()> {
        let domain = match idna::domain_to_ascii(domain) {
            Err(e) => {
                bail!(InvalidData, "invalid dns name '{0}': {1}", domain, e);
            }
            Ok(domain) => domain,
        };

        // 255 bytes on the wire, including length bytes and the final root label.
        if domain.trim_end_matches('.').len() > 253 {
            bail!(InvalidData, "dns name '{}' is too long", domain);
        }

        if !domain.is_empty() && domain != "." {
            for label in domain.split_terminator('.') {
                if label.is_empty() {
                    bail!(InvalidData, "empty label in domain name '{}'", domain);
                }

                if label.len() > 63 {
                    bail!(InvalidData, "label '{0}' longer than 63 characters", label);
                }

                buf.push(label.len() as u8);
                buf.extend_from_slice(label.as_bytes());
            }
        }

        buf.push(0);

        Ok(())
    }

    /// Parses a DNS message, keeping its questions and the answer records this
    /// crate understands. The authority and additional sections are ignored.
    pub fn from_slice(buf: &[u8]) -> io::Result<Message> {
        MessageParser::new(buf).parse()
    }
}

// A helper class to hold state while the parsing is happening.
struct MessageParser<'a> {
    cur: Cursor<&'a [u8]>,

    m: Message,
}

impl<'a> MessageParser<'a> {
    fn new(buf: &'a [u8]) -> MessageParser<'a> {
        MessageParser {
            cur: Cursor::new(buf),
            m: Message::default(),
        }
    }

    /// Consume the MessageParser and returned the resulting Message.
    fn parse(mut self) -> io::Result<Message> {
        self.m.id = self.cur.read_u16::<BE>()?;

        let b = self.cur.read_u8()?;
        self.m.qr = (0b1000_0000 & b) != 0;
        self.m.aa = (0b0000_0100 & b) != 0;
        self.m.tc = (0b0000_0010 & b) != 0;
        self.m.rd = (0b0000_0001 & b) != 0;

        let b = self.cur.read_u8()?;
        self.m.ra = (0b1000_0000 & b) != 0;
        let rcode = 0b0000_1111 & b;

        self.m.rcode = match FromPrimitive::from_u8(rcode) {
            Some(t) => t,
            None => bail!(InvalidData, "invalid RCode({})", rcode),
        };

        let qd_count = self.cur.read_u16::<BE>()?;
        let an_count = self.cur.read_u16::<BE>()?;
        let _ns_count = self.cur.read_u16::<BE>()?;
        let _ar_count = self.cur.read_u16::<BE>()?;

        self.read_questions(qd_count)?;
        self.read_answers(an_count)?;

        Ok(self.m)
    }

    fn read_questions(&mut self, count: u16) -> io::Result<()> {
        self.m.questions.reserve_exact(count.into());

        for _ in 0..count {
            let name = self.cur.read_qname()?;

            let r#type = self.cur.read_u16::<BE>()?;
            let r#type = match FromPrimitive::from_u16(r#type) {
                Some(t) => t,
                None => bail!(InvalidData, "invalid Type({})", r#type),
            };

            let class = self.cur.read_u16::<BE>()?;
            let class = match FromPrimitive::from_u16(class) {
                Some(c) => c,
                None => bail!(InvalidData, "invalid Class({})", class),
            };

            self.m.questions.push(Question {
                name,
                r#type,
                class,
            });
        }

        Ok(())
    }

    fn read_answers(&mut self, count: u16) -> io::Result<()> {
        for _ in 0..count {
            let name = self.cur.read_qname()?;
            let r#type = self.cur.read_u16::<BE>()?;
            let class = self.cur.read_u16::<BE>()?;
            let ttl = Duration::from_secs(self.cur.read_u32::<BE>()?.into());
            let len = self.cur.read_u16::<BE>()?;

            let start = self.cur.position();
            let end = start + u64::from(len);
            if u64::from(len) > self.cur.remaining() {
                bail!(
                    UnexpectedEof,
                    "record length ({}) exceeds the remaining {} bytes",
                    len,
                    self.cur.remaining()
                );
            }

            let resource = match (Type::from_u16(r#type), Class::from_u16(class)) {
                (Some(Type::TXT), Some(class)) => Some((class, self.read_txt(end)?)),
                (Some(Type::CNAME), Some(class)) => {
                    Some((class, Resource::CNAME(self.cur.read_qname()?)))
                }
                _ => {
                    trace!("{}: skipping record of type {} class {}", name, r#type, class);
                    None
                }
            };

            if let Some((class, resource)) = resource {
                self.m.answers.push(Record {
                    name,
                    class,
                    ttl,
                    resource,
                });
            }

            // Always continue from the declared end of the record.
            self.cur.set_position(end);
        }

        Ok(())
    }

    fn read_txt(&mut self, end: u64) -> io::Result<Resource> {
        let mut strings = Vec::new();

        while self.cur.position() < end {
            let s = self.cur.read_character_string()?;
            if self.cur.position() > end {
                bail!(InvalidData, "TXT string overruns the record");
            }
            strings.push(s);
        }

        Ok(Resource::TXT(strings))
    }
}
