use strum_macros::{Display, EnumString};

/// Response Codes.
/// See [rfc1035] and <https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-6>
///
/// [rfc1035]: https://datatracker.ietf.org/doc/html/rfc1035
#[derive(Copy, Clone, Debug, Display, EnumString, FromPrimitive, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
#[repr(u16)] // In headers it is 4 bits, in extended OPTS it is 16.
pub enum Rcode {
    /// No Error
    NoError = 0,

    /// Format Error
    FormErr = 1,

    /// Server Failure
    ServFail = 2,

    /// Non-Existent Domain
    NXDomain = 3,

    /// Not Implemented
    NotImp = 4,

    /// Query Refused
    Refused = 5,

    /// Name Exists when it should not. See [rfc2136].
    ///
    /// [rfc2136]: https://datatracker.ietf.org/doc/html/rfc2136
    YXDomain = 6,

    /// RR Set Exists when it should not. See [rfc2136].
    ///
    /// [rfc2136]: https://datatracker.ietf.org/doc/html/rfc2136
    YXRRSet = 7,

    /// RR Set that should exist does not. See [rfc2136].
    ///
    /// [rfc2136]: https://datatracker.ietf.org/doc/html/rfc2136
    NXRRSet = 8,

    /// Not Authoritative, or Not Authorized. See [rfc2136] and [rfc2845].
    ///
    /// [rfc2136]: https://datatracker.ietf.org/doc/html/rfc2136
    /// [rfc2845]: https://datatracker.ietf.org/doc/html/rfc2845
    NotAuth = 9,

    /// Name not contained in zone. See [rfc2136].
    ///
    /// [rfc2136]: https://datatracker.ietf.org/doc/html/rfc2136
    NotZone = 10,
    // 11-15 are not used by this crate.
}

impl Default for Rcode {
    fn default() -> Self {
        Rcode::NoError
    }
}

/// Resource Record Type, for example, A, CNAME or TXT.
///
// Records of any other type are skipped when a message is parsed.
#[derive(Copy, Clone, Debug, Display, EnumString, FromPrimitive, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
#[repr(u16)]
pub enum Type {
    /// IPv4 Address.
    A = 1,
    NS = 2,
    CNAME = 5,
    SOA = 6,

    /// Domain name pointer.
    PTR = 12,

    /// Mail exchange.
    MX = 15,

    /// Text strings.
    TXT = 16,

    /// IPv6 Address.
    AAAA = 28,

    /// Server Selection
    SRV = 33,

    /// EDNS(0) Opt type. See [rfc6891].
    ///
    /// [rfc6891]: https://datatracker.ietf.org/doc/html/rfc6891
    OPT = 41,

    /// Any record type.
    /// Only valid as a Question Type.
    ANY = 255,
}

impl Default for Type {
    fn default() -> Self {
        Type::TXT
    }
}

/// Resource Record Class, for example Internet.
#[derive(Copy, Clone, Debug, Display, EnumString, FromPrimitive, PartialEq, Eq)]
#[repr(u16)]
pub enum Class {
    /// (Default) The Internet (IN), see [rfc1035].
    ///
    /// [rfc1035]: https://datatracker.ietf.org/doc/html/rfc1035
    #[strum(serialize = "IN")]
    Internet = 1,

    /// CSNET (CS), obsolete.
    #[strum(serialize = "CS")]
    CsNet = 2,

    /// Chaosnet (CH), obsolete.
    #[strum(serialize = "CH")]
    Chaos = 3,

    /// Hesiod (HS).
    #[strum(serialize = "HS")]
    Hesiod = 4,

    None = 254, // NONE [RFC2136]

    /// * (ANY) See [rfc1035]
    ///
    /// [rfc1035]: https://datatracker.ietf.org/doc/html/rfc1035
    #[strum(serialize = "*")]
    Any = 255,
}

impl Default for Class {
    fn default() -> Self {
        Class::Internet
    }
}
