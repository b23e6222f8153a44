//! CIDR address ranges.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use ipnet::IpNet;
use thiserror::Error;

/// A configured range string failed to parse.
#[derive(Debug, Error)]
#[error("Invalid address range '{spec}': {source}")]
pub struct RangeError {
    /// The offending range string, as configured.
    pub spec: String,
    /// Underlying parse error
    #[source]
    pub source: ipnet::AddrParseError,
}

/// An address prefix plus bit-length, parsed from a CIDR string.
///
/// Host bits are allowed and ignored (`"192.168.1.7/24"` describes the same
/// block as `"192.168.1.0/24"`). The prefix length is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    net: IpNet,
}

impl AddressRange {
    /// Parses a single CIDR string.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] if the string is not `<address>/<prefix>` or the
    /// prefix is too long for the address family.
    pub fn parse(spec: &str) -> Result<Self, RangeError> {
        spec.parse::<IpNet>()
            .map(|net| Self { net })
            .map_err(|source| RangeError {
                spec: spec.to_string(),
                source,
            })
    }

    /// Parses every spec, failing on the first malformed one.
    ///
    /// Either all ranges are returned or none are.
    ///
    /// # Errors
    ///
    /// Returns the [`RangeError`] of the first malformed spec.
    pub fn parse_all<S: AsRef<str>>(specs: &[S]) -> Result<Vec<Self>, RangeError> {
        specs.iter().map(|s| Self::parse(s.as_ref())).collect()
    }

    /// Returns true if `addr` lies inside this range.
    ///
    /// An IPv4 range also contains the IPv4-mapped IPv6 form of its
    /// addresses; an IPv6 range never contains a plain IPv4 address.
    #[must_use]
    pub fn contains(&self, addr: IpAddr) -> bool {
        match (self.net, addr) {
            (IpNet::V4(net), IpAddr::V4(ip)) => net.contains(&ip),
            (IpNet::V4(net), IpAddr::V6(ip)) => {
                ip.to_ipv4_mapped().is_some_and(|v4| net.contains(&v4))
            }
            (IpNet::V6(net), IpAddr::V6(ip)) => net.contains(&ip),
            (IpNet::V6(_), IpAddr::V4(_)) => false,
        }
    }

    /// Returns the prefix length in bits.
    #[must_use]
    pub fn prefix_len(&self) -> u8 {
        self.net.prefix_len()
    }
}

impl FromStr for AddressRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.net.trunc())
    }
}
