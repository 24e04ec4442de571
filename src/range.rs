//! CIDR prefix parsing and address range enumeration

use ipnet::{IpAddrRange, IpNet, Ipv4AddrRange, Ipv6AddrRange};
use std::fmt;
use std::net::IpAddr;
use thiserror::Error;

/// A network prefix that could not be parsed
///
/// Covers bad address syntax, a missing or malformed `/len` separator, and
/// prefix lengths beyond the address width.
#[derive(Debug, Error)]
#[error("invalid network prefix `{prefix}`: {reason}")]
pub struct InvalidPrefixError {
    prefix: String,
    reason: String,
}

/// A contiguous, inclusive range of IP addresses derived from a CIDR prefix
///
/// The range runs from the network address to the address with all host bits
/// set, so `start() <= end()` holds by construction. The range itself is
/// immutable; iteration is lazy and strictly increasing. An iterator cannot be
/// rewound; call [`AddrRange::iter`] again for a fresh pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddrRange {
    net: IpNet,
}

impl AddrRange {
    /// Parse a CIDR prefix such as `192.0.2.0/24` or `2001:db8::/64`.
    ///
    /// Host bits in the input are permitted and masked off, so
    /// `2001:db8::1/64` denotes the same range as `2001:db8::/64`.
    pub fn from_prefix(prefix: &str) -> Result<Self, InvalidPrefixError> {
        let net: IpNet = prefix
            .parse()
            .map_err(|e: ipnet::AddrParseError| InvalidPrefixError {
                prefix: prefix.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { net: net.trunc() })
    }

    /// First address of the range (the network address).
    pub fn start(&self) -> IpAddr {
        self.net.network()
    }

    /// Last address of the range (host bits all set).
    pub fn end(&self) -> IpAddr {
        self.net.broadcast()
    }

    /// Number of addresses in the range, `2^(address bits - prefix length)`.
    ///
    /// Saturates at `u128::MAX` for `::/0`, the one range whose size does not
    /// fit in 128 bits.
    pub fn addr_count(&self) -> u128 {
        let host_bits = u32::from(self.net.max_prefix_len() - self.net.prefix_len());
        1u128.checked_shl(host_bits).unwrap_or(u128::MAX)
    }

    /// Lazy inclusive iterator from [`start`](Self::start) to
    /// [`end`](Self::end).
    pub fn iter(&self) -> IpAddrRange {
        match self.net {
            IpNet::V4(net) => IpAddrRange::from(Ipv4AddrRange::new(net.network(), net.broadcast())),
            IpNet::V6(net) => IpAddrRange::from(Ipv6AddrRange::new(net.network(), net.broadcast())),
        }
    }
}

impl fmt::Display for AddrRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start(), self.end())
    }
}

impl IntoIterator for &AddrRange {
    type Item = IpAddr;
    type IntoIter = IpAddrRange;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
