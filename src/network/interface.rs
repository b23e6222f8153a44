//! Core network types for interface representation.

use std::net::IpAddr;

/// A snapshot of a single network interface at a point in time.
///
/// Snapshots are produced fresh by an [`super::AddressFetcher`] on every
/// evaluation and are never cached across ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceSnapshot {
    /// The interface name (e.g., "eth0", "Wi-Fi").
    pub name: String,
    /// Whether the interface reports the "up" operational flag.
    pub is_up: bool,
    /// All unicast addresses currently assigned to this interface.
    pub addresses: Vec<IpAddr>,
}

impl InterfaceSnapshot {
    /// Creates a new interface snapshot.
    #[must_use]
    pub fn new(name: impl Into<String>, is_up: bool, addresses: Vec<IpAddr>) -> Self {
        Self {
            name: name.into(),
            is_up,
            addresses,
        }
    }

    /// Creates a snapshot for an interface that is up.
    #[must_use]
    pub fn up(name: impl Into<String>, addresses: Vec<IpAddr>) -> Self {
        Self::new(name, true, addresses)
    }

    /// Creates a snapshot for an interface that is down.
    #[must_use]
    pub fn down(name: impl Into<String>, addresses: Vec<IpAddr>) -> Self {
        Self::new(name, false, addresses)
    }

    /// Returns the addresses eligible for range matching.
    ///
    /// Yields nothing when the interface is down; loopback addresses are
    /// always skipped.
    pub fn candidate_addresses(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.addresses
            .iter()
            .copied()
            .filter(|_| self.is_up)
            .filter(|addr| !is_loopback(*addr))
    }
}

/// Returns true for loopback addresses, including the IPv4-mapped form
/// of `127.0.0.0/8`.
#[must_use]
pub fn is_loopback(addr: IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => v4.is_loopback(),
        IpAddr::V6(v6) => {
            v6.is_loopback() || v6.to_ipv4_mapped().is_some_and(|v4| v4.is_loopback())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn candidate_addresses_skip_loopback() {
        let snapshot = InterfaceSnapshot::up("lo", vec![ip("127.0.0.1"), ip("::1")]);
        assert_eq!(snapshot.candidate_addresses().count(), 0);
    }

    #[test]
    fn candidate_addresses_empty_when_down() {
        let snapshot = InterfaceSnapshot::down("eth0", vec![ip("10.0.0.5")]);
        assert_eq!(snapshot.candidate_addresses().count(), 0);
    }

    #[test]
    fn candidate_addresses_keep_order() {
        let snapshot = InterfaceSnapshot::up(
            "eth0",
            vec![ip("10.0.0.5"), ip("127.0.0.1"), ip("fe80::1")],
        );
        let addrs: Vec<_> = snapshot.candidate_addresses().collect();
        assert_eq!(addrs, vec![ip("10.0.0.5"), ip("fe80::1")]);
    }

    #[test]
    fn mapped_loopback_is_loopback() {
        assert!(is_loopback(ip("::ffff:127.0.0.1")));
        assert!(!is_loopback(ip("::ffff:10.0.0.1")));
    }
}
