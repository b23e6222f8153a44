//! Unix interface fetching using `getifaddrs`.

use std::collections::BTreeMap;
use std::net::{IpAddr, SocketAddrV4, SocketAddrV6};

use nix::ifaddrs::{InterfaceAddress, getifaddrs};
use nix::net::if_::InterfaceFlags;

use crate::network::{AddressFetcher, FetchError, InterfaceSnapshot};

/// Unix implementation of [`AddressFetcher`] using `getifaddrs(3)`.
///
/// `getifaddrs` yields one entry per (interface, address) pair, plus
/// address-less entries for link-layer records; entries are grouped back
/// into one [`InterfaceSnapshot`] per interface name.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixFetcher;

impl UnixFetcher {
    /// Creates a new Unix interface fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AddressFetcher for UnixFetcher {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        Ok(group_by_interface(getifaddrs()?))
    }
}

fn group_by_interface(entries: impl Iterator<Item = InterfaceAddress>) -> Vec<InterfaceSnapshot> {
    let mut interfaces: BTreeMap<String, InterfaceSnapshot> = BTreeMap::new();

    for entry in entries {
        let snapshot = interfaces
            .entry(entry.interface_name.clone())
            .or_insert_with(|| InterfaceSnapshot::down(entry.interface_name.clone(), vec![]));

        // Flags are per-interface; any entry reporting IFF_UP is authoritative
        snapshot.is_up |= entry.flags.contains(InterfaceFlags::IFF_UP);

        if let Some(ip) = ip_of(&entry) {
            snapshot.addresses.push(ip);
        }
    }

    interfaces.into_values().collect()
}

fn ip_of(entry: &InterfaceAddress) -> Option<IpAddr> {
    let address = entry.address.as_ref()?;
    if let Some(sin) = address.as_sockaddr_in() {
        return Some(IpAddr::V4(*SocketAddrV4::from(*sin).ip()));
    }
    address
        .as_sockaddr_in6()
        .map(|sin6| IpAddr::V6(*SocketAddrV6::from(*sin6).ip()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_succeeds_and_names_are_not_empty() {
        let interfaces = UnixFetcher::new().fetch().expect("getifaddrs failed");

        for interface in &interfaces {
            assert!(!interface.name.is_empty(), "{interface:?}");
        }
    }

    #[test]
    fn interface_names_are_unique() {
        let interfaces = UnixFetcher::new().fetch().unwrap();
        let mut names: Vec<_> = interfaces.iter().map(|i| i.name.as_str()).collect();
        let total = names.len();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
