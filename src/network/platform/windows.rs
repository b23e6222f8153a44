//! Windows interface fetching using `GetAdaptersAddresses`.

use crate::network::{AddressFetcher, FetchError, InterfaceSnapshot};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use windows::Win32::Foundation::{ERROR_BUFFER_OVERFLOW, NO_ERROR, WIN32_ERROR};
use windows::Win32::NetworkManagement::IpHelper::{
    GAA_FLAG_SKIP_ANYCAST, GAA_FLAG_SKIP_DNS_SERVER, GAA_FLAG_SKIP_MULTICAST,
    GET_ADAPTERS_ADDRESSES_FLAGS, GetAdaptersAddresses, IP_ADAPTER_ADDRESSES_LH,
};
use windows::Win32::NetworkManagement::Ndis::IfOperStatusUp;
use windows::Win32::Networking::WinSock::{
    AF_INET, AF_INET6, AF_UNSPEC, SOCKADDR_IN, SOCKADDR_IN6,
};

/// Buffer size hint for `GetAdaptersAddresses`.
/// The API reports the required size if this is insufficient.
const INITIAL_BUFFER_SIZE: u32 = 16384;

/// Windows implementation of [`AddressFetcher`] using `GetAdaptersAddresses`.
///
/// An adapter counts as up when its operational status is `IfOperStatusUp`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsFetcher;

impl WindowsFetcher {
    /// Creates a new Windows interface fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AddressFetcher for WindowsFetcher {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        let buffer = adapter_buffer()?;

        let mut interfaces = Vec::new();
        // SAFETY: GetAdaptersAddresses fills the buffer with a properly aligned
        // linked list of IP_ADAPTER_ADDRESSES_LH, valid while `buffer` lives.
        #[allow(clippy::cast_ptr_alignment)]
        let mut current = buffer.as_ptr().cast::<IP_ADAPTER_ADDRESSES_LH>();
        while !current.is_null() {
            let adapter = unsafe { &*current };
            interfaces.push(to_snapshot(adapter)?);
            current = adapter.Next;
        }

        Ok(interfaces)
    }
}

/// Calls `GetAdaptersAddresses`, growing the buffer once if the hint was too small.
fn adapter_buffer() -> Result<Vec<u8>, FetchError> {
    let flags = GAA_FLAG_SKIP_ANYCAST | GAA_FLAG_SKIP_MULTICAST | GAA_FLAG_SKIP_DNS_SERVER;
    let mut buffer = vec![0u8; INITIAL_BUFFER_SIZE as usize];
    let mut size = INITIAL_BUFFER_SIZE;

    let mut result = call_api(flags, &mut buffer, &mut size);
    if result == ERROR_BUFFER_OVERFLOW.0 {
        buffer.resize(size as usize, 0);
        result = call_api(flags, &mut buffer, &mut size);
    }

    if result != NO_ERROR.0 {
        return Err(windows::core::Error::from(WIN32_ERROR(result)).into());
    }
    Ok(buffer)
}

fn call_api(flags: GET_ADAPTERS_ADDRESSES_FLAGS, buffer: &mut [u8], size: &mut u32) -> u32 {
    // SAFETY: `buffer` is valid for `size` bytes; the API writes at most that
    // many and updates `size` with the required length.
    unsafe {
        GetAdaptersAddresses(
            u32::from(AF_UNSPEC.0),
            flags,
            None,
            Some(buffer.as_mut_ptr().cast()),
            &raw mut *size,
        )
    }
}

/// Converts one adapter record.
///
/// An adapter whose name is not valid UTF-16 fails the whole enumeration
/// rather than silently disappearing from the snapshot.
fn to_snapshot(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Result<InterfaceSnapshot, FetchError> {
    // SAFETY: FriendlyName is a NUL-terminated string inside the adapter buffer.
    let name = unsafe { adapter.FriendlyName.to_string() }.map_err(|e| FetchError::Platform {
        message: format!("adapter name is not valid UTF-16: {e}"),
    })?;
    let is_up = adapter.OperStatus == IfOperStatusUp;
    Ok(InterfaceSnapshot::new(name, is_up, unicast_addresses(adapter)))
}

#[allow(clippy::cast_ptr_alignment)]
fn unicast_addresses(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Vec<IpAddr> {
    let mut addresses = Vec::new();
    let mut unicast = adapter.FirstUnicastAddress;

    // SAFETY: the unicast list lives inside the adapter buffer.
    while !unicast.is_null() {
        let entry = unsafe { &*unicast };

        if let Some(sockaddr) = unsafe { entry.Address.lpSockaddr.as_ref() } {
            if sockaddr.sa_family == AF_INET {
                // SAFETY: family is AF_INET, so this is a SOCKADDR_IN.
                let sin = unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN>()) };
                let b = unsafe { sin.sin_addr.S_un.S_un_b };
                addresses.push(IpAddr::V4(Ipv4Addr::new(b.s_b1, b.s_b2, b.s_b3, b.s_b4)));
            } else if sockaddr.sa_family == AF_INET6 {
                // SAFETY: family is AF_INET6, so this is a SOCKADDR_IN6.
                let sin6 = unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN6>()) };
                let octets = unsafe { sin6.sin6_addr.u.Byte };
                addresses.push(IpAddr::V6(Ipv6Addr::from(octets)));
            }
        }

        unicast = entry.Next;
    }

    addresses
}
