//! Network identity of this machine
//!
//! Resolves the address shown as the default "external host". Loopback and
//! IPv6 addresses are skipped; interface enumeration order is preserved.

use std::net::{IpAddr, Ipv4Addr};

use crate::types::DEFAULT_HOST;

/// Non-loopback IPv4 addresses of this machine, in enumeration order.
///
/// Returns an empty list when interfaces cannot be enumerated.
pub fn external_ipv4_addrs() -> Vec<Ipv4Addr> {
    match if_addrs::get_if_addrs() {
        Ok(interfaces) => select_external_ipv4(interfaces.iter().map(|iface| iface.ip())),
        Err(e) => {
            tracing::warn!("Failed to enumerate network interfaces: {}", e);
            Vec::new()
        }
    }
}

/// First non-loopback IPv4 address, if any.
pub fn first_external_ipv4() -> Option<Ipv4Addr> {
    external_ipv4_addrs().into_iter().next()
}

/// Default external host: the first external IPv4 address, else `0.0.0.0`.
pub fn default_external_host() -> String {
    host_or_unspecified(first_external_ipv4())
}

fn host_or_unspecified(addr: Option<Ipv4Addr>) -> String {
    addr.map(|ip| ip.to_string())
        .unwrap_or_else(|| DEFAULT_HOST.to_string())
}

fn select_external_ipv4(addrs: impl IntoIterator<Item = IpAddr>) -> Vec<Ipv4Addr> {
    addrs
        .into_iter()
        .filter_map(|ip| match ip {
            IpAddr::V4(v4) if !v4.is_loopback() => Some(v4),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    #[test]
    fn test_skips_loopback_and_ipv6() {
        let addrs = vec![
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1)),
            IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)),
        ];

        assert_eq!(
            select_external_ipv4(addrs),
            vec![Ipv4Addr::new(192, 168, 1, 20), Ipv4Addr::new(10, 0, 0, 5)]
        );
    }

    #[test]
    fn test_only_loopback_yields_nothing() {
        let addrs = vec![IpAddr::V4(Ipv4Addr::LOCALHOST), IpAddr::V6(Ipv6Addr::LOCALHOST)];
        assert!(select_external_ipv4(addrs).is_empty());
    }

    #[test]
    fn test_fallback_host() {
        assert_eq!(host_or_unspecified(None), "0.0.0.0");
        assert_eq!(
            host_or_unspecified(Some(Ipv4Addr::new(192, 168, 1, 20))),
            "192.168.1.20"
        );
    }

    #[test]
    fn test_default_host_is_never_loopback() {
        let host = default_external_host();
        assert_ne!(host, "127.0.0.1");
        assert!(host.parse::<Ipv4Addr>().is_ok());
    }
}
