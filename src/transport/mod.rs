// src/transport/mod.rs
use std::net::SocketAddr;
use std::time::Duration;

use log::debug;
use tokio::net::lookup_host;

use crate::error::TransportError;

pub mod udp;

pub use udp::UdpTransport;

// One handle serves one query; callers running queries in parallel give
// each its own handle.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&mut self, payload: &[u8], target: SocketAddr) -> Result<(), TransportError>;

    async fn receive(&mut self, max_bytes: usize, timeout: Duration) -> Result<Vec<u8>, TransportError>;
}

/// Resolves `host:port` to its first IPv4 address.
pub async fn resolve(host: &str, port: u16) -> Result<SocketAddr, TransportError> {
    let address = format!("{}:{}", host, port);
    let mut candidates = lookup_host(address.as_str())
        .await
        .map_err(|source| TransportError::Resolve { address: address.clone(), source })?;

    let resolved = candidates
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| TransportError::NoAddress(address.clone()))?;
    debug!("Resolved {} to {}", address, resolved);
    Ok(resolved)
}
