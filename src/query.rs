// src/query.rs
use std::net::SocketAddr;
use std::time::Duration;

use log::{debug, error, info};

use crate::error::QueryError;
use crate::models::server::ServerStatus;
use crate::protocol::flags::{ExtendedFlags, FlagSet, QueryFlags};
use crate::protocol::huffman;
use crate::protocol::request::QueryRequest;
use crate::protocol::response::parse_response;
use crate::transport::{resolve, Transport, UdpTransport};
use crate::utils::{hex_bytes, split_host_port};

pub const DEFAULT_PORT: u16 = 10666;
pub const MAX_DATAGRAM: usize = 8192;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    pub timeout: Duration,
    pub max_datagram: usize,
    pub default_port: u16,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_datagram: MAX_DATAGRAM,
            default_port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug)]
pub struct QueryReport {
    pub target: Option<SocketAddr>,
    pub request: Option<QueryRequest>,
    pub sent: Vec<u8>,
    pub received: Option<Vec<u8>>,
    pub decoded: Option<Vec<u8>>,
    pub outcome: Result<ServerStatus, QueryError>,
}

impl QueryReport {
    fn failed(target: Option<SocketAddr>, err: QueryError) -> Self {
        Self {
            target,
            request: None,
            sent: Vec::new(),
            received: None,
            decoded: None,
            outcome: Err(err),
        }
    }

    pub fn into_result(self) -> Result<ServerStatus, QueryError> {
        self.outcome
    }
}

pub async fn query(
    address: &str,
    flags: QueryFlags,
    extended_flags: ExtendedFlags,
    timeout: Duration,
) -> Result<ServerStatus, QueryError> {
    let options = QueryOptions { timeout, ..QueryOptions::default() };
    query_report(address, flags, extended_flags, &options).await.into_result()
}

/// Queries `address` for name, map, player count, players and game type.
pub async fn query_default(address: &str, timeout: Duration) -> Result<ServerStatus, QueryError> {
    query(address, QueryFlags::default_request(), ExtendedFlags::empty(), timeout).await
}

pub async fn query_report(
    address: &str,
    flags: QueryFlags,
    extended_flags: ExtendedFlags,
    options: &QueryOptions,
) -> QueryReport {
    info!(
        "Querying {} (flags 0x{:08X}, extended 0x{:08X}, timeout {:?})",
        address,
        flags.bits(),
        extended_flags.bits(),
        options.timeout
    );

    let target = match resolve_target(address, options.default_port).await {
        Ok(target) => target,
        Err(e) => {
            error!("Could not resolve {}: {}", address, e);
            return QueryReport::failed(None, e);
        }
    };

    let mut transport = match UdpTransport::bind().await {
        Ok(transport) => transport,
        Err(e) => {
            error!("Could not bind udp socket: {}", e);
            return QueryReport::failed(Some(target), e.into());
        }
    };

    let request = QueryRequest::now(flags, extended_flags);
    query_with(&mut transport, target, &request, options).await
}

async fn resolve_target(address: &str, default_port: u16) -> Result<SocketAddr, QueryError> {
    let (host, port) = split_host_port(address, default_port)?;
    Ok(resolve(&host, port).await?)
}

/// Sends `request` to `target` over `transport` and parses the single reply.
pub async fn query_with<T: Transport>(
    transport: &mut T,
    target: SocketAddr,
    request: &QueryRequest,
    options: &QueryOptions,
) -> QueryReport {
    let sent = request.encode();
    let mut received = None;
    let mut decoded = None;

    let outcome = round_trip(
        transport,
        target,
        request,
        &sent,
        options,
        &mut received,
        &mut decoded,
    )
    .await;
    match &outcome {
        Ok(status) => info!("Query to {} finished with {:?}", target, status.response_code),
        Err(e) => error!("Query to {} failed: {}", target, e),
    }

    QueryReport {
        target: Some(target),
        request: Some(*request),
        sent,
        received,
        decoded,
        outcome,
    }
}

async fn round_trip<T: Transport>(
    transport: &mut T,
    target: SocketAddr,
    request: &QueryRequest,
    sent: &[u8],
    options: &QueryOptions,
    received: &mut Option<Vec<u8>>,
    decoded: &mut Option<Vec<u8>>,
) -> Result<ServerStatus, QueryError> {
    transport.send(sent, target).await?;
    debug!(
        "Query sent to {}: plain [{}] encoded [{}]",
        target,
        hex_bytes(&request.to_plain_bytes()),
        hex_bytes(sent)
    );

    let datagram = received.insert(transport.receive(options.max_datagram, options.timeout).await?);
    debug!("Received {} bytes from {}: [{}]", datagram.len(), target, hex_bytes(datagram));

    let plain = decoded.insert(huffman::decode(datagram)?);
    debug!("Decoded response from {}: [{}]", target, hex_bytes(plain));

    Ok(parse_response(plain)?)
}
