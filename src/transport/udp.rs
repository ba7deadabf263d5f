// src/transport/udp.rs
use std::net::SocketAddr;
use std::time::Duration;

use log::{debug, warn};
use tokio::net::UdpSocket;
use tokio::time::{timeout_at, Instant};

use super::Transport;
use crate::error::TransportError;

pub struct UdpTransport {
    socket: UdpSocket,
    peer: Option<SocketAddr>,
}

impl UdpTransport {
    pub async fn bind() -> Result<Self, TransportError> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        Ok(Self { socket, peer: None })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.socket.local_addr()?)
    }
}

impl Transport for UdpTransport {
    async fn send(&mut self, payload: &[u8], target: SocketAddr) -> Result<(), TransportError> {
        let sent = self.socket.send_to(payload, target).await?;
        debug!("Sent {} bytes to {}", sent, target);
        self.peer = Some(target);
        Ok(())
    }

    async fn receive(&mut self, max_bytes: usize, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        let deadline = Instant::now() + timeout;
        let mut buffer = vec![0u8; max_bytes];

        loop {
            match timeout_at(deadline, self.socket.recv_from(&mut buffer)).await {
                Ok(Ok((len, from))) => {
                    if self.peer.is_some_and(|peer| peer != from) {
                        warn!("Dropping {} bytes from unexpected peer {}", len, from);
                        continue;
                    }
                    buffer.truncate(len);
                    return Ok(buffer);
                }
                Ok(Err(e)) => return Err(TransportError::Io(e)),
                Err(_) => return Err(TransportError::Timeout(timeout)),
            }
        }
    }
}
