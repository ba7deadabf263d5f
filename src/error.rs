// src/error.rs
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("empty datagram")]
    EmptyPayload,
    #[error("invalid huffman header byte 0x{0:02X}")]
    InvalidHeader(u8),
    #[error("bit stream ends inside a code word after {decoded} decoded bytes")]
    IncompleteSymbol { decoded: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("truncated buffer: needed {needed} bytes at offset {offset}, {remaining} remaining")]
    TruncatedBuffer {
        needed: usize,
        remaining: usize,
        offset: usize,
    },
    #[error("response carries undefined flag bits 0x{0:08X}")]
    UnknownFlags(u32),
    #[error("undefined game type {0}")]
    UnknownGameType(u8),
    #[error("{0} must be present before it is referenced")]
    MissingField(&'static str),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to resolve {address}: {source}")]
    Resolve {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} did not resolve to any IPv4 address")]
    NoAddress(String),
    #[error("invalid address {0}")]
    InvalidAddress(String),
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no response within {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
    #[error("codec: {0}")]
    Codec(#[from] CodecError),
    #[error("decode: {0}")]
    Decode(#[from] DecodeError),
}

impl QueryError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Timeout(_)))
    }
}
