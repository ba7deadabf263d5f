// src/protocol/request.rs
use std::time::{SystemTime, UNIX_EPOCH};

use byteorder::{ByteOrder, LittleEndian};

use super::flags::{ExtendedFlags, FlagSet, QueryFlag, QueryFlags};
use super::huffman;

pub const LAUNCHER_CHALLENGE: u32 = 199;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryRequest {
    challenge: u32,
    flags: QueryFlags,
    timestamp: u32,
    extended_flags: ExtendedFlags,
}

impl QueryRequest {
    // Player records need the game type to know whether a team byte follows.
    pub fn new(mut flags: QueryFlags, extended_flags: ExtendedFlags, timestamp: u32) -> Self {
        if flags.contains(QueryFlag::PlayerData) {
            flags.insert(QueryFlag::GameType);
        }
        if !extended_flags.is_empty() {
            flags.insert(QueryFlag::ExtendedInfo);
        }
        Self {
            challenge: LAUNCHER_CHALLENGE,
            flags,
            timestamp,
            extended_flags,
        }
    }

    pub fn now(flags: QueryFlags, extended_flags: ExtendedFlags) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| wire_timestamp(elapsed.as_secs()))
            .unwrap_or(0);
        Self::new(flags, extended_flags, timestamp)
    }

    pub fn challenge(&self) -> u32 {
        self.challenge
    }

    pub fn flags(&self) -> QueryFlags {
        self.flags
    }

    pub fn extended_flags(&self) -> ExtendedFlags {
        self.extended_flags
    }

    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    pub fn to_plain_bytes(&self) -> Vec<u8> {
        let mut out = [0u8; 16];
        let words = [
            self.challenge,
            self.flags.bits(),
            self.timestamp,
            self.extended_flags.bits(),
        ];
        for (chunk, word) in out.chunks_exact_mut(4).zip(words) {
            LittleEndian::write_u32(chunk, word);
        }
        out.to_vec()
    }

    pub fn encode(&self) -> Vec<u8> {
        huffman::encode(&self.to_plain_bytes())
    }
}

// The timestamp word is 32 bits wide; later times saturate.
fn wire_timestamp(secs: u64) -> u32 {
    u32::try_from(secs).unwrap_or(u32::MAX)
}
