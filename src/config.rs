use std::env;
use std::time::Duration;

use crate::protocol::flags::{ExtendedFlags, FlagSet, QueryFlags};
use crate::query::{QueryOptions, DEFAULT_PORT, MAX_DATAGRAM};

#[derive(Debug, Clone)]
pub struct Config {
    // Round trip
    pub timeout_secs: u64,
    pub recv_buffer: usize,
    pub default_port: u16,

    // Requested groups, as wire bitmasks
    pub flags: u32,
    pub extended_flags: u32,

    // Other configs
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: 3,
            recv_buffer: MAX_DATAGRAM,
            default_port: DEFAULT_PORT,
            flags: QueryFlags::default_request().bits(),
            extended_flags: 0,
            log_level: "info".to_string(),
        }
    }
}

fn parse_mask(value: &str) -> Option<u32> {
    let value = value.trim();
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout_secs: env::var("QUERY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),

            recv_buffer: env::var("QUERY_RECV_BUFFER")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&size: &usize| size > 0)
                .unwrap_or(defaults.recv_buffer),

            default_port: env::var("QUERY_DEFAULT_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_port),

            flags: env::var("QUERY_FLAGS")
                .ok()
                .and_then(|v| parse_mask(&v))
                .unwrap_or(defaults.flags),

            extended_flags: env::var("QUERY_EXTENDED_FLAGS")
                .ok()
                .and_then(|v| parse_mask(&v))
                .unwrap_or(defaults.extended_flags),

            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            max_datagram: self.recv_buffer,
            default_port: self.default_port,
        }
    }

    /// Requested groups; bits that name no group are dropped.
    pub fn query_flags(&self) -> QueryFlags {
        QueryFlags::combine(QueryFlags::from_bits_retain(self.flags).members())
    }

    pub fn extended_flags(&self) -> ExtendedFlags {
        ExtendedFlags::combine(ExtendedFlags::from_bits_retain(self.extended_flags).members())
    }
}
