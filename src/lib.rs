//! Client for the Zandronum launcher query protocol.
//!
//! A query is one compressed UDP datagram out and one back. The reply lists
//! only the field groups that were asked for, in ascending flag-bit order:
//!
//! ```no_run
//! use std::time::Duration;
//! use zandro_query::query_default;
//!
//! # async fn run() -> Result<(), zandro_query::QueryError> {
//! let status = query_default("127.0.0.1:10666", Duration::from_secs(3)).await?;
//! println!("{:?} on {:?}", status.name, status.map_name);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod protocol;
pub mod query;
pub mod transport;
pub mod utils;

pub use error::{CodecError, DecodeError, QueryError, TransportError};
pub use models::server::{GameType, Player, ResponseCode, ServerStatus};
pub use protocol::flags::{ExtendedFlag, ExtendedFlags, FlagSet, QueryFlag, QueryFlags};
pub use protocol::request::QueryRequest;
pub use query::{query, query_default, query_report, query_with, QueryOptions, QueryReport};
