// src/protocol/mod.rs
pub mod cursor;
pub mod flags;
pub mod huffman;
mod huffman_table;
pub mod request;
pub mod response;
