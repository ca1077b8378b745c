//! Core tootstrip library (transport, decode, ring buffer, feed pump, config).

pub mod config;
pub mod decode;
pub mod feed;
pub mod ring;
pub mod stream;
pub mod text;
