//! Quiz server module.
//!
//! Hosts single-player quiz sessions over WebSocket.

mod connection;
mod server;

pub use connection::Connection;
pub use server::{run, serve};
