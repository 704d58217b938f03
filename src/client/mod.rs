//! Quiz client module.
//!
//! Terminal client for playing a session hosted by the quiz server.

mod client;
mod state;
mod ui;

pub use client::run;
pub use state::{ClientApp, ClientState, Status, StatusLevel};
