//! Core server building blocks

pub mod config;
pub mod state;

pub use config::Config;
pub use state::ServerState;
