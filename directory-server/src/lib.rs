//! Directory Server - persistence façade for the employee directory
//!
//! A single-endpoint RPC-over-HTTP service: clients POST a JSON body
//! `{ "type": <operation>, "payload": {...} }` and receive the bare
//! result object/array, or `{ "error", "code", "dependentCount" }`
//! with a 4xx/5xx status on failure.
//!
//! # Module structure
//!
//! ```text
//! directory-server/src/
//! ├── core/          # configuration, state
//! ├── api/           # router and operation dispatch
//! ├── db/            # in-memory employee repository
//! └── utils/         # logging setup
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use api::build_app;
pub use core::{Config, ServerState};
pub use db::EmployeeRepository;

// Re-export logger functions
pub use utils::logger::init_logger;
