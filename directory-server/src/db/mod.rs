//! Database layer
//!
//! The backing store of the hosted function is out of scope here; the
//! repository is the authoritative in-memory table for the process.

pub mod repository;

pub use repository::EmployeeRepository;
