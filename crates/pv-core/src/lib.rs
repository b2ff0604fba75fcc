//! Core types and trait definitions for the PV installation service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

pub mod error;
pub mod installation;
pub mod log;
pub mod report;
pub mod store;
pub mod timeline;
pub mod window;

pub use error::{Error, Result, ValidationError};
