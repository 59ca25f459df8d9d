//! Domains module containing business logic organized by bounded contexts.
//!
//! The server exposes a single bounded context: FRED-backed tools.

pub mod tools;
