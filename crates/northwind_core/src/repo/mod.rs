//! Repository layer contracts and SQLite implementation.
//!
//! # Responsibility
//! - Define the read and write contracts over the Northwind schema.
//! - Isolate SQL text and row decoding from callers.
//!
//! # Invariants
//! - Every operation opens its own connection and closes it before returning.
//! - Write paths validate records before any SQL mutation.
//! - Skipped territories/products are logged, never surfaced as errors.

pub mod northwind_repo;
mod read_ops;
mod row_decode;
mod write_ops;

pub use northwind_repo::{
    NorthwindReadRepository, NorthwindWriteRepository, RepoError, RepoResult,
    SqliteNorthwindRepository, REQUIRED_TABLES,
};
