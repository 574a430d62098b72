//! Cabs - a small registry service for cab registrations
//!
//! The service exposes CRUD operations over HTTP and keeps every cab as a
//! JSON document in a pluggable storage backend:
//! - Typed record schema with a unique registration number
//! - Persistence gateway trait with a document store implementation
//! - Memory and local filesystem storage backends
//! - Simple HTTP API

pub mod api;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod storage;
pub mod store;
pub mod types;

pub use error::{Error, ErrorKind, Result};
