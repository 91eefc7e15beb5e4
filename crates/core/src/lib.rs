//! Core domain and storage abstractions for the catalog service.
//!
//! This crate is I/O free: it defines the catalog entities, the single-table
//! key encoding, the [`storage::StorageGateway`] trait that storage backends
//! implement, and the repositories built on top of that trait. Concrete
//! backends (DynamoDB, in-memory) live in the service crate.

pub mod catalog;
pub mod repository;
pub mod storage;
