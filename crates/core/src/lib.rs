//! Shared domain types for the funding-marketplace admin client.
//!
//! This crate has no I/O: it holds the resource models mirrored from the
//! REST API, the response envelopes, pagination math, and the merge helper
//! used to patch cached records after a confirmed mutation.

pub mod envelope;
pub mod error;
pub mod merge;
pub mod models;
pub mod pagination;
pub mod resource;
pub mod search;
pub mod types;
