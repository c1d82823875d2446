//! Reelstash API
//!
//! HTTP surface of the upload service: auth extraction, the upload
//! orchestrator and its sibling handlers, routing, and error rendering.
//! Exposed as a library so integration tests can build the router with fake
//! capability implementations.

pub mod api_doc;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod routes;
pub mod state;
