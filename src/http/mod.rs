//! HTTP transport layer
//!
//! Inbound routes are wired in `build_app`; this module only holds the handlers.

pub mod handlers;
