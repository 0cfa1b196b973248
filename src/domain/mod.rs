//! Visitor payload parsing and notification formatting
//!
//! Everything here is request-local; nothing outlives a single relay call.

pub mod visit;
