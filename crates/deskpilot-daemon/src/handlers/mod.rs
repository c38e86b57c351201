//! Per-method request handlers.
//!
//! Each handler takes the collaborator it needs and the request, and always
//! produces a response carrying the request id.

mod common;
pub mod input;
pub mod recording;
pub mod state;
