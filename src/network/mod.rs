//! Network layer - submission execution
//!
//! The Network actor receives submit/cancel commands and sends back responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::create_client;
